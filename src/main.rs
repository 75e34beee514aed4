use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidgen_backend::infrastructure::config::{Config, LogFormat};
use vidgen_backend::infrastructure::db::{check_connection, create_pool};
use vidgen_backend::infrastructure::http::start_http_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting VidGen Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool)
    tracing::info!("Instantiating repositories...");
    let user_repo = Arc::new(vidgen_backend::infrastructure::repositories::UserRepository::new(pool.clone()));
    let subscription_repo = Arc::new(vidgen_backend::infrastructure::repositories::SubscriptionRepository::new(pool.clone()));
    let video_repo = Arc::new(vidgen_backend::infrastructure::repositories::VideoRepository::new(pool.clone()));
    let usage_repo = Arc::new(vidgen_backend::infrastructure::repositories::UsageRepository::new(pool.clone()));

    // 2. Instantiate the generation provider client
    tracing::info!("Instantiating generation provider client...");
    let generation_repo = Arc::new(
        vidgen_backend::infrastructure::repositories::VeoGenerationRepository::new(
            config.veo_api_url.clone(),
            config.veo_api_key.clone(),
        ),
    );

    // 3. Instantiate services (inject repositories and clients)
    tracing::info!("Instantiating services...");
    let user_service = Arc::new(vidgen_backend::domain::user::UserService::new(
        user_repo.clone(),
        subscription_repo.clone(),
        usage_repo.clone(),
        video_repo.clone(),
    ));
    let video_service = Arc::new(vidgen_backend::domain::video::VideoService::new(
        user_repo.clone(),
        subscription_repo.clone(),
        video_repo.clone(),
        usage_repo.clone(),
        generation_repo,
    ));

    // 4. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let user_controller = Arc::new(vidgen_backend::controllers::user::UserController::new(
        user_service,
    ));
    let video_controller = Arc::new(vidgen_backend::controllers::video::VideoController::new(
        video_service,
    ));

    // Start HTTP server with all routes
    start_http_server(pool, config, user_repo, user_controller, video_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "vidgen_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "vidgen_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

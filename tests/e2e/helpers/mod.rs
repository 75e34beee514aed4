use anyhow::Result;
use axum::Router;
use once_cell::sync::Lazy;
use sqlx::PgPool;
use std::sync::Arc;
use testcontainers::{clients::Cli, Container};
use testcontainers_modules::postgres::Postgres;
use tokio::net::TcpListener;
use uuid::Uuid;
use wiremock::MockServer;

pub mod db_pool;
pub mod fixtures;

use api_client::TestClient;
use db_pool::{DatabasePool, PooledDatabase};
use fixtures::TestFixtures;
use vidgen_backend::infrastructure::auth::JwtManager;
use vidgen_backend::infrastructure::config::{Config, Environment, LogFormat};

// Docker client for test containers
static DOCKER: Lazy<Cli> = Lazy::new(Cli::default);

// Shared PostgreSQL container for all tests
static SHARED_CONTAINER: Lazy<SharedContainer> = Lazy::new(SharedContainer::new);

// Global database pool
static DB_POOL: Lazy<DatabasePool> = Lazy::new(|| DatabasePool::new(SHARED_CONTAINER.port));

/// Shared container that lives for the duration of all tests
struct SharedContainer {
    _container: Container<'static, Postgres>,
    port: u16,
}

impl SharedContainer {
    fn new() -> Self {
        let container = DOCKER.run(Postgres::default());
        let port = container.get_host_port_ipv4(5432);

        println!("Started shared PostgreSQL container on port {}", port);

        Self {
            _container: container,
            port,
        }
    }
}

pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub pool: PgPool,
    pub config: Config,
    pub fixtures: TestFixtures,
    /// Mocked generation provider; mount expectations before calling
    /// POST /api/generate
    pub provider: MockServer,
    _db: PooledDatabase,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        // Get a database from the shared pool
        let pooled_db = DB_POOL.get_database().await?;

        // Each test gets its own mocked provider
        let provider = MockServer::start().await;

        // Create test configuration
        let config = Config {
            database_url: pooled_db.database_url.clone(),
            host: "127.0.0.1".to_string(),
            port: 0, // Will be assigned by the OS
            jwt_secret: "test-jwt-secret-key-for-testing-only".to_string(),
            jwt_expiration_hours: 1,
            environment: Environment::Development,
            log_format: LogFormat::Pretty,
            veo_api_url: provider.uri(),
            veo_api_key: "test-veo-api-key".to_string(),
        };

        // Create app pointed at the mocked provider
        let app = create_app(config.clone(), pooled_db.pool.clone());

        // Start server
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        // Create test client and fixtures
        let client = TestClient::new(&base_url);
        let fixtures = TestFixtures::new(pooled_db.pool.clone());

        Ok(Self {
            client,
            pool: pooled_db.pool.clone(),
            config,
            fixtures,
            provider,
            _db: pooled_db,
        })
    }
}

/// Generate a valid bearer token for a test user
pub fn generate_test_jwt(user_id: &Uuid, secret: &str) -> String {
    JwtManager::new(secret.to_string(), 1)
        .generate_token(*user_id, "test@example.com")
        .expect("Failed to generate test token")
}

fn create_app(config: Config, pool: PgPool) -> Router {
    use vidgen_backend::{
        controllers::{user::UserController, video::VideoController},
        domain::{user::UserService, video::VideoService},
        infrastructure::{
            http::build_router,
            repositories::{
                SubscriptionRepository, UsageRepository, UserRepository,
                VeoGenerationRepository, VideoRepository,
            },
        },
    };

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // Instantiate repositories
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let subscription_repo = Arc::new(SubscriptionRepository::new(pool.clone()));
    let video_repo = Arc::new(VideoRepository::new(pool.clone()));
    let usage_repo = Arc::new(UsageRepository::new(pool.clone()));

    // The real HTTP client, pointed at the wiremock server
    let generation_repo = Arc::new(VeoGenerationRepository::new(
        config.veo_api_url.clone(),
        config.veo_api_key.clone(),
    ));

    // Instantiate services
    let user_service = Arc::new(UserService::new(
        user_repo.clone(),
        subscription_repo.clone(),
        usage_repo.clone(),
        video_repo.clone(),
    ));
    let video_service = Arc::new(VideoService::new(
        user_repo.clone(),
        subscription_repo.clone(),
        video_repo.clone(),
        usage_repo.clone(),
        generation_repo,
    ));

    // Instantiate controllers
    let user_controller = Arc::new(UserController::new(user_service));
    let video_controller = Arc::new(VideoController::new(video_service));

    build_router(pool, config, user_repo, user_controller, video_controller)
}

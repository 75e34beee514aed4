use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::{
    controllers::{health, user::UserController, video::VideoController},
    infrastructure::auth::{auth_middleware, request_id_middleware},
};

use crate::infrastructure::repositories::UserRepository;

/// Build the application router with all routes configured
pub fn build_router(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    user_repo: Arc<UserRepository>,
    user_controller: Arc<UserController>,
    video_controller: Arc<VideoController>,
) -> Router {
    // Generation routes (require authentication)
    let video_routes = Router::new()
        .route(
            "/api/generate",
            get(VideoController::list).post(VideoController::generate),
        )
        .with_state(video_controller.clone())
        .layer(middleware::from_fn_with_state(
            (user_repo.clone(), config.clone()),
            auth_middleware,
        ));

    // User routes (require authentication)
    let user_routes = Router::new()
        .route(
            "/api/me",
            get(UserController::get_me).put(UserController::update_me),
        )
        .with_state(user_controller.clone())
        .layer(middleware::from_fn_with_state(
            (user_repo.clone(), config.clone()),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool.clone())
        .merge(user_routes)
        .merge(video_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    user_repo: Arc<UserRepository>,
    user_controller: Arc<UserController>,
    video_controller: Arc<VideoController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(
        pool,
        config.clone(),
        user_repo,
        user_controller,
        video_controller,
    );

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

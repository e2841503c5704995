pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::Catalog;

use crate::config::Config;
use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub catalog: Arc<Catalog>,
}

/// Build the full router with protected routes behind the auth middleware
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Account routes
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/me", get(routes::user::me))
        .route("/api/me/mode", put(routes::user::update_mode))
        .route("/api/me/level", put(routes::user::update_level))
        .route("/api/dashboard", get(routes::user::dashboard))
        // Study routes
        .route("/api/study/queue", get(routes::study::queue))
        .route("/api/study/review", get(routes::study::review))
        .route("/api/study/commit", post(routes::study::commit))
        // Test routes
        .route("/api/test", get(routes::test::questions))
        .route("/api/test/score", post(routes::test::score))
        // Dictionary
        .route("/api/dictionary", get(routes::dictionary::list))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Loading word catalog...");
    let catalog =
        services::catalog::load_catalog(&config.kid_catalog_path, &config.adult_catalog_path)
            .await?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState {
        db: Arc::new(db),
        catalog: Arc::new(catalog),
    };

    let app = build_router(state);
    let addr = config.bind_addr();

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

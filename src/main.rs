use std::sync::Arc;

use hotel_api_rust::app::{app, AppState};
use hotel_api_rust::auth::BootstrapAdminResolver;
use hotel_api_rust::config;
use hotel_api_rust::database::manager::DatabaseManager;
use hotel_api_rust::database::PgAccountStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Hotel API in {:?} mode", config.environment);

    let pool = DatabaseManager::main_pool()
        .await
        .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));
    PgAccountStore::ensure_schema(&pool)
        .await
        .expect("account schema setup");
    let store = Arc::new(PgAccountStore::new(pool));

    let sentinel = BootstrapAdminResolver::from_config(&config.security)
        .expect("failed to prepare bootstrap admin credential");
    if sentinel.is_none() {
        tracing::warn!("Bootstrap admin identity is disabled (no password configured)");
    }

    let state = AppState::new(store, sentinel);
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("HOTEL_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Hotel API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

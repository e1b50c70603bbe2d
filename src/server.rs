use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, AppState},
    signals::setup_signal_handlers,
    store::SqliteStore,
};

/// Start the quote server
///
/// This function:
/// 1. Opens (and migrates) the SQLite store
/// 2. Sets up signal handlers for graceful shutdown
/// 3. Binds to the configured address
/// 4. Serves requests until a shutdown signal arrives, then closes the pool
pub async fn start_server(config: Config) -> Result<()> {
    let store = SqliteStore::connect(&config.database.path, config.database.max_connections).await?;
    let pool = store.pool().clone();

    let (shutdown_tx, signal_handle) = setup_signal_handlers();
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app = create_router(AppState::new(Arc::new(store)));

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting telequote on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    pool.close().await;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let records = Router::new()
        .route("/maps", get(handlers::maps::list_maps))
        .route("/map", post(handlers::maps::create_map))
        .route(
            "/map/:id",
            get(handlers::maps::get_map)
                .put(handlers::maps::update_map)
                .delete(handlers::maps::delete_map),
        )
        .route("/map/:id/route", get(handlers::maps::route))
        .route("/plans", get(handlers::plans::list_plans))
        .route("/plan", post(handlers::plans::create_plan))
        .route(
            "/plan/:id",
            get(handlers::plans::get_plan)
                .put(handlers::plans::update_plan)
                .delete(handlers::plans::delete_plan),
        )
        .route("/plan/:id/query", get(handlers::plans::query))
        .route("/prices", get(handlers::prices::list_prices))
        .route("/price", post(handlers::prices::create_price))
        .route(
            "/price/:id",
            get(handlers::prices::get_price)
                .put(handlers::prices::update_price)
                .delete(handlers::prices::delete_price),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(records)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_router() {
        let store = SqliteStore::in_memory().await.unwrap();
        let _app = create_router(AppState::new(Arc::new(store)));
        // Router created successfully - no panic
    }
}

use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, StorageConfig};
use service::LedgerStore;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::observability;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load both tables and build the router around them.
/// Fails if either table file holds a malformed line.
pub async fn build_app(storage: &StorageConfig) -> Result<Router, StartupError> {
    storage
        .validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    common::env::ensure_data_dir(&storage.data_dir).await?;

    let ledger = LedgerStore::open(storage.accounts_path(), storage.payments_path()).await?;
    observability::init_metrics();

    let state = AppState { ledger: Arc::clone(&ledger) };
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and serve it until the listener fails.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let app = build_app(&cfg.storage).await?;

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(%addr, data_dir = %cfg.storage.data_dir.display(), "ledger server listening");
    axum::serve(listener, app).await.map_err(anyhow::Error::from)?;
    Ok(())
}

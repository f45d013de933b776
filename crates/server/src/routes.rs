use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::get,
    Json, Router,
};
use service::LedgerStore;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::observability;
use crate::openapi::ApiDoc;

pub mod accounts;
pub mod payments;
pub mod report;

/// Shared handler state: the ledger every route reads from or writes to.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<LedgerStore>,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router.
/// Collection routes answer both with and without the trailing slash.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let ledger_routes = Router::new()
        .route("/accounts", get(accounts::list_accounts).post(accounts::create_account))
        .route("/accounts/", get(accounts::list_accounts).post(accounts::create_account))
        .route("/accounts/:id", get(accounts::get_account).delete(accounts::delete_account))
        .route("/payments", get(payments::list_payments).post(payments::create_payment))
        .route("/payments/", get(payments::list_payments).post(payments::create_payment))
        .route("/payments/:id", get(payments::get_payment))
        .route("/report", get(report::get_report));

    let ops_routes = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json));

    ledger_routes
        .merge(ops_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

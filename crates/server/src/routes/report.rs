use axum::{extract::State, Json};
use models::ReportEntry;

use crate::routes::AppState;

#[utoipa::path(
    get, path = "/report", tag = "report",
    responses((status = 200, description = "Payments with person names", body = [crate::openapi::ReportEntryDoc]))
)]
pub async fn get_report(State(state): State<AppState>) -> Json<Vec<ReportEntry>> {
    Json(state.ledger.report().await)
}

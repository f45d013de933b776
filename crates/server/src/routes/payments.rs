use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use models::{Payment, PaymentInput};
use serde::Serialize;
use tracing::info;

use crate::errors::JsonApiError;
use crate::observability::PAYMENTS_CREATED_TOTAL;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct PaymentCreated {
    pub message: &'static str,
    pub payment_id: i64,
}

#[utoipa::path(
    post, path = "/payments/", tag = "payments",
    request_body = crate::openapi::PaymentInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::PaymentCreatedDoc),
        (status = 400, description = "Malformed body", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Wrong field type", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_payment(
    State(state): State<AppState>,
    payload: Result<Json<PaymentInput>, JsonRejection>,
) -> Result<Json<PaymentCreated>, JsonApiError> {
    let Json(input) = payload?;
    let payment = state.ledger.create_payment(input).await?;
    PAYMENTS_CREATED_TOTAL.inc();
    Ok(Json(PaymentCreated { message: "Payment created successfully", payment_id: payment.id }))
}

#[utoipa::path(
    get, path = "/payments/", tag = "payments",
    responses((status = 200, description = "All payments in creation order", body = [crate::openapi::PaymentDoc]))
)]
pub async fn list_payments(State(state): State<AppState>) -> Json<Vec<Payment>> {
    let payments = state.ledger.list_payments().await;
    info!(count = payments.len(), "list payments");
    Json(payments)
}

#[utoipa::path(
    get, path = "/payments/{id}", tag = "payments",
    params(("id" = i64, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::PaymentDoc),
        (status = 404, description = "Payment not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_payment(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Payment>, JsonApiError> {
    let Path(id) = id?;
    state
        .ledger
        .get_payment(id)
        .await
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("Payment"))
}

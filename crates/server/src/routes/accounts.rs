use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use models::{Account, AccountInput};
use serde::Serialize;
use tracing::info;

use crate::errors::JsonApiError;
use crate::observability::{ACCOUNTS_CREATED_TOTAL, ACCOUNTS_DELETED_TOTAL};
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct AccountCreated {
    pub message: &'static str,
    pub account_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AccountDeleted {
    pub message: &'static str,
}

#[utoipa::path(
    post, path = "/accounts/", tag = "accounts",
    request_body = crate::openapi::AccountInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::AccountCreatedDoc),
        (status = 400, description = "Malformed body", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<AccountInput>, JsonRejection>,
) -> Result<Json<AccountCreated>, JsonApiError> {
    let Json(input) = payload?;
    let account = state.ledger.create_account(input).await?;
    ACCOUNTS_CREATED_TOTAL.inc();
    Ok(Json(AccountCreated { message: "Account created successfully", account_id: account.id }))
}

#[utoipa::path(
    get, path = "/accounts/", tag = "accounts",
    responses((status = 200, description = "All accounts in creation order", body = [crate::openapi::AccountDoc]))
)]
pub async fn list_accounts(State(state): State<AppState>) -> Json<Vec<Account>> {
    let accounts = state.ledger.list_accounts().await;
    info!(count = accounts.len(), "list accounts");
    Json(accounts)
}

#[utoipa::path(
    get, path = "/accounts/{id}", tag = "accounts",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::AccountDoc),
        (status = 404, description = "Account not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_account(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Account>, JsonApiError> {
    let Path(id) = id?;
    state
        .ledger
        .get_account(id)
        .await
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("Account"))
}

#[utoipa::path(
    delete, path = "/accounts/{id}", tag = "accounts",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Account not found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<AccountDeleted>, JsonApiError> {
    let Path(id) = id?;
    if !state.ledger.delete_account(id).await? {
        return Err(JsonApiError::not_found("Account"));
    }
    ACCOUNTS_DELETED_TOTAL.inc();
    Ok(Json(AccountDeleted { message: "Account deleted successfully" }))
}

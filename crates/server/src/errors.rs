use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

use crate::observability::STORAGE_ERRORS_TOTAL;

/// Error answered as `{"error": message}` with the given status.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn not_found(entity: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{entity} not found"))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Model(ModelError::Validation(msg)) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, msg)
            }
            other => {
                STORAGE_ERRORS_TOTAL.inc();
                error!(error = %other, "storage operation failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot load ledger: {0}")]
    Storage(#[from] ServiceError),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_unprocessable() {
        let err: JsonApiError = ServiceError::Model(ModelError::Validation("address must not contain commas or line breaks".into())).into();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.message.starts_with("address"));
    }

    #[test]
    fn io_maps_to_internal_error() {
        let err: JsonApiError = ServiceError::io("accounts.txt", std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only")).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("accounts.txt"));
    }

    #[test]
    fn exhausted_ids_map_to_internal_error() {
        let err: JsonApiError = ServiceError::IdOverflow { last: i64::MAX }.into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("id space exhausted"));
    }

    #[test]
    fn not_found_message() {
        let err = JsonApiError::not_found("Payment");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Payment not found");
    }
}

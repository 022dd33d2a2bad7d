//! Error types for mashup-api
//!
//! Maps catalog errors onto HTTP statuses with a JSON body of the form
//! `{"error": {"code": "...", "message": "..."}}`.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Payload or query failed validation (422)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Storage engine unreachable (503)
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<mashup_common::Error> for ApiError {
    fn from(err: mashup_common::Error) -> Self {
        use mashup_common::Error as CatalogError;

        match err {
            CatalogError::NotFound(msg) => ApiError::NotFound(msg),
            CatalogError::Validation(msg) => ApiError::Validation(msg),
            CatalogError::StorageUnavailable(msg) => ApiError::StorageUnavailable(msg),
            other => {
                tracing::error!("Catalog operation failed: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", msg)
            }
            ApiError::StorageUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORAGE_UNAVAILABLE",
                msg,
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg,
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    // Validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    // A verification is already running for this dashboard
    #[error("Verification already in progress")]
    Busy,

    // Verification provider errors
    #[error("Provider error: {0}")]
    ProviderError(String),

    // Generic errors
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str()),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::Busy => (StatusCode::CONFLICT, "Verification already in progress"),
            AppError::ProviderError(msg) => {
                tracing::error!("Verification provider error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Verification service error")
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<crate::provider::ProviderError> for AppError {
    fn from(err: crate::provider::ProviderError) -> Self {
        AppError::ProviderError(err.to_string())
    }
}

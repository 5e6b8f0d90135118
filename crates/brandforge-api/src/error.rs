//! API error type and the uniform `{ok:false, error}` response body.
//!
//! Every handler-level failure converts to this type; no panic or raw
//! error escapes to the transport layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

use brandforge_core::Error as CoreError;

/// Handler-level error with an HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Generation(String),
    #[error("{0}")]
    Internal(String),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(msg) => ApiError::BadRequest(msg),
            CoreError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            CoreError::NotFound(msg) => ApiError::NotFound(msg),
            CoreError::KitNotFound(_) => ApiError::NotFound("Not found".to_string()),
            CoreError::CampaignNotFound(_) => ApiError::NotFound("Campaign not found".to_string()),
            CoreError::Generation(msg) => ApiError::Generation(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            // Generation failures are upstream trouble, not client mistakes
            ApiError::Generation(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "ok": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}

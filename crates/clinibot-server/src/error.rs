use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use clinibot_core::error::{CoreError, WorkflowError};
use clinibot_llm::error::LlmError;
use clinibot_sheets::error::SheetsError;

/// Unified API error type for all route handlers.
///
/// Every variant except `Internal` carries a message meant for the user.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    /// A required field was empty or out of range.
    Validation(String),
    /// The session is in the wrong phase or gated behind registration.
    Conflict(String),
    /// A secret the action needs is not configured.
    Config(String),
    /// The provider or webhook failed.
    Upstream(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Config(msg) => {
                tracing::warn!("configuration error: {msg}");
                (StatusCode::SERVICE_UNAVAILABLE, msg)
            }
            ApiError::Upstream(msg) => {
                tracing::warn!("upstream error: {msg}");
                (StatusCode::BAD_GATEWAY, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<WorkflowError> for ApiError {
    fn from(e: WorkflowError) -> Self {
        match e {
            WorkflowError::Invalid(inner) => inner.into(),
            other => ApiError::Conflict(other.to_string()),
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingApiKey => ApiError::Config(e.to_string()),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl From<SheetsError> for ApiError {
    fn from(e: SheetsError) -> Self {
        match e {
            SheetsError::Invalid(inner) => inner.into(),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use arview::ArError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error bodies.
/// Internal causes of 5xx responses are logged, never exposed.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Idol {0} not found")]
    IdolNotFound(u32),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Pipeline failure: {0}")]
    Pipeline(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ArError> for AppError {
    fn from(err: ArError) -> Self {
        match err {
            ArError::InvalidImage(msg) => AppError::InvalidImage(msg),
            ArError::InvalidPlacement(msg) => AppError::BadRequest(msg),
            other => AppError::Pipeline(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::IdolNotFound(id) => (
                StatusCode::NOT_FOUND,
                "IDOL_NOT_FOUND",
                format!("idol {id} not found"),
            ),
            AppError::InvalidImage(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_IMAGE", msg.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Pipeline(msg) => {
                tracing::error!(error = %msg, "AR pipeline failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PIPELINE_FAILURE",
                    "an internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vidforge_core::error::CoreError;
use vidforge_db::StoreError;
use vidforge_pipeline::SubmitError;

/// Application-level error type for HTTP handlers.
///
/// Wraps domain errors from the core and pipeline crates and implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vidforge_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistent-store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A submission was rejected or its generation failed.
    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            AppError::Submit(submit) => match submit {
                SubmitError::InvalidJob(cause) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    cause.to_string(),
                ),
                // A generation failure is surfaced with its cause so the
                // caller learns why the job failed.
                SubmitError::Generation(cause) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_FAILED",
                    cause.to_string(),
                ),
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the recommendation engine itself.
///
/// Startup variants (`CatalogLoad`, `ModelLoad`, `ModelVersionMismatch`) abort
/// initialization. The rest are scoped to a single request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Incomplete profile: no skills and an all-zero RIASEC vector")]
    IncompleteProfile,

    #[error("Catalog load error at line {line}: {message}")]
    CatalogLoad { line: usize, message: String },

    #[error("Model load error: {0}")]
    ModelLoad(String),

    #[error("Model version mismatch: vocabulary implies {expected} features, model expects {actual}")]
    ModelVersionMismatch { expected: usize, actual: usize },

    #[error("Career '{0}' is not one of the model's trained classes")]
    UnscoredCareer(String),

    #[error("top_n must be at least 1, got {0}")]
    InvalidTopN(i64),

    #[error("Unknown career: {0}")]
    UnknownCareer(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl EngineError {
    pub(crate) fn catalog(line: usize, message: impl Into<String>) -> Self {
        EngineError::CatalogLoad {
            line,
            message: message.into(),
        }
    }
}

/// Failures from an external resource provider. Never fatal to a report.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned status {0}")]
    Status(u16),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Engine(e) => match e {
                EngineError::IncompleteProfile => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INCOMPLETE_PROFILE",
                    e.to_string(),
                ),
                EngineError::InvalidTopN(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_TOP_N", e.to_string())
                }
                EngineError::InvalidInput(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
                }
                EngineError::UnknownCareer(_) => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string())
                }
                other => {
                    tracing::error!("Engine error: {other}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "ENGINE_ERROR",
                        "The recommendation engine failed".to_string(),
                    )
                }
            },
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

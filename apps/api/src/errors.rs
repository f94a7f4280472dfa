use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::store::SectionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Section(#[from] SectionError),

    #[error("Export not ready: the preview has not been mounted")]
    ExportNotReady,

    #[error("Export still in progress")]
    ExportPending,

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NotReady => AppError::ExportNotReady,
            other => AppError::ExportFailed(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Section(err) => (
                StatusCode::BAD_REQUEST,
                "INDEX_OUT_OF_RANGE",
                err.to_string(),
            ),
            AppError::ExportNotReady => (
                StatusCode::CONFLICT,
                "EXPORT_NOT_READY",
                "Open the preview before exporting".to_string(),
            ),
            AppError::ExportPending => (
                StatusCode::CONFLICT,
                "EXPORT_PENDING",
                "The export has not finished yet".to_string(),
            ),
            AppError::ExportFailed(msg) => {
                tracing::error!("Export error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_FAILED",
                    "The document could not be exported".to_string(),
                )
            }
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

//! Axum route handlers for the Export API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::jobs::{ExportJobView, ExportStatus};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StartExportResponse {
    pub job_id: Uuid,
    pub session_id: Uuid,
    pub status: ExportStatus,
    pub status_url: String,
    pub download_url: String,
}

/// POST /api/v1/sessions/:id/export
///
/// Starts an export of the session's mounted preview and returns immediately.
/// Returns 409 EXPORT_NOT_READY if the preview was never mounted.
pub async fn handle_start_export(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<(StatusCode, Json<StartExportResponse>), AppError> {
    let surface = state
        .sessions
        .read(session_id, |s| s.preview_surface())
        .await?;

    let job_id = state.exports.register(session_id).await;
    let exports = state.exports.clone();
    let sink = state.sink.clone();

    let started = state.pipeline.start(surface, move |result| async move {
        if let (Ok(document), Some(sink)) = (&result, &sink) {
            if let Err(e) = sink.deliver(job_id, document).await {
                warn!(%job_id, error = %e, "Failed to deliver export to sink");
            }
        }
        exports.complete(job_id, result).await;
    });

    if let Err(e) = started {
        state.exports.discard(job_id).await;
        return Err(e.into());
    }

    info!(%session_id, %job_id, "Export started");

    Ok((
        StatusCode::ACCEPTED,
        Json(StartExportResponse {
            job_id,
            session_id,
            status: ExportStatus::Pending,
            status_url: format!("/api/v1/exports/{job_id}/status"),
            download_url: format!("/api/v1/exports/{job_id}"),
        }),
    ))
}

/// GET /api/v1/exports/:job_id/status
pub async fn handle_export_status(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ExportJobView>, AppError> {
    Ok(Json(state.exports.status(job_id).await?))
}

/// GET /api/v1/exports/:job_id
///
/// Serves the finished artifact as a `resume.pdf` download.
pub async fn handle_download_export(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = state.exports.document(job_id).await?;
    let disposition = format!("attachment; filename=\"{}\"", document.filename);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes.clone(),
    ))
}

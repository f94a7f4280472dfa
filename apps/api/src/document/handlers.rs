//! Axum route handlers for the derived document and the live preview.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::document::DocumentTree;
use crate::errors::AppError;
use crate::layout::{paginate, PagePlan, Surface};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub revision: u64,
    pub document: DocumentTree,
    pub surface: Surface,
    pub pages: PagePlan,
}

/// GET /api/v1/sessions/:id/document
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentTree>, AppError> {
    let document = state.sessions.read(id, |s| s.document()).await?;
    Ok(Json(document))
}

/// GET /api/v1/sessions/:id/preview
///
/// Mounts the preview if needed. From then on every edit re-lays out the surface,
/// and the session becomes exportable. The page plan shows where the export will break.
pub async fn handle_get_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PreviewResponse>, AppError> {
    let (revision, document, surface) = state
        .sessions
        .write(id, |s| {
            let surface = s.mount_preview();
            (s.revision(), s.document(), surface)
        })
        .await?;

    let pages = paginate(&surface, &state.geometry);

    Ok(Json(PreviewResponse {
        revision,
        document,
        surface: Surface::clone(&surface),
        pages,
    }))
}

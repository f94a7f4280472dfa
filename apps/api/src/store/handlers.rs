//! Axum route handlers for editing a resume session.

use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{EducationField, ExperienceField, Identity, IdentityField, SectionKind};
use crate::store::session::{SectionEntries, SessionSnapshot};
use crate::store::ResumeSession;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetIdentityRequest {
    pub field: IdentityField,
    pub value: String,
}

/// `field` names the entry field to replace; it is omitted for skills.
#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    pub field: Option<String>,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SectionResponse {
    pub section: SectionKind,
    pub revision: u64,
    pub entries: SectionEntries,
}

#[derive(Debug, Serialize)]
pub struct AppendResponse {
    pub section: SectionKind,
    pub index: usize,
    pub revision: u64,
    pub entries: SectionEntries,
}

// ────────────────────────────────────────────────────────────────────────────
// Sessions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let snapshot = state.sessions.create().await;
    (StatusCode::CREATED, Json(snapshot))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = state.sessions.read(id, ResumeSession::snapshot).await?;
    Ok(Json(snapshot))
}

/// DELETE /api/v1/sessions/:id
///
/// Also drops the session's export jobs and their artifacts.
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.end(id).await?;
    state.exports.discard_for_session(id).await;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Field Store
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/identity
pub async fn handle_get_identity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Identity>, AppError> {
    let identity = state.sessions.read(id, |s| s.identity().clone()).await?;
    Ok(Json(identity))
}

/// PUT /api/v1/sessions/:id/identity
pub async fn handle_set_identity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetIdentityRequest>,
) -> Result<Json<Identity>, AppError> {
    let identity = state
        .sessions
        .write(id, |s| {
            s.set_identity(req.field, req.value);
            s.identity().clone()
        })
        .await?;
    Ok(Json(identity))
}

// ────────────────────────────────────────────────────────────────────────────
// Section Stores
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/sections/:section
pub async fn handle_list_section(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, SectionKind)>,
) -> Result<Json<SectionResponse>, AppError> {
    let response = state
        .sessions
        .read(id, |s| section_response(s, section))
        .await?;
    Ok(Json(response))
}

/// POST /api/v1/sessions/:id/sections/:section
///
/// Appends a blank entry at the end of the section.
pub async fn handle_append_entry(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, SectionKind)>,
) -> Result<(StatusCode, Json<AppendResponse>), AppError> {
    let response = state
        .sessions
        .write(id, |s| {
            let index = s.append(section);
            AppendResponse {
                section,
                index,
                revision: s.revision(),
                entries: s.list(section),
            }
        })
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// PATCH /api/v1/sessions/:id/sections/:section/:index
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path((id, section, index)): Path<(Uuid, SectionKind, usize)>,
    Json(req): Json<UpdateEntryRequest>,
) -> Result<Json<SectionResponse>, AppError> {
    let response = state
        .sessions
        .write(id, |s| {
            apply_update(s, section, index, req.field.as_deref(), req.value)?;
            Ok::<_, AppError>(section_response(s, section))
        })
        .await??;
    Ok(Json(response))
}

/// DELETE /api/v1/sessions/:id/sections/:section/:index
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((id, section, index)): Path<(Uuid, SectionKind, usize)>,
) -> Result<Json<SectionResponse>, AppError> {
    let response = state
        .sessions
        .write(id, |s| {
            s.remove(section, index)?;
            Ok::<_, AppError>(section_response(s, section))
        })
        .await??;
    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn section_response(session: &ResumeSession, section: SectionKind) -> SectionResponse {
    SectionResponse {
        section,
        revision: session.revision(),
        entries: session.list(section),
    }
}

fn apply_update(
    session: &mut ResumeSession,
    section: SectionKind,
    index: usize,
    field: Option<&str>,
    value: String,
) -> Result<(), AppError> {
    match section {
        SectionKind::Experience => {
            let field: ExperienceField = parse_field(section, field)?;
            session.update_experience(index, field, value)?;
        }
        SectionKind::Education => {
            let field: EducationField = parse_field(section, field)?;
            session.update_education(index, field, value)?;
        }
        SectionKind::Skills => {
            if let Some(name) = field {
                return Err(AppError::Validation(format!(
                    "skills have no named fields (got '{name}')"
                )));
            }
            session.update_skill(index, value)?;
        }
    }
    Ok(())
}

fn parse_field<F>(section: SectionKind, field: Option<&str>) -> Result<F, AppError>
where
    F: FromStr<Err = String>,
{
    let name = field
        .ok_or_else(|| AppError::Validation(format!("field is required for {section} entries")))?;
    name.parse().map_err(AppError::Validation)
}

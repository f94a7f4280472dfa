//! A resume session: one Field Store and three Section Stores, plus the preview surface.
//!
//! All mutations go through `ResumeSession` so that each one bumps the revision and,
//! once the preview is mounted, re-lays out the surface. The Document Tree itself is
//! never stored; `document()` derives it on every read.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::document::{build_document, DocumentTree};
use crate::errors::AppError;
use crate::layout::{render_surface, PageGeometry, Surface};
use crate::models::{
    Education, EducationField, Experience, ExperienceField, Identity, IdentityField, SectionKind,
    Skill,
};
use crate::store::field_store::FieldStore;
use crate::store::section_store::{SectionError, SectionStore};

#[derive(Debug, Clone)]
pub struct ResumeSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    geometry: PageGeometry,
    identity: FieldStore,
    experience: SectionStore<Experience>,
    education: SectionStore<Education>,
    skills: SectionStore<Skill>,
    revision: u64,
    preview: Option<Arc<Surface>>,
}

/// Serializable view of a session's current state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub revision: u64,
    pub preview_mounted: bool,
    pub identity: Identity,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
}

/// Entries of one section, serialized as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionEntries {
    Experience(Vec<Experience>),
    Education(Vec<Education>),
    Skills(Vec<Skill>),
}

impl ResumeSession {
    /// A session in the state a fresh form starts in: one blank entry per section.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            experience: SectionStore::with_blank(),
            education: SectionStore::with_blank(),
            skills: SectionStore::with_blank(),
            ..Self::empty(geometry)
        }
    }

    /// A session with no entries at all.
    pub fn empty(geometry: PageGeometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            geometry,
            identity: FieldStore::new(),
            experience: SectionStore::new(),
            education: SectionStore::new(),
            skills: SectionStore::new(),
            revision: 0,
            preview: None,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ── Field Store ─────────────────────────────────────────────────────────

    pub fn identity(&self) -> &Identity {
        self.identity.get()
    }

    pub fn set_identity(&mut self, field: IdentityField, value: String) {
        self.identity.set(field, value);
        self.touch();
    }

    // ── Section Stores ──────────────────────────────────────────────────────

    pub fn experience(&self) -> Arc<[Experience]> {
        self.experience.list()
    }

    pub fn education(&self) -> Arc<[Education]> {
        self.education.list()
    }

    pub fn skills(&self) -> Arc<[Skill]> {
        self.skills.list()
    }

    pub fn list(&self, section: SectionKind) -> SectionEntries {
        match section {
            SectionKind::Experience => SectionEntries::Experience(self.experience().to_vec()),
            SectionKind::Education => SectionEntries::Education(self.education().to_vec()),
            SectionKind::Skills => SectionEntries::Skills(self.skills().to_vec()),
        }
    }

    /// Appends a blank entry to `section` and returns its index.
    pub fn append(&mut self, section: SectionKind) -> usize {
        let index = match section {
            SectionKind::Experience => self.experience.append(),
            SectionKind::Education => self.education.append(),
            SectionKind::Skills => self.skills.append(),
        };
        self.touch();
        index
    }

    pub fn update_experience(
        &mut self,
        index: usize,
        field: ExperienceField,
        value: String,
    ) -> Result<(), SectionError> {
        self.experience.update(index, field, value)?;
        self.touch();
        Ok(())
    }

    pub fn update_education(
        &mut self,
        index: usize,
        field: EducationField,
        value: String,
    ) -> Result<(), SectionError> {
        self.education.update(index, field, value)?;
        self.touch();
        Ok(())
    }

    pub fn update_skill(&mut self, index: usize, value: String) -> Result<(), SectionError> {
        self.skills.update(index, (), value)?;
        self.touch();
        Ok(())
    }

    pub fn remove(&mut self, section: SectionKind, index: usize) -> Result<(), SectionError> {
        match section {
            SectionKind::Experience => self.experience.remove(index)?,
            SectionKind::Education => self.education.remove(index)?,
            SectionKind::Skills => self.skills.remove(index)?,
        }
        self.touch();
        Ok(())
    }

    // ── Derived views ───────────────────────────────────────────────────────

    pub fn document(&self) -> DocumentTree {
        build_document(
            self.identity(),
            &self.experience(),
            &self.education(),
            &self.skills(),
        )
    }

    /// Mounts the preview (if not yet mounted) and returns the current surface.
    pub fn mount_preview(&mut self) -> Arc<Surface> {
        match &self.preview {
            Some(surface) => Arc::clone(surface),
            None => {
                let surface = Arc::new(render_surface(&self.document(), &self.geometry));
                self.preview = Some(Arc::clone(&surface));
                info!(session_id = %self.id, lines = surface.lines.len(), "preview mounted");
                surface
            }
        }
    }

    /// The mounted preview surface, or `None` if the preview was never mounted.
    pub fn preview_surface(&self) -> Option<Arc<Surface>> {
        self.preview.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            created_at: self.created_at,
            revision: self.revision,
            preview_mounted: self.preview.is_some(),
            identity: self.identity().clone(),
            experience: self.experience().to_vec(),
            education: self.education().to_vec(),
            skills: self.skills().to_vec(),
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
        if self.preview.is_some() {
            self.preview = Some(Arc::new(render_surface(&self.document(), &self.geometry)));
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Registry
// ────────────────────────────────────────────────────────────────────────────

/// Independent in-memory sessions keyed by id. Nothing is persisted.
#[derive(Clone)]
pub struct SessionRegistry {
    geometry: PageGeometry,
    sessions: Arc<RwLock<HashMap<Uuid, ResumeSession>>>,
}

impl SessionRegistry {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn create(&self) -> SessionSnapshot {
        let session = ResumeSession::new(self.geometry.clone());
        let snapshot = session.snapshot();
        self.sessions.write().await.insert(session.id, session);
        info!(session_id = %snapshot.session_id, "session created");
        snapshot
    }

    pub async fn end(&self, id: Uuid) -> Result<(), AppError> {
        if self.sessions.write().await.remove(&id).is_none() {
            return Err(session_not_found(id));
        }
        info!(session_id = %id, "session ended");
        Ok(())
    }

    pub async fn read<R>(&self, id: Uuid, f: impl FnOnce(&ResumeSession) -> R) -> Result<R, AppError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(&id).ok_or_else(|| session_not_found(id))?;
        Ok(f(session))
    }

    pub async fn write<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut ResumeSession) -> R,
    ) -> Result<R, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        Ok(f(session))
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

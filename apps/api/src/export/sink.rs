use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::export::{ExportError, ExportedDocument};

/// Destination for finished exports, in addition to the download endpoint.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn deliver(&self, job_id: Uuid, document: &ExportedDocument) -> Result<(), ExportError>;
}

// ────────────────────────────────────────────────────────────────────────────
// DirectorySink: writes <root>/<job_id>/resume.pdf
// ────────────────────────────────────────────────────────────────────────────

pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn artifact_path(&self, job_id: Uuid, document: &ExportedDocument) -> PathBuf {
        self.root.join(job_id.to_string()).join(document.filename)
    }
}

#[async_trait]
impl ArtifactSink for DirectorySink {
    async fn deliver(&self, job_id: Uuid, document: &ExportedDocument) -> Result<(), ExportError> {
        let path = self.artifact_path(job_id, document);
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&path, &document.bytes).await?;
        info!(%job_id, path = %path.display(), "Export written to disk");
        Ok(())
    }
}

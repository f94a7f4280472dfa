//! Export Pipeline: paginates the preview surface and serializes it to PDF.
//!
//! # Asynchrony
//! - `start` returns immediately and hands the finished document to a completion
//!   callback once the spawned task finishes.
//! - Pagination and PDF writing are CPU-bound and run inside `tokio::task::spawn_blocking`.
//!
//! The pipeline works on an owned `Arc<Surface>` snapshot, so edits made after an
//! export starts do not affect it. There is no cancellation and no timeout.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::export::pdf::render_pdf;
use crate::layout::{paginate, PageGeometry, PagePlan, Surface};

/// Fixed filename of the exported artifact.
pub const ARTIFACT_FILENAME: &str = "resume.pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    /// The preview surface was never mounted, so there is nothing to export.
    #[error("preview surface is not mounted")]
    NotReady,

    #[error("export task failed: {0}")]
    Task(String),

    #[error("failed to store artifact: {0}")]
    Io(#[from] std::io::Error),
}

/// A finished export.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: &'static str,
    pub bytes: Bytes,
    pub plan: PagePlan,
    pub generated_at: DateTime<Utc>,
}

impl ExportedDocument {
    pub fn page_count(&self) -> usize {
        self.plan.page_count()
    }
}

#[derive(Debug, Clone)]
pub struct ExportPipeline {
    geometry: PageGeometry,
}

impl ExportPipeline {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    /// Starts an export in the background and returns immediately.
    ///
    /// Fails with `NotReady` without spawning anything if `surface` is `None`.
    /// Otherwise `on_complete` receives the result once the task finishes.
    pub fn start<F, Fut>(
        &self,
        surface: Option<Arc<Surface>>,
        on_complete: F,
    ) -> Result<JoinHandle<()>, ExportError>
    where
        F: FnOnce(Result<ExportedDocument, ExportError>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let surface = surface.ok_or_else(|| {
            warn!("Export requested before the preview was mounted");
            ExportError::NotReady
        })?;
        let pipeline = self.clone();

        Ok(tokio::spawn(async move {
            let result = pipeline.export_surface(surface).await;
            on_complete(result).await;
        }))
    }

    async fn export_surface(&self, surface: Arc<Surface>) -> Result<ExportedDocument, ExportError> {
        let geometry = self.geometry.clone();
        let document = tokio::task::spawn_blocking(move || export_sync(&surface, &geometry))
            .await
            .map_err(|e| ExportError::Task(format!("spawn_blocking failed in export: {e}")))?;

        info!(
            pages = document.page_count(),
            bytes = document.bytes.len(),
            "Export completed"
        );
        Ok(document)
    }
}

/// Paginates and serializes a surface on the current thread.
pub fn export_sync(surface: &Surface, geometry: &PageGeometry) -> ExportedDocument {
    let plan = paginate(surface, geometry);
    let generated_at = Utc::now();
    let bytes = render_pdf(surface, &plan, geometry, generated_at);

    ExportedDocument {
        filename: ARTIFACT_FILENAME,
        bytes: Bytes::from(bytes),
        plan,
        generated_at,
    }
}

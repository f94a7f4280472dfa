use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{ExportError, ExportedDocument};

/// Finished jobs kept per registry. Past this, the oldest finished jobs are evicted.
pub const MAX_FINISHED_JOBS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone)]
pub struct ExportJob {
    pub id: Uuid,
    pub session_id: Uuid,
    pub status: ExportStatus,
    pub document: Option<Arc<ExportedDocument>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Completion order within the registry; `None` while pending.
    finished_seq: Option<u64>,
}

/// Status payload returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ExportJobView {
    pub job_id: Uuid,
    pub session_id: Uuid,
    pub status: ExportStatus,
    pub filename: Option<&'static str>,
    pub page_count: Option<usize>,
    pub size_bytes: Option<usize>,
    pub generated_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ExportJob> for ExportJobView {
    fn from(job: &ExportJob) -> Self {
        ExportJobView {
            job_id: job.id,
            session_id: job.session_id,
            status: job.status,
            filename: job.document.as_ref().map(|d| d.filename),
            page_count: job.document.as_ref().map(|d| d.page_count()),
            size_bytes: job.document.as_ref().map(|d| d.bytes.len()),
            generated_at: job.document.as_ref().map(|d| d.generated_at),
            error_message: job.error_message.clone(),
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// In-memory record of export jobs and their finished artifacts.
#[derive(Clone, Default)]
pub struct ExportJobRegistry {
    jobs: Arc<RwLock<HashMap<Uuid, ExportJob>>>,
    finished: Arc<AtomicU64>,
}

impl ExportJobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new pending job for `session_id` and returns its id.
    pub async fn register(&self, session_id: Uuid) -> Uuid {
        let now = Utc::now();
        let job = ExportJob {
            id: Uuid::new_v4(),
            session_id,
            status: ExportStatus::Pending,
            document: None,
            error_message: None,
            created_at: now,
            updated_at: now,
            finished_seq: None,
        };
        let id = job.id;
        self.jobs.write().await.insert(id, job);
        id
    }

    /// Drops a job that never started.
    pub async fn discard(&self, job_id: Uuid) {
        self.jobs.write().await.remove(&job_id);
    }

    /// Drops every job belonging to `session_id`, finished or not. Returns how many were removed.
    pub async fn discard_for_session(&self, session_id: Uuid) -> usize {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, job| job.session_id != session_id);
        let removed = before - jobs.len();
        if removed > 0 {
            info!(%session_id, removed, "Export jobs discarded with session");
        }
        removed
    }

    /// Stores the outcome of a finished export.
    ///
    /// A job discarded while its export was running is not recreated; the result is dropped.
    pub async fn complete(&self, job_id: Uuid, result: Result<ExportedDocument, ExportError>) {
        let mut jobs = self.jobs.write().await;
        let Some(job) = jobs.get_mut(&job_id) else {
            warn!(%job_id, "Completion for unknown export job, dropping result");
            return;
        };

        job.updated_at = Utc::now();
        job.finished_seq = Some(self.finished.fetch_add(1, Ordering::Relaxed));
        match result {
            Ok(document) => {
                info!(%job_id, pages = document.page_count(), "Export job completed");
                job.status = ExportStatus::Completed;
                job.document = Some(Arc::new(document));
            }
            Err(e) => {
                warn!(%job_id, error = %e, "Export job failed");
                job.status = ExportStatus::Failed;
                job.error_message = Some(e.to_string());
            }
        }
        evict_finished(&mut jobs);
    }

    pub async fn status(&self, job_id: Uuid) -> Result<ExportJobView, AppError> {
        let jobs = self.jobs.read().await;
        let job = jobs.get(&job_id).ok_or_else(|| job_not_found(job_id))?;
        Ok(ExportJobView::from(job))
    }

    /// Returns the finished artifact, or the reason it is not available.
    pub async fn document(&self, job_id: Uuid) -> Result<Arc<ExportedDocument>, AppError> {
        let jobs = self.jobs.read().await;
        let job = jobs.get(&job_id).ok_or_else(|| job_not_found(job_id))?;
        match job.status {
            ExportStatus::Pending => Err(AppError::ExportPending),
            ExportStatus::Failed => Err(AppError::ExportFailed(
                job.error_message.clone().unwrap_or_default(),
            )),
            ExportStatus::Completed => job
                .document
                .clone()
                .ok_or_else(|| AppError::ExportFailed(format!("Export {job_id} has no artifact"))),
        }
    }
}

/// Removes the oldest finished jobs until at most `MAX_FINISHED_JOBS` remain.
/// Pending jobs are never evicted.
fn evict_finished(jobs: &mut HashMap<Uuid, ExportJob>) {
    let mut finished: Vec<(u64, Uuid)> = jobs
        .values()
        .filter_map(|job| job.finished_seq.map(|seq| (seq, job.id)))
        .collect();
    if finished.len() <= MAX_FINISHED_JOBS {
        return;
    }

    finished.sort();
    let excess = finished.len() - MAX_FINISHED_JOBS;
    for (_, id) in finished.into_iter().take(excess) {
        jobs.remove(&id);
    }
    debug!(evicted = excess, "Evicted finished export jobs");
}

fn job_not_found(job_id: Uuid) -> AppError {
    AppError::NotFound(format!("Export {job_id} not found"))
}

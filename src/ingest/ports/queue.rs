//! Queue port for durable ingestion jobs.

use crate::ingest::domain::{Job, JobDomainError, JobId, JobStatus, ParsedActivity};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for job queue operations.
pub type JobQueueResult<T> = Result<T, JobQueueError>;

/// Durable job queue contract.
///
/// The queue is the only resource mutated by more than one actor
/// concurrently; the claim operation carries the exclusivity burden.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Inserts a new pending job wrapping the raw text.
    ///
    /// # Errors
    ///
    /// Returns [`JobQueueError::EmptyRawText`] when the text is blank.
    async fn enqueue(&self, raw_text: &str) -> JobQueueResult<JobId>;

    /// Atomically claims the oldest pending job, marking it processing and
    /// stamping `processed_at`.
    ///
    /// Returns `None` when no pending job exists. Two concurrent callers
    /// never receive the same job, and a caller never blocks waiting on a
    /// job another caller is evaluating (lock-skipping, not lock-waiting).
    async fn claim_next(&self) -> JobQueueResult<Option<Job>>;

    /// Finishes a job with a structured result.
    ///
    /// # Errors
    ///
    /// Returns [`JobQueueError::NotFound`] for an unknown job and
    /// [`JobQueueError::AlreadyTerminal`] when the job already finished.
    async fn complete(&self, id: JobId, result: &ParsedActivity) -> JobQueueResult<()>;

    /// Finishes a job with an error message.
    ///
    /// # Errors
    ///
    /// Returns [`JobQueueError::NotFound`] for an unknown job and
    /// [`JobQueueError::AlreadyTerminal`] when the job already finished.
    async fn fail(&self, id: JobId, error_message: &str) -> JobQueueResult<()>;

    /// Returns the most recent jobs, newest first. Read-only.
    async fn recent(&self, limit: i64) -> JobQueueResult<Vec<Job>>;
}

/// Errors returned by job queue implementations.
#[derive(Debug, Clone, Error)]
pub enum JobQueueError {
    /// The raw text is empty after trimming.
    #[error("job raw text must not be empty")]
    EmptyRawText,

    /// The job was not found.
    #[error("job not found: {0}")]
    NotFound(JobId),

    /// A terminal job was asked to change status again.
    #[error("job {id} is already terminal with status {status}")]
    AlreadyTerminal {
        /// Job that refused the write.
        id: JobId,
        /// Terminal status the job is in.
        status: JobStatus,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl JobQueueError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<JobDomainError> for JobQueueError {
    fn from(err: JobDomainError) -> Self {
        match err {
            JobDomainError::EmptyRawText => Self::EmptyRawText,
            JobDomainError::AlreadyTerminal { id, status } => Self::AlreadyTerminal { id, status },
        }
    }
}

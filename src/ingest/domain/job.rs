//! Ingestion job aggregate and status lifecycle.

use super::{JobDomainError, ParseJobStatusError, ParsedActivity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an ingestion job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(i64);

impl JobId {
    /// Creates a job identifier from a store-allocated value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the wrapped numeric value.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Waiting to be claimed.
    Pending,
    /// Claimed by exactly one worker.
    Processing,
    /// Finished with a structured result.
    Completed,
    /// Finished with an error message.
    Failed,
}

impl JobStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Returns whether the status admits no further writes.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl TryFrom<&str> for JobStatus {
    type Error = ParseJobStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseJobStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of asynchronous ingestion work.
///
/// Once a job leaves `pending`/`processing`, exactly one of the result
/// payload and the error message is set; the mutators below maintain that
/// invariant and refuse writes to terminal jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    raw_text: String,
    status: JobStatus,
    result_data: Option<ParsedActivity>,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedJobData {
    /// Persisted job identifier.
    pub id: JobId,
    /// Persisted raw input text.
    pub raw_text: String,
    /// Persisted lifecycle status.
    pub status: JobStatus,
    /// Persisted result payload, if completed.
    pub result_data: Option<ParsedActivity>,
    /// Persisted error message, if failed.
    pub error_message: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted claim timestamp, if claimed.
    pub processed_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Creates a pending job from caller-supplied raw text.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::EmptyRawText`] when the text is blank.
    pub fn pending(
        id: JobId,
        raw_text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, JobDomainError> {
        let text = raw_text.into();
        validate_raw_text(&text)?;
        Ok(Self {
            id,
            raw_text: text,
            status: JobStatus::Pending,
            result_data: None,
            error_message: None,
            created_at,
            processed_at: None,
        })
    }

    /// Reconstructs a job from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedJobData) -> Self {
        Self {
            id: data.id,
            raw_text: data.raw_text,
            status: data.status,
            result_data: data.result_data,
            error_message: data.error_message,
            created_at: data.created_at,
            processed_at: data.processed_at,
        }
    }

    /// Returns the job identifier.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Returns the immutable raw input text.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns the result payload, present only when completed.
    #[must_use]
    pub const fn result_data(&self) -> Option<&ParsedActivity> {
        self.result_data.as_ref()
    }

    /// Returns the error message, present only when failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the claim timestamp, if the job has been claimed.
    #[must_use]
    pub const fn processed_at(&self) -> Option<DateTime<Utc>> {
        self.processed_at
    }

    /// Marks the job as claimed, stamping `processed_at`.
    ///
    /// The queue guarantees at most one caller reaches this per job.
    pub fn begin_processing(&mut self, at: DateTime<Utc>) {
        self.status = JobStatus::Processing;
        if self.processed_at.is_none() {
            self.processed_at = Some(at);
        }
    }

    /// Finishes the job with a structured result.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::AlreadyTerminal`] when the job already
    /// finished; terminal outcomes are written exactly once.
    pub fn complete(
        &mut self,
        result: ParsedActivity,
        at: DateTime<Utc>,
    ) -> Result<(), JobDomainError> {
        self.check_not_terminal()?;
        self.status = JobStatus::Completed;
        self.result_data = Some(result);
        self.error_message = None;
        if self.processed_at.is_none() {
            self.processed_at = Some(at);
        }
        Ok(())
    }

    /// Finishes the job with an error message.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::AlreadyTerminal`] when the job already
    /// finished.
    pub fn fail(
        &mut self,
        error_message: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), JobDomainError> {
        self.check_not_terminal()?;
        self.status = JobStatus::Failed;
        self.error_message = Some(error_message.into());
        self.result_data = None;
        if self.processed_at.is_none() {
            self.processed_at = Some(at);
        }
        Ok(())
    }

    const fn check_not_terminal(&self) -> Result<(), JobDomainError> {
        if self.status.is_terminal() {
            return Err(JobDomainError::AlreadyTerminal {
                id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }
}

/// Validates caller-supplied raw text before a job is created.
///
/// # Errors
///
/// Returns [`JobDomainError::EmptyRawText`] when the text is blank.
pub fn validate_raw_text(raw_text: &str) -> Result<(), JobDomainError> {
    if raw_text.trim().is_empty() {
        return Err(JobDomainError::EmptyRawText);
    }
    Ok(())
}

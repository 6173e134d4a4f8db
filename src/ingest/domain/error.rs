//! Error types for ingestion domain validation and parsing.

use super::{JobId, JobStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain job values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobDomainError {
    /// The raw text is empty after trimming.
    #[error("job raw text must not be empty")]
    EmptyRawText,

    /// A terminal job was asked to change status again.
    #[error("job {id} is already terminal with status {status}")]
    AlreadyTerminal {
        /// Job that refused the write.
        id: JobId,
        /// Terminal status the job is in.
        status: JobStatus,
    },
}

/// Error returned while parsing job statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown job status: {0}")]
pub struct ParseJobStatusError(pub String);

/// Failure to derive a structured payload from raw text.
///
/// The worker converts every variant into a terminal failed job; parse
/// errors never propagate past the polling loop.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The collaborator produced no usable company name.
    #[error("parsed payload lacks a usable company name")]
    MissingCompanyName,

    /// The collaborator's output was not in the expected shape.
    #[error("malformed parser payload: {0}")]
    Malformed(String),

    /// The collaborator itself failed.
    #[error("parser collaborator failed: {0}")]
    Collaborator(String),
}

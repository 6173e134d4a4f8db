//! Error types for pipeline domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain deal values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DealDomainError {
    /// The deal name is empty after trimming.
    #[error("deal name must not be empty")]
    EmptyDealName,

    /// The priority value is not one of low, medium, or high.
    #[error("unknown priority: {0}")]
    InvalidPriority(String),
}

/// Error returned while parsing stage codes from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown deal stage: {0}")]
pub struct ParseStageError(pub String);

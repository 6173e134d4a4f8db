//! Error types for CRM domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain CRM values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CrmDomainError {
    /// The client identifier is empty after trimming.
    #[error("client identifier must not be empty")]
    EmptyClientId,

    /// The company name is empty after trimming.
    #[error("company name must not be empty")]
    EmptyCompanyName,

    /// The activity content is empty after trimming.
    #[error("activity content must not be empty")]
    EmptyActivityContent,
}

/// Error returned while parsing action types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown action type: {0}")]
pub struct ParseActionTypeError(pub String);

/// Error returned while parsing activity sources from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown activity source: {0}")]
pub struct ParseActivitySourceError(pub String);

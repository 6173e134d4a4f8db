//! Identifier and validated scalar types for the CRM domain.

use super::CrmDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable client identifier.
///
/// Directory-allocated identifiers follow the sequential `CLI-nnn` form;
/// identifiers imported from elsewhere are accepted as long as they are
/// non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Prefix used by directory-allocated identifiers.
    const SEQUENTIAL_PREFIX: &'static str = "CLI-";

    /// Creates a validated client identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CrmDomainError::EmptyClientId`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, CrmDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CrmDomainError::EmptyClientId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Creates the nth sequential identifier (`CLI-001`, `CLI-002`, ...).
    #[must_use]
    pub fn sequential(n: u32) -> Self {
        Self(format!("{}{n:03}", Self::SEQUENTIAL_PREFIX))
    }

    /// Returns the numeric suffix of a sequential identifier.
    ///
    /// Identifiers outside the `CLI-nnn` form yield `None` and do not
    /// participate in sequence allocation.
    #[must_use]
    pub fn sequence_number(&self) -> Option<u32> {
        self.0
            .strip_prefix(Self::SEQUENTIAL_PREFIX)
            .and_then(|suffix| suffix.parse().ok())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated, non-blank company name.
///
/// The ingestion path matches companies by exact name, so surrounding
/// whitespace is trimmed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyName(String);

impl CompanyName {
    /// Creates a validated company name.
    ///
    /// # Errors
    ///
    /// Returns [`CrmDomainError::EmptyCompanyName`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, CrmDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CrmDomainError::EmptyCompanyName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CompanyName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CompanyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for an activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(i64);

impl ActivityId {
    /// Creates an activity identifier from a store-allocated value.
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

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Identifier and validated scalar types for the pipeline domain.

use super::DealDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a deal record.
///
/// Deal identifiers are allocated by the store (`BIGSERIAL` in the
/// `PostgreSQL` adapter, a counter in the in-memory adapter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealId(i64);

impl DealId {
    /// Creates a deal identifier from a store-allocated value.
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

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated, non-blank deal name.
///
/// Names are matched exactly (scoped to a client) by the find-or-create
/// path, so surrounding whitespace is trimmed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealName(String);

impl DealName {
    /// Creates a validated deal name.
    ///
    /// # Errors
    ///
    /// Returns [`DealDomainError::EmptyDealName`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, DealDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DealDomainError::EmptyDealName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DealName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DealName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

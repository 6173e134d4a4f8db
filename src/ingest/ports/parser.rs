//! Port for the external text-parsing collaborator.

use crate::ingest::domain::{ParseError, ParsedActivity};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Opaque text → structured-fields transducer.
///
/// Implementations own their transport and timeout policy; the worker
/// only requires that failures surface as [`ParseError`] so they can be
/// recorded on the job.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ActivityParser: Send + Sync {
    /// Derives a structured payload from one free-form note.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when no well-formed payload with a usable
    /// company name can be produced.
    async fn parse(&self, raw_text: &str) -> Result<ParsedActivity, ParseError>;
}

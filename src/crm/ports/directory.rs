//! Directory port for client persistence and idempotent company lookup.

use crate::crm::domain::{Client, ClientId, CompanyName};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for client directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Client directory contract.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Returns the client with this exact company name, creating it with
    /// the next sequential identifier if absent.
    ///
    /// Concurrent callers racing on one name must resolve to a single
    /// stored client; the name is the idempotency key.
    async fn find_or_create(
        &self,
        company_name: &CompanyName,
        requested_at: DateTime<Utc>,
    ) -> DirectoryResult<Client>;

    /// Finds a client by identifier.
    ///
    /// Returns `None` when the client does not exist.
    async fn find_by_id(&self, id: &ClientId) -> DirectoryResult<Option<Client>>;

    /// Finds a client by exact company name.
    ///
    /// Returns `None` when no client has the name.
    async fn find_by_name(&self, company_name: &CompanyName) -> DirectoryResult<Option<Client>>;
}

/// Errors returned by client directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The directory could not allocate a fresh sequential identifier.
    #[error("identifier allocation exhausted retries for '{0}'")]
    AllocationContention(CompanyName),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

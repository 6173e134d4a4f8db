//! Repository ports for deal and qualification persistence.

use crate::crm::domain::ClientId;
use crate::pipeline::domain::{Deal, DealId, DealName, NewDeal, QualificationRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for deal repository operations.
pub type DealRepositoryResult<T> = Result<T, DealRepositoryError>;

/// Deal persistence contract.
#[async_trait]
pub trait DealRepository: Send + Sync {
    /// Stores a new deal and returns it with its allocated identity.
    ///
    /// # Errors
    ///
    /// Returns [`DealRepositoryError::DuplicateName`] when the client
    /// already has a deal with the same name.
    async fn create(&self, new_deal: NewDeal) -> DealRepositoryResult<Deal>;

    /// Finds a deal by identifier.
    ///
    /// Returns `None` when the deal does not exist.
    async fn find_by_id(&self, id: DealId) -> DealRepositoryResult<Option<Deal>>;

    /// Finds a deal by exact name within a client.
    ///
    /// Returns `None` when no such deal exists.
    async fn find_by_name(
        &self,
        client_id: &ClientId,
        name: &DealName,
    ) -> DealRepositoryResult<Option<Deal>>;

    /// Returns the client's deal with the payload's name, creating it from
    /// the payload if absent.
    ///
    /// The lookup is an exact name match scoped to the client. Creation
    /// materializes the deal at the payload's stage without consulting
    /// gates or adjacency. Concurrent callers racing on one name must
    /// resolve to a single stored deal.
    async fn find_or_create(&self, new_deal: NewDeal) -> DealRepositoryResult<Deal>;

    /// Persists changes to an existing deal (stage, timestamps, owner).
    ///
    /// # Errors
    ///
    /// Returns [`DealRepositoryError::NotFound`] when the deal does not
    /// exist.
    async fn update(&self, deal: &Deal) -> DealRepositoryResult<()>;
}

/// Errors returned by deal repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DealRepositoryError {
    /// The deal was not found.
    #[error("deal not found: {0}")]
    NotFound(DealId),

    /// The client already has a deal with this name.
    #[error("client {client_id} already has a deal named '{name}'")]
    DuplicateName {
        /// Owning client.
        client_id: ClientId,
        /// Conflicting deal name.
        name: DealName,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DealRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for qualification repository operations.
pub type QualificationRepositoryResult<T> = Result<T, QualificationRepositoryError>;

/// Qualification sheet persistence contract.
#[async_trait]
pub trait QualificationRepository: Send + Sync {
    /// Finds the qualification record for a deal.
    ///
    /// Returns `None` when the deal has no record yet; gate evaluation
    /// treats that as every required field missing.
    async fn find_by_deal(
        &self,
        deal_id: DealId,
    ) -> QualificationRepositoryResult<Option<QualificationRecord>>;

    /// Inserts or fully replaces the record for its deal.
    async fn upsert(&self, record: &QualificationRecord) -> QualificationRepositoryResult<()>;
}

/// Errors returned by qualification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum QualificationRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl QualificationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

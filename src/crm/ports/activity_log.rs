//! Activity log port for derived bookkeeping entries.

use crate::crm::domain::{Activity, ClientId, NewActivity};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for activity log operations.
pub type ActivityLogResult<T> = Result<T, ActivityLogError>;

/// Activity log contract.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Stores a new entry and returns it with its allocated identity.
    async fn record(&self, new_activity: NewActivity) -> ActivityLogResult<Activity>;

    /// Returns a client's entries, newest first.
    async fn for_client(
        &self,
        client_id: &ClientId,
        limit: i64,
    ) -> ActivityLogResult<Vec<Activity>>;
}

/// Errors returned by activity log implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivityLogError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivityLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

//! In-memory qualification repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::pipeline::{
    domain::{DealId, QualificationRecord},
    ports::{QualificationRepository, QualificationRepositoryError, QualificationRepositoryResult},
};

/// Thread-safe in-memory qualification repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQualificationRepository {
    records: Arc<RwLock<HashMap<DealId, QualificationRecord>>>,
}

impl InMemoryQualificationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QualificationRepository for InMemoryQualificationRepository {
    async fn find_by_deal(
        &self,
        deal_id: DealId,
    ) -> QualificationRepositoryResult<Option<QualificationRecord>> {
        let records = self.records.read().map_err(|err| {
            QualificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(records.get(&deal_id).cloned())
    }

    async fn upsert(&self, record: &QualificationRecord) -> QualificationRepositoryResult<()> {
        let mut records = self.records.write().map_err(|err| {
            QualificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        records.insert(record.deal_id(), record.clone());
        Ok(())
    }
}

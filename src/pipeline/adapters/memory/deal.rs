//! In-memory deal repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::crm::domain::ClientId;
use crate::pipeline::{
    domain::{Deal, DealId, DealName, NewDeal},
    ports::{DealRepository, DealRepositoryError, DealRepositoryResult},
};

/// Thread-safe in-memory deal repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDealRepository {
    state: Arc<RwLock<InMemoryDealState>>,
}

#[derive(Debug, Default)]
struct InMemoryDealState {
    deals: HashMap<DealId, Deal>,
    name_index: HashMap<(ClientId, String), DealId>,
    next_id: i64,
}

impl InMemoryDealState {
    fn allocate_id(&mut self) -> DealId {
        self.next_id += 1;
        DealId::new(self.next_id)
    }

    fn insert_new(&mut self, new_deal: NewDeal) -> Deal {
        let id = self.allocate_id();
        let key = (new_deal.client_id.clone(), new_deal.name.as_str().to_owned());
        let deal = Deal::from_new(id, new_deal);
        self.name_index.insert(key, id);
        self.deals.insert(id, deal.clone());
        deal
    }
}

impl InMemoryDealRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DealRepository for InMemoryDealRepository {
    async fn create(&self, new_deal: NewDeal) -> DealRepositoryResult<Deal> {
        let mut state = self.state.write().map_err(|err| {
            DealRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let key = (new_deal.client_id.clone(), new_deal.name.as_str().to_owned());
        if state.name_index.contains_key(&key) {
            return Err(DealRepositoryError::DuplicateName {
                client_id: new_deal.client_id,
                name: new_deal.name,
            });
        }
        Ok(state.insert_new(new_deal))
    }

    async fn find_by_id(&self, id: DealId) -> DealRepositoryResult<Option<Deal>> {
        let state = self.state.read().map_err(|err| {
            DealRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.deals.get(&id).cloned())
    }

    async fn find_by_name(
        &self,
        client_id: &ClientId,
        name: &DealName,
    ) -> DealRepositoryResult<Option<Deal>> {
        let state = self.state.read().map_err(|err| {
            DealRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let key = (client_id.clone(), name.as_str().to_owned());
        Ok(state
            .name_index
            .get(&key)
            .and_then(|id| state.deals.get(id))
            .cloned())
    }

    async fn find_or_create(&self, new_deal: NewDeal) -> DealRepositoryResult<Deal> {
        // Lookup and insert happen under one write lock so concurrent
        // callers racing on the same name resolve to a single deal.
        let mut state = self.state.write().map_err(|err| {
            DealRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let key = (new_deal.client_id.clone(), new_deal.name.as_str().to_owned());
        if let Some(existing) = state.name_index.get(&key).and_then(|id| state.deals.get(id)) {
            return Ok(existing.clone());
        }
        Ok(state.insert_new(new_deal))
    }

    async fn update(&self, deal: &Deal) -> DealRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            DealRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.deals.contains_key(&deal.id()) {
            return Err(DealRepositoryError::NotFound(deal.id()));
        }
        state.deals.insert(deal.id(), deal.clone());
        Ok(())
    }
}

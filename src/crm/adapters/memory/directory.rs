//! In-memory client directory for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::crm::{
    domain::{Client, ClientId, CompanyName},
    ports::{ClientDirectory, DirectoryError, DirectoryResult},
};

/// Thread-safe in-memory client directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    clients: HashMap<ClientId, Client>,
    name_index: HashMap<String, ClientId>,
}

impl InMemoryDirectoryState {
    /// Next sequential identifier: one past the highest allocated suffix,
    /// mirroring the directory's `CLI-nnn` scheme.
    fn next_sequential_id(&self) -> ClientId {
        let max = self
            .clients
            .keys()
            .filter_map(ClientId::sequence_number)
            .max()
            .unwrap_or(0);
        ClientId::sequential(max + 1)
    }
}

impl InMemoryClientDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientDirectory for InMemoryClientDirectory {
    async fn find_or_create(
        &self,
        company_name: &CompanyName,
        requested_at: DateTime<Utc>,
    ) -> DirectoryResult<Client> {
        // Lookup, allocation, and insert share one write lock so racing
        // callers agree on a single client per name.
        let mut state = self.state.write().map_err(|err| {
            DirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if let Some(existing) = state
            .name_index
            .get(company_name.as_str())
            .and_then(|id| state.clients.get(id))
        {
            return Ok(existing.clone());
        }

        let id = state.next_sequential_id();
        let client = Client::new(id.clone(), company_name.clone(), requested_at);
        state
            .name_index
            .insert(company_name.as_str().to_owned(), id.clone());
        state.clients.insert(id, client.clone());
        Ok(client)
    }

    async fn find_by_id(&self, id: &ClientId) -> DirectoryResult<Option<Client>> {
        let state = self.state.read().map_err(|err| {
            DirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.clients.get(id).cloned())
    }

    async fn find_by_name(&self, company_name: &CompanyName) -> DirectoryResult<Option<Client>> {
        let state = self.state.read().map_err(|err| {
            DirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .name_index
            .get(company_name.as_str())
            .and_then(|id| state.clients.get(id))
            .cloned())
    }
}

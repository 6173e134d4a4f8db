//! In-memory activity log for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::crm::{
    domain::{Activity, ActivityId, ClientId, NewActivity},
    ports::{ActivityLog, ActivityLogError, ActivityLogResult},
};

/// Thread-safe in-memory activity log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityLog {
    state: Arc<RwLock<InMemoryActivityState>>,
}

#[derive(Debug, Default)]
struct InMemoryActivityState {
    entries: Vec<Activity>,
    next_id: i64,
}

impl InMemoryActivityLog {
    /// Creates an empty in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityLog for InMemoryActivityLog {
    async fn record(&self, new_activity: NewActivity) -> ActivityLogResult<Activity> {
        let mut state = self.state.write().map_err(|err| {
            ActivityLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.next_id += 1;
        let entry = Activity::from_new(ActivityId::new(state.next_id), new_activity);
        state.entries.push(entry.clone());
        Ok(entry)
    }

    async fn for_client(
        &self,
        client_id: &ClientId,
        limit: i64,
    ) -> ActivityLogResult<Vec<Activity>> {
        let state = self.state.read().map_err(|err| {
            ActivityLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let capped = usize::try_from(limit.max(0)).map_err(ActivityLogError::persistence)?;
        Ok(state
            .entries
            .iter()
            .rev()
            .filter(|entry| entry.client_id() == client_id)
            .take(capped)
            .cloned()
            .collect())
    }
}

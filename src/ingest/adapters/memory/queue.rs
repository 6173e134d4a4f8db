//! In-memory job queue for tests.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::ingest::{
    domain::{Job, JobId, JobStatus, ParsedActivity, validate_raw_text},
    ports::{JobQueue, JobQueueError, JobQueueResult},
};

/// Thread-safe in-memory job queue.
///
/// The claim path holds one short critical section over the whole
/// read-and-mark step, which gives the same exclusivity guarantee the
/// `PostgreSQL` adapter gets from skip-locked row acquisition.
#[derive(Debug, Clone)]
pub struct InMemoryJobQueue<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<Mutex<InMemoryQueueState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryQueueState {
    /// Jobs keyed by identifier; allocation order equals creation order.
    jobs: BTreeMap<JobId, Job>,
    next_id: i64,
}

impl<C> InMemoryJobQueue<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty in-memory queue over the given clock.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryQueueState::default())),
            clock,
        }
    }
}

#[async_trait]
impl<C> JobQueue for InMemoryJobQueue<C>
where
    C: Clock + Send + Sync,
{
    async fn enqueue(&self, raw_text: &str) -> JobQueueResult<JobId> {
        validate_raw_text(raw_text)?;
        let created_at = self.clock.utc();
        let mut state = self.state.lock().map_err(|err| {
            JobQueueError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.next_id += 1;
        let id = JobId::new(state.next_id);
        let job = Job::pending(id, raw_text, created_at)?;
        state.jobs.insert(id, job);
        Ok(id)
    }

    async fn claim_next(&self) -> JobQueueResult<Option<Job>> {
        let claimed_at = self.clock.utc();
        let mut state = self.state.lock().map_err(|err| {
            JobQueueError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let Some(job) = state
            .jobs
            .values_mut()
            .find(|job| job.status() == JobStatus::Pending)
        else {
            return Ok(None);
        };
        job.begin_processing(claimed_at);
        Ok(Some(job.clone()))
    }

    async fn complete(&self, id: JobId, result: &ParsedActivity) -> JobQueueResult<()> {
        let finished_at = self.clock.utc();
        let mut state = self.state.lock().map_err(|err| {
            JobQueueError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let job = state
            .jobs
            .get_mut(&id)
            .ok_or(JobQueueError::NotFound(id))?;
        job.complete(result.clone(), finished_at)?;
        Ok(())
    }

    async fn fail(&self, id: JobId, error_message: &str) -> JobQueueResult<()> {
        let finished_at = self.clock.utc();
        let mut state = self.state.lock().map_err(|err| {
            JobQueueError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let job = state
            .jobs
            .get_mut(&id)
            .ok_or(JobQueueError::NotFound(id))?;
        job.fail(error_message, finished_at)?;
        Ok(())
    }

    async fn recent(&self, limit: i64) -> JobQueueResult<Vec<Job>> {
        let state = self.state.lock().map_err(|err| {
            JobQueueError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let capped = usize::try_from(limit.max(0)).map_err(JobQueueError::persistence)?;
        Ok(state.jobs.values().rev().take(capped).cloned().collect())
    }
}

//! Polling worker that drains the ingestion queue.

use crate::crm::{
    domain::{ActivitySource, CompanyName, CrmDomainError, NewActivity},
    ports::{ActivityLog, ActivityLogError, ClientDirectory, DirectoryError},
};
use crate::ingest::{
    domain::{Job, JobId, ParseError, ParsedActivity},
    ports::{ActivityParser, JobQueue, JobQueueError},
};
use crate::pipeline::{
    domain::{DealDomainError, DealName, NewDeal},
    ports::{DealRepository, DealRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Default sleep between empty polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Result of one queue poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// No pending job existed.
    Idle,
    /// A job was claimed and completed.
    Completed(JobId),
    /// A job was claimed and recorded as failed.
    Failed(JobId),
}

/// Failure inside one job's parse-and-upsert sequence.
///
/// These never escape the worker: every variant becomes the failed job's
/// recorded error message.
#[derive(Debug, Clone, Error)]
pub enum IngestJobError {
    /// The parsing collaborator produced no usable payload.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A parsed field failed CRM domain validation.
    #[error(transparent)]
    CrmDomain(#[from] CrmDomainError),

    /// A parsed field failed pipeline domain validation.
    #[error(transparent)]
    DealDomain(#[from] DealDomainError),

    /// The client upsert failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The activity record failed.
    #[error(transparent)]
    ActivityLog(#[from] ActivityLogError),

    /// The deal upsert failed.
    #[error(transparent)]
    Deal(#[from] DealRepositoryError),
}

/// Single logical consumer of the ingestion queue.
///
/// One worker instance performs no internal parallelism; throughput comes
/// from running additional OS processes against the shared queue, whose
/// claim operation keeps them from colliding.
pub struct IngestWorker<C>
where
    C: Clock + Send + Sync,
{
    queue: Arc<dyn JobQueue>,
    parser: Arc<dyn ActivityParser>,
    clients: Arc<dyn ClientDirectory>,
    activities: Arc<dyn ActivityLog>,
    deals: Arc<dyn DealRepository>,
    clock: Arc<C>,
    poll_interval: Duration,
}

impl<C> IngestWorker<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a worker over the queue, the parsing collaborator, and the
    /// upsert targets.
    #[must_use]
    pub fn new(
        queue: Arc<dyn JobQueue>,
        parser: Arc<dyn ActivityParser>,
        clients: Arc<dyn ClientDirectory>,
        activities: Arc<dyn ActivityLog>,
        deals: Arc<dyn DealRepository>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            queue,
            parser,
            clients,
            activities,
            deals,
            clock,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Overrides the sleep interval between empty polls.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Claims and processes at most one job.
    ///
    /// Per-job failures are recorded on the job and reported as
    /// [`WorkerOutcome::Failed`]; only queue-level failures surface as
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns [`JobQueueError`] when the claim or the terminal status
    /// write fails.
    pub async fn poll_once(&self) -> Result<WorkerOutcome, JobQueueError> {
        let Some(job) = self.queue.claim_next().await? else {
            return Ok(WorkerOutcome::Idle);
        };

        let job_id = job.id();
        info!(job_id = %job_id, "claimed ingestion job");

        match self.process(&job).await {
            Ok(payload) => {
                self.queue.complete(job_id, &payload).await?;
                info!(job_id = %job_id, company = payload.company_name(), "job completed");
                Ok(WorkerOutcome::Completed(job_id))
            }
            Err(err) => {
                warn!(job_id = %job_id, error = %err, "job failed");
                self.queue.fail(job_id, &err.to_string()).await?;
                Ok(WorkerOutcome::Failed(job_id))
            }
        }
    }

    /// Runs the polling loop forever.
    ///
    /// One job's failure never stops the loop; queue-level errors are
    /// logged and retried after the poll interval.
    pub async fn run(&self) {
        info!(interval_secs = self.poll_interval.as_secs(), "ingestion worker started");
        loop {
            match self.poll_once().await {
                Ok(WorkerOutcome::Idle) => {
                    debug!("no pending jobs");
                    sleep(self.poll_interval).await;
                }
                Ok(WorkerOutcome::Completed(_) | WorkerOutcome::Failed(_)) => {}
                Err(err) => {
                    error!(error = %err, "queue error; backing off");
                    sleep(self.poll_interval).await;
                }
            }
        }
    }

    /// Parse-and-upsert sequence for one claimed job.
    ///
    /// The steps are deliberately not wrapped in one transaction; the
    /// upserts are idempotent, so a late failure leaves re-runnable state.
    async fn process(&self, job: &Job) -> Result<ParsedActivity, IngestJobError> {
        let payload = self.parser.parse(job.raw_text()).await?;

        let company_name = CompanyName::new(payload.company_name())?;
        let client = self
            .clients
            .find_or_create(&company_name, self.clock.utc())
            .await?;
        debug!(client_id = %client.id(), "resolved client");

        let entry = NewActivity::new(
            client.id().clone(),
            payload.action_type().unwrap_or_default(),
            payload.content().unwrap_or_else(|| job.raw_text()),
            ActivitySource::Ai,
            &*self.clock,
        )?;
        self.activities.record(entry).await?;

        if let Some((deal_name, stage)) = payload.deal_ref() {
            let name = DealName::new(deal_name)?;
            // Materializes at the parsed stage; this is not a transition,
            // so gates and adjacency do not apply.
            let deal = self
                .deals
                .find_or_create(NewDeal::new(
                    client.id().clone(),
                    name,
                    stage,
                    &*self.clock,
                ))
                .await?;
            debug!(deal_id = %deal.id(), stage = %deal.stage(), "resolved deal");
        }

        Ok(payload)
    }
}

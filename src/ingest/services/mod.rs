//! Application services for asynchronous ingestion.

mod worker;

pub use worker::{DEFAULT_POLL_INTERVAL, IngestJobError, IngestWorker, WorkerOutcome};

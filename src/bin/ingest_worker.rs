//! Ingestion queue worker process.
//!
//! Runs the polling ingestion loop against `PostgreSQL`. Several
//! instances may run side by side; the queue's claim semantics keep them
//! from processing the same job.
//!
//! Configuration is taken from the environment:
//!
//! - `DATABASE_URL` — `PostgreSQL` connection string (required)
//! - `PARSER_URL` — text-parsing collaborator endpoint (required)
//! - `PARSER_API_KEY` — bearer credential for the collaborator (optional)
//! - `WORKER_POLL_SECS` — sleep between empty polls, default 10
//! - `WORKER_ID` — label for log lines, default a fresh UUID

use dealflow::crm::adapters::postgres::{PostgresActivityLog, PostgresClientDirectory};
use dealflow::ingest::adapters::http::HttpActivityParser;
use dealflow::ingest::adapters::postgres::{IngestPgPool, PostgresJobQueue};
use dealflow::ingest::services::IngestWorker;
use dealflow::pipeline::adapters::postgres::PostgresDealRepository;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum SetupError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
    #[error("invalid value for {name}: '{value}'")]
    InvalidEnv {
        name: &'static str,
        value: String,
    },
    #[error("failed to build connection pool: {0}")]
    Pool(#[source] diesel::r2d2::PoolError),
}

fn required_env(name: &'static str) -> Result<String, SetupError> {
    env::var(name).map_err(|_| SetupError::MissingEnv(name))
}

fn poll_interval_from_env() -> Result<Option<Duration>, SetupError> {
    let Ok(raw) = env::var("WORKER_POLL_SECS") else {
        return Ok(None);
    };
    let secs: u64 = raw.parse().map_err(|_| SetupError::InvalidEnv {
        name: "WORKER_POLL_SECS",
        value: raw,
    })?;
    Ok(Some(Duration::from_secs(secs)))
}

fn build_pool(database_url: &str) -> Result<IngestPgPool, SetupError> {
    Pool::builder()
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .map_err(SetupError::Pool)
}

#[tokio::main]
async fn main() -> Result<(), SetupError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let database_url = required_env("DATABASE_URL")?;
    let parser_url = required_env("PARSER_URL")?;
    let worker_id =
        env::var("WORKER_ID").unwrap_or_else(|_| format!("worker-{}", uuid::Uuid::new_v4()));

    let pool = build_pool(&database_url)?;

    let mut parser = HttpActivityParser::new(parser_url);
    if let Ok(api_key) = env::var("PARSER_API_KEY") {
        parser = parser.with_api_key(api_key);
    }

    let mut worker = IngestWorker::new(
        Arc::new(PostgresJobQueue::new(pool.clone())),
        Arc::new(parser),
        Arc::new(PostgresClientDirectory::new(pool.clone())),
        Arc::new(PostgresActivityLog::new(pool.clone())),
        Arc::new(PostgresDealRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    if let Some(interval) = poll_interval_from_env()? {
        worker = worker.with_poll_interval(interval);
    }

    info!(worker_id = %worker_id, "starting ingestion worker");
    worker.run().await;
    Ok(())
}

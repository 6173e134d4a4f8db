//! `PostgreSQL` job queue implementation.
//!
//! The claim path relies on `FOR UPDATE SKIP LOCKED` so concurrent worker
//! processes acquire distinct rows without waiting on each other.

use super::{models::JobRow, schema::ingest_jobs};
use crate::ingest::{
    domain::{Job, JobId, JobStatus, ParsedActivity, PersistedJobData, validate_raw_text},
    ports::{JobQueue, JobQueueError, JobQueueResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_types::{BigInt, Jsonb, Nullable, Text};

/// `PostgreSQL` connection pool type used by ingestion adapters.
pub type IngestPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed job queue.
#[derive(Debug, Clone)]
pub struct PostgresJobQueue {
    pool: IngestPgPool,
}

impl PostgresJobQueue {
    /// Creates a new queue from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: IngestPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> JobQueueResult<T>
    where
        F: FnOnce(&mut PgConnection) -> JobQueueResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(JobQueueError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(JobQueueError::persistence)?
    }
}

#[async_trait]
impl JobQueue for PostgresJobQueue {
    async fn enqueue(&self, raw_text: &str) -> JobQueueResult<JobId> {
        validate_raw_text(raw_text)?;
        let text = raw_text.to_owned();

        self.run_blocking(move |connection| {
            let row = diesel::sql_query(concat!(
                "INSERT INTO ingest_jobs (raw_text, status, created_at) ",
                "VALUES ($1, 'pending', NOW()) ",
                "RETURNING job_id, raw_text, status, result_data, error_message, ",
                "created_at, processed_at",
            ))
            .bind::<Text, _>(&text)
            .get_result::<JobRow>(connection)
            .map_err(JobQueueError::persistence)?;
            Ok(JobId::new(row.job_id))
        })
        .await
    }

    async fn claim_next(&self) -> JobQueueResult<Option<Job>> {
        self.run_blocking(move |connection| {
            // Single atomic read-and-mark: the inner select skips rows
            // other transactions hold, so claimants neither block nor
            // double-claim.
            let row = diesel::sql_query(concat!(
                "UPDATE ingest_jobs ",
                "SET status = 'processing', processed_at = NOW() ",
                "WHERE job_id = (",
                "SELECT job_id FROM ingest_jobs ",
                "WHERE status = 'pending' ",
                "ORDER BY created_at ",
                "FOR UPDATE SKIP LOCKED ",
                "LIMIT 1",
                ") ",
                "RETURNING job_id, raw_text, status, result_data, error_message, ",
                "created_at, processed_at",
            ))
            .get_result::<JobRow>(connection)
            .optional()
            .map_err(JobQueueError::persistence)?;
            row.map(row_to_job).transpose()
        })
        .await
    }

    async fn complete(&self, id: JobId, result: &ParsedActivity) -> JobQueueResult<()> {
        let payload = serde_json::to_value(result).map_err(JobQueueError::persistence)?;

        self.run_blocking(move |connection| {
            let affected = diesel::sql_query(concat!(
                "UPDATE ingest_jobs ",
                "SET status = 'completed', result_data = $1, error_message = NULL, ",
                "processed_at = COALESCE(processed_at, NOW()) ",
                "WHERE job_id = $2 AND status NOT IN ('completed', 'failed')",
            ))
            .bind::<Nullable<Jsonb>, _>(Some(payload))
            .bind::<BigInt, _>(id.into_inner())
            .execute(connection)
            .map_err(JobQueueError::persistence)?;

            if affected == 0 {
                return Err(terminal_write_rejection(connection, id));
            }
            Ok(())
        })
        .await
    }

    async fn fail(&self, id: JobId, error_message: &str) -> JobQueueResult<()> {
        let message = error_message.to_owned();

        self.run_blocking(move |connection| {
            let affected = diesel::sql_query(concat!(
                "UPDATE ingest_jobs ",
                "SET status = 'failed', error_message = $1, result_data = NULL, ",
                "processed_at = COALESCE(processed_at, NOW()) ",
                "WHERE job_id = $2 AND status NOT IN ('completed', 'failed')",
            ))
            .bind::<Text, _>(&message)
            .bind::<BigInt, _>(id.into_inner())
            .execute(connection)
            .map_err(JobQueueError::persistence)?;

            if affected == 0 {
                return Err(terminal_write_rejection(connection, id));
            }
            Ok(())
        })
        .await
    }

    async fn recent(&self, limit: i64) -> JobQueueResult<Vec<Job>> {
        self.run_blocking(move |connection| {
            let rows = ingest_jobs::table
                .order(ingest_jobs::created_at.desc())
                .limit(limit)
                .select(JobRow::as_select())
                .load::<JobRow>(connection)
                .map_err(JobQueueError::persistence)?;
            rows.into_iter().map(row_to_job).collect()
        })
        .await
    }
}

/// Explains why a guarded terminal update touched no row.
fn terminal_write_rejection(connection: &mut PgConnection, id: JobId) -> JobQueueError {
    let row = ingest_jobs::table
        .filter(ingest_jobs::job_id.eq(id.into_inner()))
        .select(JobRow::as_select())
        .first::<JobRow>(connection)
        .optional();

    match row {
        Ok(None) => JobQueueError::NotFound(id),
        Ok(Some(existing)) => match JobStatus::try_from(existing.status.as_str()) {
            Ok(status) => JobQueueError::AlreadyTerminal { id, status },
            Err(err) => JobQueueError::persistence(err),
        },
        Err(err) => JobQueueError::persistence(err),
    }
}

fn row_to_job(row: JobRow) -> JobQueueResult<Job> {
    let JobRow {
        job_id,
        raw_text,
        status: persisted_status,
        result_data,
        error_message,
        created_at,
        processed_at,
    } = row;

    let status =
        JobStatus::try_from(persisted_status.as_str()).map_err(JobQueueError::persistence)?;
    let result_data = result_data
        .map(serde_json::from_value::<ParsedActivity>)
        .transpose()
        .map_err(JobQueueError::persistence)?;

    let data = PersistedJobData {
        id: JobId::new(job_id),
        raw_text,
        status,
        result_data,
        error_message,
        created_at,
        processed_at,
    };
    Ok(Job::from_persisted(data))
}

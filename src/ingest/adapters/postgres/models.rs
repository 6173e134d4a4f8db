//! Diesel row models for ingestion job persistence.

use super::schema::ingest_jobs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for ingestion jobs.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = ingest_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JobRow {
    /// Store-allocated job identifier.
    pub job_id: i64,
    /// Raw input text.
    pub raw_text: String,
    /// Lifecycle status.
    pub status: String,
    /// Structured result payload, if completed.
    pub result_data: Option<Value>,
    /// Error message, if failed.
    pub error_message: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Claim timestamp, if claimed.
    pub processed_at: Option<DateTime<Utc>>,
}

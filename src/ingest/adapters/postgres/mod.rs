//! `PostgreSQL` adapters for ingestion persistence.

mod models;
mod queue;
mod schema;

pub use queue::{IngestPgPool, PostgresJobQueue};

//! Diesel row models for CRM persistence.

use super::schema::{activity_log, clients};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result and insert row for client records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable, Insertable)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClientRow {
    /// Human-readable client identifier.
    pub client_id: String,
    /// Company name.
    pub company_name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for activity entries.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = activity_log)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityRow {
    /// Store-allocated entry identifier.
    pub activity_id: i64,
    /// Owning client identifier.
    pub client_id: String,
    /// Kind of work recorded.
    pub action_type: String,
    /// Free-text content.
    pub content: String,
    /// Origin of the entry.
    pub source: String,
    /// Date the work is logged against.
    pub logged_on: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for activity entries; the identifier is store-allocated.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activity_log)]
pub struct NewActivityRow {
    /// Owning client identifier.
    pub client_id: String,
    /// Kind of work recorded.
    pub action_type: String,
    /// Free-text content.
    pub content: String,
    /// Origin of the entry.
    pub source: String,
    /// Date the work is logged against.
    pub logged_on: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

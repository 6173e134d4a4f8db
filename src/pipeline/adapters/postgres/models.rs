//! Diesel row models for deal pipeline persistence.

use super::schema::{deals, qualifications};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for deal records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = deals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DealRow {
    /// Store-allocated deal identifier.
    pub deal_id: i64,
    /// Owning client identifier.
    pub client_id: String,
    /// Deal name.
    pub deal_name: String,
    /// Responsible owner, if assigned.
    pub owner: Option<String>,
    /// Commercial priority code.
    pub priority: String,
    /// Lifecycle stage code.
    pub stage: String,
    /// Timestamp of the last accepted stage change.
    pub stage_changed_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for deal records; the identifier is store-allocated.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = deals)]
pub struct NewDealRow {
    /// Owning client identifier.
    pub client_id: String,
    /// Deal name.
    pub deal_name: String,
    /// Responsible owner, if assigned.
    pub owner: Option<String>,
    /// Commercial priority code.
    pub priority: String,
    /// Lifecycle stage code.
    pub stage: String,
    /// Timestamp of the last accepted stage change.
    pub stage_changed_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model applied by [`super::PostgresDealRepository::update`].
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = deals)]
pub struct DealChangeset {
    /// Responsible owner, if assigned. `None` clears the column rather
    /// than skipping it.
    #[diesel(treat_none_as_null = true)]
    pub owner: Option<String>,
    /// Commercial priority code.
    pub priority: String,
    /// Lifecycle stage code.
    pub stage: String,
    /// Timestamp of the last accepted stage change.
    pub stage_changed_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for qualification sheets.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable, Insertable)]
#[diesel(table_name = qualifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QualificationRow {
    /// Deal the sheet belongs to.
    pub deal_id: i64,
    /// Metrics field.
    pub metrics: Option<String>,
    /// Economic buyer field.
    pub economic_buyer: Option<String>,
    /// Decision criteria field.
    pub decision_criteria: Option<String>,
    /// Decision process field.
    pub decision_process: Option<String>,
    /// Identified pain field.
    pub identified_pain: Option<String>,
    /// Champion field.
    pub champion: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

//! `PostgreSQL` activity log implementation.

use super::{
    directory::CrmPgPool,
    models::{ActivityRow, NewActivityRow},
    schema::activity_log,
};
use crate::crm::{
    domain::{ActionType, Activity, ActivityId, ActivitySource, ClientId, NewActivity},
    ports::{ActivityLog, ActivityLogError, ActivityLogResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed activity log.
#[derive(Debug, Clone)]
pub struct PostgresActivityLog {
    pool: CrmPgPool,
}

impl PostgresActivityLog {
    /// Creates a new log from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CrmPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ActivityLogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ActivityLogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ActivityLogError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ActivityLogError::persistence)?
    }
}

#[async_trait]
impl ActivityLog for PostgresActivityLog {
    async fn record(&self, new_activity: NewActivity) -> ActivityLogResult<Activity> {
        let new_row = NewActivityRow {
            client_id: new_activity.client_id.as_str().to_owned(),
            action_type: new_activity.action_type.as_str().to_owned(),
            content: new_activity.content.clone(),
            source: new_activity.source.as_str().to_owned(),
            logged_on: new_activity.logged_on,
            created_at: new_activity.created_at,
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(activity_log::table)
                .values(&new_row)
                .get_result::<ActivityRow>(connection)
                .map_err(ActivityLogError::persistence)?;
            row_to_activity(row)
        })
        .await
    }

    async fn for_client(
        &self,
        client_id: &ClientId,
        limit: i64,
    ) -> ActivityLogResult<Vec<Activity>> {
        let key = client_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = activity_log::table
                .filter(activity_log::client_id.eq(&key))
                .order(activity_log::created_at.desc())
                .limit(limit)
                .select(ActivityRow::as_select())
                .load::<ActivityRow>(connection)
                .map_err(ActivityLogError::persistence)?;
            rows.into_iter().map(row_to_activity).collect()
        })
        .await
    }
}

fn row_to_activity(row: ActivityRow) -> ActivityLogResult<Activity> {
    let client_id = ClientId::new(row.client_id).map_err(ActivityLogError::persistence)?;
    let action_type =
        ActionType::try_from(row.action_type.as_str()).map_err(ActivityLogError::persistence)?;
    let source =
        ActivitySource::try_from(row.source.as_str()).map_err(ActivityLogError::persistence)?;

    let new_activity = NewActivity {
        client_id,
        action_type,
        content: row.content,
        source,
        logged_on: row.logged_on,
        created_at: row.created_at,
    };
    Ok(Activity::from_new(
        ActivityId::new(row.activity_id),
        new_activity,
    ))
}

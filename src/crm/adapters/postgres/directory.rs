//! `PostgreSQL` client directory implementation.

use super::{models::ClientRow, schema::clients};
use crate::crm::{
    domain::{Client, ClientId, CompanyName},
    ports::{ClientDirectory, DirectoryError, DirectoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by CRM adapters.
pub type CrmPgPool = Pool<ConnectionManager<PgConnection>>;

/// Attempts made to allocate a fresh sequential identifier before giving
/// up; each retry re-reads the directory after a unique-key collision.
const MAX_ALLOCATION_ATTEMPTS: u32 = 3;

/// `PostgreSQL`-backed client directory.
#[derive(Debug, Clone)]
pub struct PostgresClientDirectory {
    pool: CrmPgPool,
}

impl PostgresClientDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CrmPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DirectoryError::persistence)?
    }
}

#[async_trait]
impl ClientDirectory for PostgresClientDirectory {
    async fn find_or_create(
        &self,
        company_name: &CompanyName,
        requested_at: DateTime<Utc>,
    ) -> DirectoryResult<Client> {
        let name = company_name.clone();

        self.run_blocking(move |connection| {
            for _ in 0..MAX_ALLOCATION_ATTEMPTS {
                if let Some(row) = find_client_by_name(connection, name.as_str())? {
                    return row_to_client(row);
                }

                let id = next_sequential_id(connection)?;
                let new_row = ClientRow {
                    client_id: id.as_str().to_owned(),
                    company_name: name.as_str().to_owned(),
                    created_at: requested_at,
                    updated_at: requested_at,
                };
                match diesel::insert_into(clients::table)
                    .values(&new_row)
                    .execute(connection)
                {
                    Ok(_) => return Ok(Client::new(id, name.clone(), requested_at)),
                    // Either the name landed first elsewhere or the id was
                    // taken by a concurrent allocation; re-read and retry.
                    Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {}
                    Err(err) => return Err(DirectoryError::persistence(err)),
                }
            }
            Err(DirectoryError::AllocationContention(name.clone()))
        })
        .await
    }

    async fn find_by_id(&self, id: &ClientId) -> DirectoryResult<Option<Client>> {
        let key = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = clients::table
                .filter(clients::client_id.eq(&key))
                .select(ClientRow::as_select())
                .first::<ClientRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            row.map(row_to_client).transpose()
        })
        .await
    }

    async fn find_by_name(&self, company_name: &CompanyName) -> DirectoryResult<Option<Client>> {
        let key = company_name.as_str().to_owned();
        self.run_blocking(move |connection| {
            find_client_by_name(connection, &key)?
                .map(row_to_client)
                .transpose()
        })
        .await
    }
}

fn find_client_by_name(
    connection: &mut PgConnection,
    company_name: &str,
) -> DirectoryResult<Option<ClientRow>> {
    clients::table
        .filter(clients::company_name.eq(company_name))
        .select(ClientRow::as_select())
        .first::<ClientRow>(connection)
        .optional()
        .map_err(DirectoryError::persistence)
}

/// One past the highest allocated `CLI-nnn` suffix. Identifiers imported
/// from elsewhere do not participate in the sequence.
fn next_sequential_id(connection: &mut PgConnection) -> DirectoryResult<ClientId> {
    let ids: Vec<String> = clients::table
        .select(clients::client_id)
        .filter(clients::client_id.like("CLI-%"))
        .load(connection)
        .map_err(DirectoryError::persistence)?;

    let max = ids
        .iter()
        .filter_map(|raw| ClientId::new(raw.clone()).ok())
        .filter_map(|id| id.sequence_number())
        .max()
        .unwrap_or(0);
    Ok(ClientId::sequential(max + 1))
}

fn row_to_client(row: ClientRow) -> DirectoryResult<Client> {
    let id = ClientId::new(row.client_id).map_err(DirectoryError::persistence)?;
    let name = CompanyName::new(row.company_name).map_err(DirectoryError::persistence)?;
    Ok(Client::from_persisted(
        id,
        name,
        row.created_at,
        row.updated_at,
    ))
}

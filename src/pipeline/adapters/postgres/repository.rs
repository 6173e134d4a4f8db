//! `PostgreSQL` repository implementations for deal pipeline storage.

use super::{
    models::{DealChangeset, DealRow, NewDealRow, QualificationRow},
    schema::{deals, qualifications},
};
use crate::crm::domain::ClientId;
use crate::pipeline::{
    domain::{
        Deal, DealId, DealName, DealStage, NewDeal, PersistedDealData, PersistedQualificationData,
        Priority, QualificationField, QualificationRecord,
    },
    ports::{
        DealRepository, DealRepositoryError, DealRepositoryResult, QualificationRepository,
        QualificationRepositoryError, QualificationRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by pipeline adapters.
pub type PipelinePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed deal repository.
#[derive(Debug, Clone)]
pub struct PostgresDealRepository {
    pool: PipelinePgPool,
}

impl PostgresDealRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PipelinePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DealRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DealRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DealRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DealRepositoryError::persistence)?
    }
}

#[async_trait]
impl DealRepository for PostgresDealRepository {
    async fn create(&self, new_deal: NewDeal) -> DealRepositoryResult<Deal> {
        let client_id = new_deal.client_id.clone();
        let name = new_deal.name.clone();
        let new_row = new_deal_to_row(&new_deal);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(deals::table)
                .values(&new_row)
                .get_result::<DealRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DealRepositoryError::DuplicateName {
                            client_id: client_id.clone(),
                            name: name.clone(),
                        }
                    }
                    _ => DealRepositoryError::persistence(err),
                })?;
            row_to_deal(row)
        })
        .await
    }

    async fn find_by_id(&self, id: DealId) -> DealRepositoryResult<Option<Deal>> {
        self.run_blocking(move |connection| {
            let row = deals::table
                .filter(deals::deal_id.eq(id.into_inner()))
                .select(DealRow::as_select())
                .first::<DealRow>(connection)
                .optional()
                .map_err(DealRepositoryError::persistence)?;
            row.map(row_to_deal).transpose()
        })
        .await
    }

    async fn find_by_name(
        &self,
        client_id: &ClientId,
        name: &DealName,
    ) -> DealRepositoryResult<Option<Deal>> {
        let client_key = client_id.as_str().to_owned();
        let name_key = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            find_deal_by_name(connection, &client_key, &name_key)?
                .map(row_to_deal)
                .transpose()
        })
        .await
    }

    async fn find_or_create(&self, new_deal: NewDeal) -> DealRepositoryResult<Deal> {
        let new_row = new_deal_to_row(&new_deal);

        self.run_blocking(move |connection| {
            if let Some(row) = find_deal_by_name(connection, &new_row.client_id, &new_row.deal_name)?
            {
                return Ok(row_to_deal(row)?);
            }

            // ON CONFLICT DO NOTHING closes the race between the check and
            // the insert; the loser re-reads the winner's row.
            diesel::insert_into(deals::table)
                .values(&new_row)
                .on_conflict((deals::client_id, deals::deal_name))
                .do_nothing()
                .execute(connection)
                .map_err(DealRepositoryError::persistence)?;

            let row = find_deal_by_name(connection, &new_row.client_id, &new_row.deal_name)?
                .ok_or_else(|| {
                    DealRepositoryError::persistence(std::io::Error::other(
                        "deal row missing after upsert",
                    ))
                })?;
            row_to_deal(row)
        })
        .await
    }

    async fn update(&self, deal: &Deal) -> DealRepositoryResult<()> {
        let deal_id = deal.id();
        let changeset = DealChangeset {
            owner: deal.owner().map(str::to_owned),
            priority: deal.priority().as_str().to_owned(),
            stage: deal.stage().as_str().to_owned(),
            stage_changed_at: deal.stage_changed_at(),
            updated_at: deal.updated_at(),
        };

        self.run_blocking(move |connection| {
            let affected =
                diesel::update(deals::table.filter(deals::deal_id.eq(deal_id.into_inner())))
                    .set(&changeset)
                    .execute(connection)
                    .map_err(DealRepositoryError::persistence)?;
            if affected == 0 {
                return Err(DealRepositoryError::NotFound(deal_id));
            }
            Ok(())
        })
        .await
    }
}

fn find_deal_by_name(
    connection: &mut PgConnection,
    client_id: &str,
    deal_name: &str,
) -> DealRepositoryResult<Option<DealRow>> {
    deals::table
        .filter(deals::client_id.eq(client_id))
        .filter(deals::deal_name.eq(deal_name))
        .select(DealRow::as_select())
        .first::<DealRow>(connection)
        .optional()
        .map_err(DealRepositoryError::persistence)
}

fn new_deal_to_row(new_deal: &NewDeal) -> NewDealRow {
    NewDealRow {
        client_id: new_deal.client_id.as_str().to_owned(),
        deal_name: new_deal.name.as_str().to_owned(),
        owner: new_deal.owner.clone(),
        priority: new_deal.priority.as_str().to_owned(),
        stage: new_deal.stage.as_str().to_owned(),
        stage_changed_at: new_deal.created_at,
        created_at: new_deal.created_at,
        updated_at: new_deal.created_at,
    }
}

fn row_to_deal(row: DealRow) -> DealRepositoryResult<Deal> {
    let DealRow {
        deal_id,
        client_id,
        deal_name,
        owner,
        priority,
        stage,
        stage_changed_at,
        created_at,
        updated_at,
    } = row;

    let data = PersistedDealData {
        id: DealId::new(deal_id),
        client_id: ClientId::new(client_id).map_err(DealRepositoryError::persistence)?,
        name: DealName::new(deal_name).map_err(DealRepositoryError::persistence)?,
        owner,
        priority: Priority::try_from(priority.as_str()).map_err(DealRepositoryError::persistence)?,
        stage: DealStage::try_from(stage.as_str()).map_err(DealRepositoryError::persistence)?,
        stage_changed_at,
        created_at,
        updated_at,
    };
    Ok(Deal::from_persisted(data))
}

/// `PostgreSQL`-backed qualification repository.
#[derive(Debug, Clone)]
pub struct PostgresQualificationRepository {
    pool: PipelinePgPool,
}

impl PostgresQualificationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PipelinePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> QualificationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> QualificationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(QualificationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(QualificationRepositoryError::persistence)?
    }
}

#[async_trait]
impl QualificationRepository for PostgresQualificationRepository {
    async fn find_by_deal(
        &self,
        deal_id: DealId,
    ) -> QualificationRepositoryResult<Option<QualificationRecord>> {
        self.run_blocking(move |connection| {
            let row = qualifications::table
                .filter(qualifications::deal_id.eq(deal_id.into_inner()))
                .select(QualificationRow::as_select())
                .first::<QualificationRow>(connection)
                .optional()
                .map_err(QualificationRepositoryError::persistence)?;
            Ok(row.map(row_to_record))
        })
        .await
    }

    async fn upsert(&self, record: &QualificationRecord) -> QualificationRepositoryResult<()> {
        let row = record_to_row(record);

        self.run_blocking(move |connection| {
            diesel::insert_into(qualifications::table)
                .values(&row)
                .on_conflict(qualifications::deal_id)
                .do_update()
                .set((
                    qualifications::metrics.eq(&row.metrics),
                    qualifications::economic_buyer.eq(&row.economic_buyer),
                    qualifications::decision_criteria.eq(&row.decision_criteria),
                    qualifications::decision_process.eq(&row.decision_process),
                    qualifications::identified_pain.eq(&row.identified_pain),
                    qualifications::champion.eq(&row.champion),
                    qualifications::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(QualificationRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn record_to_row(record: &QualificationRecord) -> QualificationRow {
    let field = |name: QualificationField| record.value(name).map(str::to_owned);
    QualificationRow {
        deal_id: record.deal_id().into_inner(),
        metrics: field(QualificationField::Metrics),
        economic_buyer: field(QualificationField::EconomicBuyer),
        decision_criteria: field(QualificationField::DecisionCriteria),
        decision_process: field(QualificationField::DecisionProcess),
        identified_pain: field(QualificationField::IdentifiedPain),
        champion: field(QualificationField::Champion),
        updated_at: record.updated_at(),
    }
}

fn row_to_record(row: QualificationRow) -> QualificationRecord {
    QualificationRecord::from_persisted(PersistedQualificationData {
        deal_id: DealId::new(row.deal_id),
        metrics: row.metrics,
        economic_buyer: row.economic_buyer,
        decision_criteria: row.decision_criteria,
        decision_process: row.decision_process,
        identified_pain: row.identified_pain,
        champion: row.champion,
        updated_at: row.updated_at,
    })
}

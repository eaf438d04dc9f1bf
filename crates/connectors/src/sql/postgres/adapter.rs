use crate::sql::{
    base::{
        error::{ConnectorError, DbError},
        store::{TimezoneStore, ZoneTransaction},
    },
    postgres::{
        params::{PgRowId, row_id_from_row},
        query::ZoneQueries,
        utils::connect_client,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use model::{
    execution::{connection::ConnectionSettings, target::TargetTable},
    records::row::{AffectedRow, RowId},
};
use tokio::task::JoinHandle;
use tokio_postgres::{Client, Transaction};
use tracing::{debug, info};

/// PostgreSQL-backed [`TimezoneStore`] owning exactly one connection.
///
/// Dropping the store releases the connection, so every exit path of the
/// caller disconnects even when `disconnect` is never reached.
pub struct PgStore {
    client: Option<Client>,
    connection: Option<JoinHandle<()>>,
    queries: ZoneQueries,
    endpoint: String,
}

impl PgStore {
    pub async fn connect(
        settings: &ConnectionSettings,
        target: &TargetTable,
    ) -> Result<Self, ConnectorError> {
        let (client, connection) = connect_client(settings).await?;
        info!(endpoint = %settings.describe(), "Connected to PostgreSQL");

        Ok(PgStore {
            client: Some(client),
            connection: Some(connection),
            queries: ZoneQueries::new(target),
            endpoint: settings.describe(),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&Client, DbError> {
        self.client.as_ref().ok_or(DbError::Disconnected)
    }
}

#[async_trait]
impl TimezoneStore for PgStore {
    async fn find_rows_with_zones(&mut self, zones: &[&str]) -> Result<Vec<AffectedRow>, DbError> {
        if zones.is_empty() {
            return Ok(Vec::new());
        }

        debug!(sql = %self.queries.select_by_zones, "Scanning for legacy timezones");
        let rows = self
            .client()?
            .query(self.queries.select_by_zones.as_str(), &[&zones])
            .await?;

        rows.iter()
            .map(|row| {
                Ok(AffectedRow {
                    id: row_id_from_row(row, 0)?,
                    timezone: row.try_get::<_, String>(1)?,
                })
            })
            .collect()
    }

    async fn begin<'a>(&'a mut self) -> Result<Box<dyn ZoneTransaction + 'a>, DbError> {
        let queries = &self.queries;
        let tx = self
            .client
            .as_mut()
            .ok_or(DbError::Disconnected)?
            .transaction()
            .await?;
        Ok(Box::new(PgZoneTransaction { tx, queries }))
    }

    async fn probe_zone(&mut self, zone: &str) -> Result<NaiveDate, DbError> {
        let row = self.client()?.query_one(self.queries.probe, &[&zone]).await?;
        Ok(row.try_get::<_, NaiveDate>(0)?)
    }

    async fn disconnect(&mut self) {
        if self.client.take().is_none() {
            return;
        }
        if let Some(handle) = self.connection.take() {
            // The connection task resolves once the client is gone.
            let _ = handle.await;
        }
        info!(endpoint = %self.endpoint, "Database connection closed");
    }
}

impl Drop for PgStore {
    fn drop(&mut self) {
        if self.client.take().is_some() {
            info!(endpoint = %self.endpoint, "Database connection released");
        }
    }
}

struct PgZoneTransaction<'a> {
    tx: Transaction<'a>,
    queries: &'a ZoneQueries,
}

#[async_trait]
impl ZoneTransaction for PgZoneTransaction<'_> {
    async fn update_zone(&mut self, id: &RowId, zone: &str) -> Result<u64, DbError> {
        let affected = self
            .tx
            .execute(self.queries.update_zone.as_str(), &[&zone, &PgRowId(id)])
            .await?;
        Ok(affected)
    }

    async fn read_zone(&mut self, id: &RowId) -> Result<Option<String>, DbError> {
        let row = self
            .tx
            .query_opt(self.queries.select_zone.as_str(), &[&PgRowId(id)])
            .await?;
        match row {
            Some(row) => Ok(row.try_get::<_, Option<String>>(0)?),
            None => Ok(None),
        }
    }

    async fn commit(self: Box<Self>) -> Result<(), DbError> {
        self.tx.commit().await?;
        Ok(())
    }
}

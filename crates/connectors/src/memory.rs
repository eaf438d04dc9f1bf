//! In-process [`TimezoneStore`] for unit tests, built with the `testing` feature.
//!
//! Rows live in a `Vec` so scans come back in insertion order. Knobs let a
//! caller inject the failure modes a real server exhibits: statement errors,
//! a concurrent writer reverting a row between update and read-back, and
//! unrecognised zone names in the probe.

use crate::sql::base::{
    error::DbError,
    store::{TimezoneStore, ZoneTransaction},
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use model::records::row::{AffectedRow, RowId};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<(RowId, Option<String>)>,
    resolvable_zones: HashSet<String>,
    failing_rows: HashSet<RowId>,
    reverting_rows: HashSet<RowId>,
    fail_scan: bool,
    connected: bool,
    updates_issued: usize,
    commits: usize,
    disconnects: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            connected: true,
            ..Default::default()
        }
    }

    pub fn with_rows<I, Id, Z>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Id, Z)>,
        Id: Into<RowId>,
        Z: Into<String>,
    {
        let mut store = Self::new();
        for (id, zone) in rows {
            store.rows.push((id.into(), Some(zone.into())));
        }
        store
    }

    /// Zone names the probe accepts; everything else raises an error.
    pub fn resolving<I, Z>(mut self, zones: I) -> Self
    where
        I: IntoIterator<Item = Z>,
        Z: Into<String>,
    {
        self.resolvable_zones = zones.into_iter().map(Into::into).collect();
        self
    }

    /// Every statement touching `id` inside a transaction fails.
    pub fn failing_on(mut self, id: impl Into<RowId>) -> Self {
        self.failing_rows.insert(id.into());
        self
    }

    /// Another writer restores the old value of `id` right after our update.
    pub fn reverting(mut self, id: impl Into<RowId>) -> Self {
        self.reverting_rows.insert(id.into());
        self
    }

    pub fn failing_scan(mut self) -> Self {
        self.fail_scan = true;
        self
    }

    pub fn zone_of(&self, id: &RowId) -> Option<&str> {
        self.rows
            .iter()
            .find(|(row_id, _)| row_id == id)
            .and_then(|(_, zone)| zone.as_deref())
    }

    pub fn updates_issued(&self) -> usize {
        self.updates_issued
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn ensure_connected(&self) -> Result<(), DbError> {
        if self.connected {
            Ok(())
        } else {
            Err(DbError::Disconnected)
        }
    }
}

#[async_trait]
impl TimezoneStore for MemoryStore {
    async fn find_rows_with_zones(&mut self, zones: &[&str]) -> Result<Vec<AffectedRow>, DbError> {
        self.ensure_connected()?;
        if self.fail_scan {
            return Err(DbError::Unknown("relation does not exist".into()));
        }

        Ok(self
            .rows
            .iter()
            .filter_map(|(id, zone)| {
                let zone = zone.as_deref()?;
                zones
                    .contains(&zone)
                    .then(|| AffectedRow::new(id.clone(), zone))
            })
            .collect())
    }

    async fn begin<'a>(&'a mut self) -> Result<Box<dyn ZoneTransaction + 'a>, DbError> {
        self.ensure_connected()?;
        Ok(Box::new(MemoryTransaction {
            store: self,
            staged: HashMap::new(),
        }))
    }

    async fn probe_zone(&mut self, zone: &str) -> Result<NaiveDate, DbError> {
        self.ensure_connected()?;
        if self.resolvable_zones.contains(zone) {
            Ok(Utc::now().date_naive())
        } else {
            Err(DbError::Unknown(format!("time zone \"{zone}\" not recognized")))
        }
    }

    async fn disconnect(&mut self) {
        if self.connected {
            self.connected = false;
            self.disconnects += 1;
        }
    }
}

struct MemoryTransaction<'a> {
    store: &'a mut MemoryStore,
    staged: HashMap<RowId, Option<String>>,
}

impl MemoryTransaction<'_> {
    fn check(&self, id: &RowId) -> Result<(), DbError> {
        if self.store.failing_rows.contains(id) {
            Err(DbError::Unknown(format!("could not serialize access to row {id}")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ZoneTransaction for MemoryTransaction<'_> {
    async fn update_zone(&mut self, id: &RowId, zone: &str) -> Result<u64, DbError> {
        self.check(id)?;
        self.store.updates_issued += 1;

        let Some(current) = self.store.zone_of(id).map(str::to_string) else {
            return Ok(0);
        };
        let value = if self.store.reverting_rows.contains(id) {
            current
        } else {
            zone.to_string()
        };
        self.staged.insert(id.clone(), Some(value));
        Ok(1)
    }

    async fn read_zone(&mut self, id: &RowId) -> Result<Option<String>, DbError> {
        self.check(id)?;
        match self.staged.get(id) {
            Some(zone) => Ok(zone.clone()),
            None => Ok(self.store.zone_of(id).map(str::to_string)),
        }
    }

    async fn commit(self: Box<Self>) -> Result<(), DbError> {
        let MemoryTransaction { store, staged } = *self;
        for (id, zone) in staged {
            if let Some(row) = store.rows.iter_mut().find(|(row_id, _)| *row_id == id) {
                row.1 = zone;
            }
        }
        store.commits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scan_filters_by_zone_set() {
        let mut store = MemoryStore::with_rows([(1, "US/Central"), (2, "America/Chicago")]);
        let rows = store.find_rows_with_zones(&["US/Central"]).await.unwrap();
        assert_eq!(rows, vec![AffectedRow::new(1, "US/Central")]);
        assert!(store.find_rows_with_zones(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_uncommitted_transaction_is_discarded() {
        let mut store = MemoryStore::with_rows([(1, "US/Central")]);
        {
            let mut tx = store.begin().await.unwrap();
            tx.update_zone(&RowId::Int(1), "America/Chicago").await.unwrap();
            assert_eq!(
                tx.read_zone(&RowId::Int(1)).await.unwrap().as_deref(),
                Some("America/Chicago")
            );
        }
        assert_eq!(store.zone_of(&RowId::Int(1)), Some("US/Central"));
        assert_eq!(store.commits(), 0);
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let mut store = MemoryStore::new();
        store.disconnect().await;
        store.disconnect().await;
        assert_eq!(store.disconnects(), 1);
        assert!(matches!(
            store.probe_zone("UTC").await,
            Err(DbError::Disconnected)
        ));
    }
}

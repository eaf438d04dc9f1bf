use crate::error::RemediationError;
use chrono::NaiveDate;
use connectors::sql::base::{error::DbError, store::TimezoneStore};
use engine_config::report::summary::RunReport;
use model::{
    core::{identifiers::RunId, timezone::TimezoneMapping},
    execution::outcome::{FixFailure, FixOutcome, Fixed},
    records::row::AffectedRow,
};
use serde::Serialize;
use tracing::{error, info, warn};

/// Result of the diagnostic timezone probe. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Ok { zone: String, date: NaiveDate },
    Failed { zone: String, message: String },
}

impl ProbeOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ProbeOutcome::Ok { .. })
    }

    pub fn zone(&self) -> &str {
        match self {
            ProbeOutcome::Ok { zone, .. } | ProbeOutcome::Failed { zone, .. } => zone,
        }
    }
}

/// Scan / fix / verify over one store, driven sequentially.
pub struct Remediator<'s, S: TimezoneStore + ?Sized> {
    store: &'s mut S,
    mapping: TimezoneMapping,
}

impl<'s, S: TimezoneStore + ?Sized> Remediator<'s, S> {
    pub fn new(store: &'s mut S, mapping: TimezoneMapping) -> Self {
        Self { store, mapping }
    }

    /// Rows whose timezone is one of the mapping's legacy keys.
    pub async fn scan(&mut self) -> Result<Vec<AffectedRow>, DbError> {
        let keys = self.mapping.legacy_keys();
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        self.store.find_rows_with_zones(&keys).await
    }

    /// Rewrites one row and confirms the new value by reading it back.
    pub async fn fix_one(&mut self, row: &AffectedRow) -> FixOutcome {
        let Some(canonical) = self.mapping.canonical(&row.timezone) else {
            warn!(row_id = %row.id, timezone = %row.timezone, "No mapping found for timezone");
            return Err(FixFailure::NoMapping);
        };

        let outcome = match self.apply(row, canonical).await {
            Ok(Some(found)) if found == canonical => Ok(Fixed {
                id: row.id.clone(),
                from: row.timezone.clone(),
                to: canonical.to_string(),
            }),
            Ok(found) => Err(FixFailure::VerifyMismatch {
                expected: canonical.to_string(),
                found,
            }),
            Err(err) => Err(FixFailure::Database {
                message: err.to_string(),
            }),
        };

        match &outcome {
            Ok(fixed) => info!("Updated row {}: {} → {}", fixed.id, fixed.from, fixed.to),
            Err(FixFailure::VerifyMismatch { found, .. }) => error!(
                row_id = %row.id,
                timezone = %row.timezone,
                expected = canonical,
                found = ?found,
                "Failed to verify update"
            ),
            Err(failure) => error!(
                row_id = %row.id,
                timezone = %row.timezone,
                error = %failure,
                "Database error updating row"
            ),
        }

        outcome
    }

    /// Update and read-back in one transaction; committed once both statements ran.
    async fn apply(&mut self, row: &AffectedRow, canonical: &str) -> Result<Option<String>, DbError> {
        let mut tx = self.store.begin().await?;
        tx.update_zone(&row.id, canonical).await?;
        let found = tx.read_zone(&row.id).await?;
        tx.commit().await?;
        Ok(found)
    }

    /// Scans, then fixes every affected row in turn. A scan failure aborts;
    /// per-row failures are only tallied.
    pub async fn fix_all(&mut self, run_id: RunId) -> Result<RunReport, RemediationError> {
        let mut report = RunReport::new(run_id);

        info!("Scanning for invalid timezones...");
        let rows = self.scan().await?;
        report.scanned = rows.len();

        if rows.is_empty() {
            info!("No invalid timezones found");
            return Ok(report.finish());
        }

        info!("Found {} rows with invalid timezones", rows.len());
        for row in &rows {
            let outcome = self.fix_one(row).await;
            report.record(row, &outcome);
        }

        Ok(report.finish())
    }

    /// Runs the server's timezone conversion with `zone` as a smoke test.
    pub async fn probe(&mut self, zone: &str) -> ProbeOutcome {
        match self.store.probe_zone(zone).await {
            Ok(date) => {
                info!("Timezone '{}' works correctly ({})", zone, date);
                ProbeOutcome::Ok {
                    zone: zone.to_string(),
                    date,
                }
            }
            Err(err) => {
                warn!("Timezone '{}' error: {}", zone, err);
                ProbeOutcome::Failed {
                    zone: zone.to_string(),
                    message: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectors::memory::MemoryStore;
    use model::records::row::RowId;

    fn fixture() -> MemoryStore {
        MemoryStore::with_rows([
            (1, "US/Central"),
            (2, "America/Chicago"),
            (3, "US/Nonexistent"),
        ])
    }

    #[tokio::test]
    async fn test_scan_returns_only_legacy_rows() {
        let mut store = fixture();
        let mut remediator = Remediator::new(&mut store, TimezoneMapping::builtin());

        let rows = remediator.scan().await.unwrap();
        assert_eq!(rows, vec![AffectedRow::new(1, "US/Central")]);
    }

    #[tokio::test]
    async fn test_fix_all_rewrites_legacy_rows() {
        let mut store = fixture();
        let report = Remediator::new(&mut store, TimezoneMapping::builtin())
            .fix_all(RunId::generate())
            .await
            .unwrap();

        assert_eq!(report.counts(), (1, 0));
        assert_eq!(report.scanned, 1);
        assert_eq!(store.zone_of(&RowId::Int(1)), Some("America/Chicago"));
        assert_eq!(store.zone_of(&RowId::Int(2)), Some("America/Chicago"));
        assert_eq!(store.zone_of(&RowId::Int(3)), Some("US/Nonexistent"));
    }

    #[tokio::test]
    async fn test_fix_all_is_idempotent() {
        let mut store = MemoryStore::with_rows([
            (1, "US/Central"),
            (2, "Canada/Newfoundland"),
            (3, "US/Hawaii"),
        ]);

        let first = Remediator::new(&mut store, TimezoneMapping::builtin())
            .fix_all(RunId::generate())
            .await
            .unwrap();
        assert_eq!(first.counts(), (3, 0));
        let updates_after_first = store.updates_issued();

        let second = Remediator::new(&mut store, TimezoneMapping::builtin())
            .fix_all(RunId::generate())
            .await
            .unwrap();
        assert_eq!(second.counts(), (0, 0));
        assert_eq!(store.updates_issued(), updates_after_first);
    }

    #[tokio::test]
    async fn test_no_rows_issues_no_update() {
        let mut store = MemoryStore::with_rows([(1, "America/Chicago")]);
        let report = Remediator::new(&mut store, TimezoneMapping::builtin())
            .fix_all(RunId::generate())
            .await
            .unwrap();

        assert_eq!(report.counts(), (0, 0));
        assert_eq!(store.updates_issued(), 0);
    }

    #[tokio::test]
    async fn test_empty_mapping_matches_nothing() {
        let mut store = fixture();
        let mut remediator = Remediator::new(&mut store, TimezoneMapping::new(&[]));

        assert!(remediator.scan().await.unwrap().is_empty());
        let report = remediator.fix_all(RunId::generate()).await.unwrap();
        assert_eq!(report.counts(), (0, 0));
        assert_eq!(store.zone_of(&RowId::Int(1)), Some("US/Central"));
    }

    #[tokio::test]
    async fn test_concurrent_revert_is_a_verify_mismatch() {
        let mut store = fixture().reverting(1);
        let mut remediator = Remediator::new(&mut store, TimezoneMapping::builtin());

        let outcome = remediator
            .fix_one(&AffectedRow::new(1, "US/Central"))
            .await;
        assert_eq!(
            outcome,
            Err(FixFailure::VerifyMismatch {
                expected: "America/Chicago".into(),
                found: Some("US/Central".into()),
            })
        );
        assert_eq!(outcome.unwrap_err().reason(), "verify mismatch");
    }

    #[tokio::test]
    async fn test_missing_row_is_a_verify_mismatch() {
        let mut store = MemoryStore::new();
        let outcome = Remediator::new(&mut store, TimezoneMapping::builtin())
            .fix_one(&AffectedRow::new(99, "US/Eastern"))
            .await;
        assert!(matches!(
            outcome,
            Err(FixFailure::VerifyMismatch { found: None, .. })
        ));
    }

    #[tokio::test]
    async fn test_unmapped_zone_fails_without_touching_store() {
        let mut store = fixture();
        let outcome = Remediator::new(&mut store, TimezoneMapping::builtin())
            .fix_one(&AffectedRow::new(3, "US/Nonexistent"))
            .await;

        assert_eq!(outcome, Err(FixFailure::NoMapping));
        assert_eq!(store.updates_issued(), 0);
    }

    #[tokio::test]
    async fn test_database_error_is_counted_and_run_continues() {
        let mut store = MemoryStore::with_rows([
            (1, "US/Central"),
            (2, "US/Eastern"),
            (3, "US/Pacific"),
        ])
        .failing_on(2);

        let report = Remediator::new(&mut store, TimezoneMapping::builtin())
            .fix_all(RunId::generate())
            .await
            .unwrap();

        assert_eq!(report.counts(), (2, 1));
        assert_eq!(report.failures[0].id, RowId::Int(2));
        assert_eq!(report.failures[0].reason, "database error");
        assert_eq!(store.zone_of(&RowId::Int(1)), Some("America/Chicago"));
        assert_eq!(store.zone_of(&RowId::Int(2)), Some("US/Eastern"));
        assert_eq!(store.zone_of(&RowId::Int(3)), Some("America/Los_Angeles"));
    }

    #[tokio::test]
    async fn test_scan_failure_is_fatal() {
        let mut store = fixture().failing_scan();
        let result = Remediator::new(&mut store, TimezoneMapping::builtin())
            .fix_all(RunId::generate())
            .await;
        assert!(matches!(result, Err(RemediationError::Database(_))));
    }

    #[tokio::test]
    async fn test_every_canonical_value_probes_ok() {
        let mapping = TimezoneMapping::builtin();
        let mut store = MemoryStore::new().resolving(mapping.iter().map(|e| e.canonical));
        let mut remediator = Remediator::new(&mut store, mapping);

        for entry in mapping.iter() {
            assert!(remediator.probe(entry.canonical).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_probe_failure_is_reported_not_raised() {
        let mut store = MemoryStore::new().resolving(["America/Chicago"]);
        let mut remediator = Remediator::new(&mut store, TimezoneMapping::builtin());

        let outcome = remediator.probe("US/Central").await;
        assert!(!outcome.is_ok());
        assert_eq!(outcome.zone(), "US/Central");
        assert!(remediator.probe("America/Chicago").await.is_ok());
    }
}

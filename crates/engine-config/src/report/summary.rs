use crate::error::ReportError;
use chrono::{DateTime, Utc};
use model::{
    core::identifiers::RunId,
    execution::outcome::{FixFailure, FixOutcome},
    records::row::{AffectedRow, RowId},
};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// A row that could not be remediated, kept for manual follow-up.
#[derive(Debug, Clone, Serialize)]
pub struct RowFailure {
    pub id: RowId,
    pub timezone: String,
    pub reason: &'static str,
    pub failure: FixFailure,
}

/// Tally of one remediation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub scanned: usize,
    pub fixed: usize,
    pub failed: usize,
    pub failures: Vec<RowFailure>,
}

impl RunReport {
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            finished_at: None,
            scanned: 0,
            fixed: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, row: &AffectedRow, outcome: &FixOutcome) {
        match outcome {
            Ok(_) => self.fixed += 1,
            Err(failure) => {
                self.failed += 1;
                self.failures.push(RowFailure {
                    id: row.id.clone(),
                    timezone: row.timezone.clone(),
                    reason: failure.reason(),
                    failure: failure.clone(),
                });
            }
        }
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    /// `(fixed, failed)`
    pub fn counts(&self) -> (usize, usize) {
        (self.fixed, self.failed)
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        std::fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), "Run report written");
        Ok(())
    }
}

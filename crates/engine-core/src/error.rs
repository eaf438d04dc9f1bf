use connectors::sql::base::error::{ConnectorError, DbError};
use engine_config::{report::summary::RunReport, settings::error::SettingsError};
use model::core::timezone::MappingError;
use std::path::PathBuf;
use thiserror::Error;

/// Publishing the mapping artifact failed. Database fixes already applied stay committed.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to write mapping artifact to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize mapping artifact: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Top‐level errors for a remediation run.
#[derive(Debug, Error)]
pub enum RemediationError {
    /// Could not open the database connection; nothing was changed.
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectorError),

    /// A store failure outside the per-row fix loop, e.g. the scan query.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Rows were already fixed and committed; the report of that work is kept.
    #[error(
        "Artifact error after remediation (fixed {}, failed {}): {source}",
        .report.fixed,
        .report.failed
    )]
    Artifact {
        report: Box<RunReport>,
        #[source]
        source: ArtifactError,
    },

    #[error("Invalid timezone mapping: {0}")]
    Mapping(#[from] MappingError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

impl RemediationError {
    /// The run report, when the failure happened after the fix loop.
    pub fn report(&self) -> Option<&RunReport> {
        match self {
            RemediationError::Artifact { report, .. } => Some(report.as_ref()),
            _ => None,
        }
    }
}

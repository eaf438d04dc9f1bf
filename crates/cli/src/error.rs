use connectors::sql::base::error::{ConnectorError, DbError};
use engine_config::{error::ReportError, settings::error::SettingsError};
use engine_core::error::{ArtifactError, RemediationError};
use model::core::timezone::MappingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to connect to the database: {0}")]
    Connection(#[from] ConnectorError),

    /// Query failure outside a remediation run (e.g. `scan`).
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Invalid timezone mapping: {0}")]
    Mapping(#[from] MappingError),

    #[error("Remediation failed: {0}")]
    Remediation(#[from] RemediationError),

    #[error("Failed to publish the mapping artifact: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("Failed to write the run report: {0}")]
    Report(#[from] ReportError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

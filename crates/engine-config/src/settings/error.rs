use thiserror::Error;

/// Errors raised while assembling the remediation settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A table or column name that cannot be safely quoted.
    #[error("Invalid SQL identifier: '{0}'")]
    InvalidIdentifier(String),

    #[error("Invalid port '{value}' from {source_name}")]
    InvalidPort { value: String, source_name: String },

    #[error("Invalid ssl mode: {0}")]
    InvalidSslMode(String),

    #[error("Unknown artifact format: {0}")]
    UnknownArtifactFormat(String),

    #[error("Invalid module name for generated artifact: '{0}'")]
    InvalidModuleName(String),

    #[error("Timezone name must not be empty")]
    EmptyTimezone,

    #[error("Artifact path must not be empty")]
    EmptyArtifactPath,
}

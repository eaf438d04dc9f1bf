use crate::settings::{
    artifact::ArtifactSettings,
    error::SettingsError,
    validator::{validate_identifier, validate_module_name, validate_qualified_identifier},
};
use model::execution::{connection::ConnectionSettings, target::TargetTable};

pub mod artifact;
pub mod connection;
pub mod error;
pub mod validator;

/// Zones probed before remediation: the legacy form and its canonical form.
pub const DEFAULT_PROBE_ZONES: &[&str] = &["US/Central", "America/Chicago"];

/// Zone probed after remediation to confirm the canonical form resolves.
pub const DEFAULT_CONFIRM_ZONE: &str = "America/Chicago";

/// Immutable, validated configuration for one remediation run.
#[derive(Debug, Clone)]
pub struct RemediationSettings {
    pub connection: ConnectionSettings,
    pub target: TargetTable,
    pub artifact: ArtifactSettings,
    pub probe_zones: Vec<String>,
    pub confirm_zone: String,
}

impl RemediationSettings {
    pub fn connection(&self) -> &ConnectionSettings {
        &self.connection
    }

    pub fn target(&self) -> &TargetTable {
        &self.target
    }

    pub fn artifact(&self) -> &ArtifactSettings {
        &self.artifact
    }

    pub fn probe_zones(&self) -> &[String] {
        &self.probe_zones
    }

    pub fn confirm_zone(&self) -> &str {
        &self.confirm_zone
    }
}

#[derive(Debug, Default)]
pub struct RemediationSettingsBuilder {
    pub connection: Option<ConnectionSettings>,
    pub target: Option<TargetTable>,
    pub artifact: Option<ArtifactSettings>,
    pub probe_zones: Option<Vec<String>>,
    pub confirm_zone: Option<String>,
}

impl RemediationSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection(mut self, connection: ConnectionSettings) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn target(mut self, target: TargetTable) -> Self {
        self.target = Some(target);
        self
    }

    pub fn artifact(mut self, artifact: ArtifactSettings) -> Self {
        self.artifact = Some(artifact);
        self
    }

    pub fn probe_zones(mut self, zones: Vec<String>) -> Self {
        self.probe_zones = Some(zones);
        self
    }

    pub fn confirm_zone(mut self, zone: impl Into<String>) -> Self {
        self.confirm_zone = Some(zone.into());
        self
    }

    pub fn build(self) -> Result<RemediationSettings, SettingsError> {
        let target = self.target.unwrap_or_default();
        validate_qualified_identifier(&target.table)?;
        validate_identifier(&target.id_column)?;
        validate_identifier(&target.zone_column)?;

        let artifact = self.artifact.unwrap_or_default();
        if artifact.path.as_os_str().is_empty() {
            return Err(SettingsError::EmptyArtifactPath);
        }
        validate_module_name(&artifact.module_name)?;

        let probe_zones = self
            .probe_zones
            .unwrap_or_else(|| DEFAULT_PROBE_ZONES.iter().map(|z| z.to_string()).collect());
        let confirm_zone = self
            .confirm_zone
            .unwrap_or_else(|| DEFAULT_CONFIRM_ZONE.to_string());
        if probe_zones.iter().any(|z| z.trim().is_empty()) || confirm_zone.trim().is_empty() {
            return Err(SettingsError::EmptyTimezone);
        }

        Ok(RemediationSettings {
            connection: self.connection.unwrap_or_default(),
            target,
            artifact,
            probe_zones,
            confirm_zone,
        })
    }
}

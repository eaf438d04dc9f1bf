use crate::settings::error::SettingsError;
use serde::Serialize;
use std::{fmt, path::PathBuf, str::FromStr};

pub const DEFAULT_ARTIFACT_PATH: &str = "lib/memoet/utils/timezone_mapping.ex";
pub const DEFAULT_MODULE_NAME: &str = "Memoet.Utils.TimezoneMapping";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// Elixir module consumed by the web application.
    #[default]
    Elixir,
    Json,
}

impl FromStr for ArtifactFormat {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "elixir" | "ex" => Ok(ArtifactFormat::Elixir),
            "json" => Ok(ArtifactFormat::Json),
            other => Err(SettingsError::UnknownArtifactFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactFormat::Elixir => f.write_str("elixir"),
            ArtifactFormat::Json => f.write_str("json"),
        }
    }
}

/// Where and how the mapping artifact is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactSettings {
    pub path: PathBuf,
    pub format: ArtifactFormat,
    /// Module name for source formats; ignored by `json`.
    pub module_name: String,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            format: ArtifactFormat::default(),
            module_name: DEFAULT_MODULE_NAME.to_string(),
        }
    }
}

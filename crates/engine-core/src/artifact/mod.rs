//! Publishes the timezone table as a data contract for other runtimes.
//!
//! Renderers only turn a [`TimezoneMapping`] into text; writing the file is
//! shared so every format has the same overwrite and failure behaviour.

use crate::error::ArtifactError;
use engine_config::settings::artifact::{ArtifactFormat, ArtifactSettings};
use model::core::timezone::TimezoneMapping;
use std::path::{Path, PathBuf};
use tracing::info;

pub mod elixir;
pub mod json;

pub use elixir::ElixirModule;
pub use json::JsonContract;

pub trait ArtifactRenderer: Send + Sync {
    fn render(&self, mapping: &TimezoneMapping) -> Result<String, ArtifactError>;
}

pub fn renderer_for(settings: &ArtifactSettings) -> Box<dyn ArtifactRenderer> {
    match settings.format {
        ArtifactFormat::Elixir => Box::new(ElixirModule::new(&settings.module_name)),
        ArtifactFormat::Json => Box::new(JsonContract),
    }
}

/// Renders and writes the artifact, replacing any existing file. The parent
/// directory must already exist.
pub async fn emit_mapping_artifact(
    mapping: &TimezoneMapping,
    settings: &ArtifactSettings,
) -> Result<PathBuf, ArtifactError> {
    let contents = renderer_for(settings).render(mapping)?;
    write_artifact(&settings.path, &contents).await?;

    info!(
        "Generated timezone mapping file: {} ({} entries, version {})",
        settings.path.display(),
        mapping.len(),
        mapping.fingerprint()
    );
    Ok(settings.path.clone())
}

async fn write_artifact(path: &Path, contents: &str) -> Result<(), ArtifactError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ArtifactError::Write {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(path: PathBuf, format: ArtifactFormat) -> ArtifactSettings {
        ArtifactSettings {
            path,
            format,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_emit_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timezone_mapping.ex");
        std::fs::write(&path, "stale contents").unwrap();

        let written = emit_mapping_artifact(
            &TimezoneMapping::builtin(),
            &settings(path.clone(), ArtifactFormat::Elixir),
        )
        .await
        .unwrap();

        assert_eq!(written, path);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale contents"));
        assert!(contents.contains("defmodule Memoet.Utils.TimezoneMapping do"));
    }

    #[tokio::test]
    async fn test_emit_json_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timezone_mapping.json");

        emit_mapping_artifact(
            &TimezoneMapping::builtin(),
            &settings(path.clone(), ArtifactFormat::Json),
        )
        .await
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["mapping"]["Canada/Yukon"], "America/Whitehorse");
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("timezone_mapping.ex");

        let err = emit_mapping_artifact(
            &TimezoneMapping::builtin(),
            &settings(path.clone(), ArtifactFormat::Elixir),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ArtifactError::Write { path: p, .. } if p == path));
        assert!(!path.parent().unwrap().exists());
    }
}

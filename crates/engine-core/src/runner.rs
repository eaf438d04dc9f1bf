use crate::{
    artifact::emit_mapping_artifact,
    error::RemediationError,
    remediator::{ProbeOutcome, Remediator},
};
use connectors::sql::base::store::TimezoneStore;
use engine_config::{report::summary::RunReport, settings::RemediationSettings};
use model::core::{identifiers::RunId, timezone::TimezoneMapping};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Everything a completed run produced.
#[derive(Debug, Serialize)]
pub struct RunOutcome {
    pub report: RunReport,
    pub artifact: PathBuf,
    pub initial_probes: Vec<ProbeOutcome>,
    pub confirm_probe: ProbeOutcome,
}

/// Executes the full protocol against an already connected store and then
/// disconnects it, whether or not the run succeeded.
pub async fn run<S: TimezoneStore + ?Sized>(
    store: &mut S,
    settings: &RemediationSettings,
    mapping: TimezoneMapping,
    run_id: RunId,
) -> Result<RunOutcome, RemediationError> {
    let result = execute(store, settings, mapping, run_id).await;
    store.disconnect().await;
    result
}

async fn execute<S: TimezoneStore + ?Sized>(
    store: &mut S,
    settings: &RemediationSettings,
    mapping: TimezoneMapping,
    run_id: RunId,
) -> Result<RunOutcome, RemediationError> {
    mapping.validate()?;
    info!("Remediation run ID: {}", run_id);

    let mut remediator = Remediator::new(store, mapping);

    info!("Testing timezone compatibility...");
    let mut initial_probes = Vec::with_capacity(settings.probe_zones().len());
    for zone in settings.probe_zones() {
        initial_probes.push(remediator.probe(zone).await);
    }

    info!("Fixing invalid timezones...");
    let report = remediator.fix_all(run_id).await?;
    info!(
        fixed = report.fixed,
        failed = report.failed,
        "Remediation finished"
    );

    info!("Generating timezone mapping file...");
    let artifact = match emit_mapping_artifact(&mapping, settings.artifact()).await {
        Ok(path) => path,
        Err(source) => {
            return Err(RemediationError::Artifact {
                report: Box::new(report),
                source,
            });
        }
    };

    info!("Testing fixed timezone...");
    let confirm_probe = remediator.probe(settings.confirm_zone()).await;

    Ok(RunOutcome {
        report,
        artifact,
        initial_probes,
        confirm_probe,
    })
}

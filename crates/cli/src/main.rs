use crate::{
    commands::{ArtifactArgs, Commands, ConnectionArgs},
    env::EnvManager,
    error::CliError,
};
use clap::Parser;
use connectors::sql::{base::store::TimezoneStore, postgres::adapter::PgStore};
use engine_config::settings::{
    RemediationSettings, RemediationSettingsBuilder,
    artifact::{ArtifactFormat, ArtifactSettings},
    connection::{ConnectionOverrides, resolve_connection},
    error::SettingsError,
};
use engine_core::{
    artifact::{ArtifactRenderer, JsonContract, emit_mapping_artifact},
    error::RemediationError,
    remediator::Remediator,
    runner::{self, RunOutcome},
};
use model::{
    core::{identifiers::RunId, timezone::TimezoneMapping},
    execution::target::TargetTable,
};
use std::{path::Path, process::ExitCode};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod env;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "tz-remediator",
    version,
    about = "Rewrites legacy timezone identifiers to their canonical IANA names"
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<(), CliError> {
    let mapping = TimezoneMapping::builtin();

    match cli.command {
        Commands::Run { artifact, report } => {
            let settings = build_settings(&cli.connection, Some(&artifact))?;
            let run_id = RunId::generate();
            let mut store = connect(&settings).await?;

            let outcome = runner::run(&mut store, &settings, mapping, run_id).await;
            finish_run(outcome, report.as_deref())?;
        }
        Commands::Scan { json } => {
            let settings = build_settings(&cli.connection, None)?;
            let mut store = connect(&settings).await?;

            let rows = Remediator::new(&mut store, mapping).scan().await;
            store.disconnect().await;
            output::print_rows(&rows?, json)?;
        }
        Commands::Probe { zones } => {
            let settings = build_settings(&cli.connection, None)?;
            let mut store = connect(&settings).await?;

            let mut remediator = Remediator::new(&mut store, mapping);
            let mut probes = Vec::with_capacity(zones.len());
            for zone in &zones {
                probes.push(remediator.probe(zone).await);
            }
            store.disconnect().await;
            probes.iter().for_each(output::print_probe);
        }
        Commands::EmitMapping { artifact } => {
            mapping.validate()?;
            let settings = artifact_settings(&artifact)?;
            let path = emit_mapping_artifact(&mapping, &settings).await?;
            println!("Mapping written to {}", path.display());
        }
        Commands::Mapping { json } => {
            if json {
                print!("{}", JsonContract.render(&mapping)?);
            } else {
                output::print_mapping(&mapping);
            }
        }
    }

    Ok(())
}

/// Prints and saves the run report, also when the run failed after its fixes
/// were committed, then surfaces the run error.
fn finish_run(
    outcome: Result<RunOutcome, RemediationError>,
    report_path: Option<&Path>,
) -> Result<(), CliError> {
    let report = match &outcome {
        Ok(outcome) => {
            output::print_summary(outcome);
            Some(&outcome.report)
        }
        Err(err) => {
            if let Some(report) = err.report() {
                output::print_report(report);
            }
            err.report()
        }
    };

    if let (Some(report), Some(path)) = (report, report_path) {
        output::write_report(report, path)?;
    }

    outcome?;
    Ok(())
}

async fn connect(settings: &RemediationSettings) -> Result<PgStore, CliError> {
    info!("Connecting to database {}", settings.connection().describe());
    let store = PgStore::connect(settings.connection(), settings.target()).await?;
    Ok(store)
}

fn build_settings(
    args: &ConnectionArgs,
    artifact: Option<&ArtifactArgs>,
) -> Result<RemediationSettings, CliError> {
    let mut env = EnvManager::new();
    if let Some(path) = &args.env_file {
        env.load_from_file(path)?;
    }
    debug!(vars = ?env.describe("DATABASE_"), "Resolved environment");

    let connection = resolve_connection(env.all(), connection_overrides(args)?)?;
    let mut builder = RemediationSettingsBuilder::new()
        .connection(connection)
        .target(TargetTable::new(
            &args.table,
            &args.id_column,
            &args.zone_column,
        ));
    if let Some(artifact) = artifact {
        builder = builder.artifact(artifact_settings(artifact)?);
    }

    Ok(builder.build()?)
}

fn connection_overrides(args: &ConnectionArgs) -> Result<ConnectionOverrides, SettingsError> {
    let port = args
        .port
        .as_deref()
        .map(|raw| {
            raw.trim().parse::<u16>().map_err(|_| SettingsError::InvalidPort {
                value: raw.to_string(),
                source_name: "--port".to_string(),
            })
        })
        .transpose()?;

    Ok(ConnectionOverrides {
        host: args.host.clone(),
        port,
        database: args.database.clone(),
        user: args.user.clone(),
        password: args.password.clone(),
        ssl_mode: args.sslmode.clone(),
    })
}

fn artifact_settings(args: &ArtifactArgs) -> Result<ArtifactSettings, SettingsError> {
    let format = args.format.parse::<ArtifactFormat>()?;
    Ok(ArtifactSettings {
        path: args.artifact_path.clone(),
        format,
        module_name: args.module.clone(),
    })
}

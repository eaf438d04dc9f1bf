use clap::{Args, Subcommand};
use engine_config::settings::artifact::{DEFAULT_ARTIFACT_PATH, DEFAULT_MODULE_NAME};
use model::execution::target::{DEFAULT_ID_COLUMN, DEFAULT_TABLE, DEFAULT_ZONE_COLUMN};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Fix legacy timezones, publish the mapping and confirm the result
    Run {
        #[command(flatten)]
        artifact: ArtifactArgs,

        #[arg(long, help = "Also write the run report as JSON to this file")]
        report: Option<PathBuf>,
    },
    /// List rows holding a legacy timezone without changing anything
    Scan {
        #[arg(long, help = "Print the affected rows as JSON")]
        json: bool,
    },
    /// Check that the server resolves the given zone names
    Probe {
        #[arg(long = "zone", required = true, num_args = 1..)]
        zones: Vec<String>,
    },
    /// Write the mapping artifact without touching the database
    EmitMapping {
        #[command(flatten)]
        artifact: ArtifactArgs,
    },
    /// Print the built-in timezone table
    Mapping {
        #[arg(long, help = "Print the table as the JSON contract")]
        json: bool,
    },
}

/// Database and target table, shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Parsed later so a bad value is a configuration error like `DATABASE_PORT`.
    #[arg(long, global = true)]
    pub port: Option<String>,

    #[arg(long, global = true)]
    pub database: Option<String>,

    #[arg(long, global = true)]
    pub user: Option<String>,

    #[arg(long, global = true)]
    pub password: Option<String>,

    #[arg(long, global = true, help = "disable, prefer or require")]
    pub sslmode: Option<String>,

    #[arg(long, global = true, help = "Load variables from a .env style file")]
    pub env_file: Option<PathBuf>,

    #[arg(long, global = true, default_value = DEFAULT_TABLE)]
    pub table: String,

    #[arg(long, global = true, default_value = DEFAULT_ID_COLUMN)]
    pub id_column: String,

    #[arg(long, global = true, default_value = DEFAULT_ZONE_COLUMN)]
    pub zone_column: String,
}

#[derive(Args, Debug)]
pub struct ArtifactArgs {
    #[arg(long, default_value = DEFAULT_ARTIFACT_PATH)]
    pub artifact_path: PathBuf,

    #[arg(long, default_value = "elixir", help = "elixir or json")]
    pub format: String,

    #[arg(long, default_value = DEFAULT_MODULE_NAME)]
    pub module: String,
}

//! # visits-cli
//!
//! Command-line demos that seed the `visits` table on a MySQL server.
//! `managed` targets a pre-provisioned managed database; `vm` targets a
//! self-hosted server and bootstraps the database first. Both read
//! their settings from the environment, optionally topped up from a
//! dotenv file.

mod demo;
mod report;

use clap::Parser;
use tracing::debug;

use visits_db::Target;

#[derive(Parser)]
#[command(name = "visits")]
#[command(about = "Seed the visits table on a MySQL server")]
#[command(version)]
struct Cli {
    /// Dotenv file read before the environment is consulted
    #[arg(long, default_value = ".env")]
    env_file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Seed a managed MySQL database (reads the MAN_DB_* variables)
    Managed,
    /// Bootstrap a database on a MySQL VM and seed it (reads the VM_DB_* variables)
    Vm,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Variables already present in the environment win over the file;
    // a missing file is fine.
    if let Err(err) = dotenvy::from_filename(&cli.env_file) {
        debug!(path = %cli.env_file, error = %err, "no dotenv file loaded");
    }

    match cli.command {
        Commands::Managed => demo::run(Target::Managed).await,
        Commands::Vm => demo::run(Target::Vm).await,
    }
}

mod search;
mod validate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::search::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "motorscout-cli")]
#[command(about = "Search vehicle listings and validate history checks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search a listings snapshot and print one page of results
    Search(SearchArgs),
    /// Check a vehicle history report for contradictions
    Validate {
        /// JSON array of history checks
        #[arg(long)]
        checks: std::path::PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = motorscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Search(args) => search::run_search(&config, &args).await?,
        Commands::Validate { checks } => validate::run_validate(&checks)?,
    }

    Ok(())
}

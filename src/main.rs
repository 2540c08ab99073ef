//! Maxi-Market main entry point
//!
//! Command-line interface for the daily market jobs and the weekly backup.

use clap::{Parser, Subcommand};
use maxi_market::config::load_config;
use maxi_market::jobs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Maxi-Market: athlete-market scraper and database updater
///
/// Crawls the athlete transfer market of the game site, converts its pages
/// into typed records, and merges them into durable CSV databases.
#[derive(Parser, Debug)]
#[command(name = "maxi-market")]
#[command(version)]
#[command(about = "Athlete-market scraper and database updater", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the free-agent market and merge results into the athlete database
    Roster,

    /// Snapshot the open transfer market and record completed transfers
    Transfers,

    /// Copy both databases to the weekly backup location
    Backup,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let outcome = match cli.command {
        Command::Roster => jobs::roster::run(&config).await,
        Command::Transfers => jobs::transfers::run(&config).await,
        Command::Backup => jobs::backup::run(&config),
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("maxi_market=info,warn"),
            1 => EnvFilter::new("maxi_market=debug,info"),
            2 => EnvFilter::new("maxi_market=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

mod commands;
mod config;
mod render;
mod scrape;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::RunArgs;
use config::MatchdayConfig;

#[derive(Parser)]
#[command(name = "matchday")]
#[command(about = "Keep your calendar in sync with a stadium's match schedule")]
struct Cli {
    /// Config file (defaults to ~/.config/matchday/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate with Google Calendar
    Auth,
    /// Add every scheduled match that is not in the calendar yet
    Sync(RunArgs),
    /// Show which scheduled matches are missing from the calendar
    Status(RunArgs),
    /// Print the dates found in the given text fragments
    Parse {
        /// Fragments to parse, e.g. "15/2 19:30"
        #[arg(required = true)]
        fragments: Vec<String>,

        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print the dates as a JSON array
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Auth => commands::auth::run().await,
        Commands::Sync(args) => {
            let cfg = MatchdayConfig::load(cli.config.as_deref())?;
            commands::sync::run(cfg, args).await
        }
        Commands::Status(args) => {
            let cfg = MatchdayConfig::load(cli.config.as_deref())?;
            commands::status::run(cfg, args).await
        }
        Commands::Parse {
            fragments,
            today,
            json,
        } => {
            let cfg = MatchdayConfig::load(cli.config.as_deref())?;
            commands::parse::run(cfg, fragments, today, json)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter =
        format!("warn,matchday={level},matchday_core={level},matchday_google={level}");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

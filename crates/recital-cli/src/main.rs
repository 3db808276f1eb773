//! Recital CLI - Command-line interface for the recital planner
//!
//! Provides commands for:
//! - Listing quick-change conflicts in a recital schedule
//! - Showing per-dancer conflict badges
//! - Recommending costume sizes
//! - Backstage check-in
//! - Viewing and editing configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use recital_core::config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    badges::BadgesCommand, check_in::CheckInCommand, completions::CompletionsCommand,
    config::ConfigCommand, conflicts::ConflictsCommand, sizes::SizesCommand,
};
use output::{CommandContext, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name = "recital",
    version,
    about = "Schedule conflict checks and costume planning for dance recitals"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List quick-change conflicts in a recital schedule
    Conflicts(ConflictsCommand),
    /// Show dancers with scheduling conflicts
    Badges(BadgesCommand),
    /// Recommend costume sizes from measurements
    Sizes(SizesCommand),
    /// Set a dancer's backstage status
    CheckIn(CheckInCommand),
    /// View and manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Tracing filter: `RUST_LOG` wins, then `-v`, then `--quiet`, then the
/// configured level
fn log_filter(verbose: u8, quiet: bool, configured: &str) -> String {
    match verbose {
        0 if quiet => "error".to_string(),
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path);

    // Setup tracing
    let filter = log_filter(cli.verbose, cli.quiet, &config.logging.level);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let ctx = CommandContext {
        format,
        quiet: cli.quiet,
        config,
        config_path,
    };

    match cli.command {
        Commands::Conflicts(cmd) => cmd.execute(&ctx).await,
        Commands::Badges(cmd) => cmd.execute(&ctx).await,
        Commands::Sizes(cmd) => cmd.execute(&ctx).await,
        Commands::CheckIn(cmd) => cmd.execute(&ctx).await,
        Commands::Config(cmd) => cmd.execute(&ctx).await,
        Commands::Completions(cmd) => cmd.execute(&ctx).await,
    }
}

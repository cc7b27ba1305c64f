//! lcdeath CLI — terminal questionnaire for lung cancer cause-of-death
//! classification.
//!
//! Provides an interactive mode and scripted subcommands.

mod commands;
mod questionnaire;

use clap::Parser;
use lcdeath_core::Topology;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Classify a death with respect to lung cancer, following Horeweg et al. (2012)
#[derive(Parser, Debug)]
#[command(name = "lcdeath", version, about, long_about = None)]
struct Cli {
    /// Tree topology: detailed or collapsed (overrides configuration)
    #[arg(short, long, global = true)]
    topology: Option<Topology>,

    /// Workspace directory
    #[arg(short, long, default_value = ".", global = true)]
    workspace: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Subcommand (starts the interactive questionnaire if omitted)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Classify from scripted answers, e.g. `interventionDeath=yes interventionForLC=no`
    Classify {
        /// Answers as question=answer pairs, in the order the questions are asked
        #[arg(required = true)]
        steps: Vec<String>,
        /// Print the full session report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the questions of the selected topology
    Questions,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Create a default .lcdeath/config.toml in the workspace
    Init,
    /// Show the merged configuration
    Show,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // The questionnaire draws on the terminal, so stderr stays quiet by default.
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    // JSON file layer for structured logging
    let log_dir = directories::ProjectDirs::from("org", "lcdeath", "lcdeath")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "lcdeath.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut config = lcdeath_core::load_validated(Some(&workspace), None)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    // Apply CLI overrides
    if let Some(topology) = cli.topology {
        config.engine.topology = topology;
    }

    match cli.command {
        Some(command) => commands::handle_command(command, &config, &workspace),
        None => questionnaire::run(&config),
    }
}

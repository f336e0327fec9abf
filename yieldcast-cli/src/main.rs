//! Yieldcast CLI: inspect forecast adjustments and accuracy from the terminal.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Yieldcast: blend, score and compare dairy-yield forecasts
#[derive(Parser, Debug)]
#[command(name = "yieldcast", version, about, long_about = None)]
struct Cli {
    /// Workspace directory
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for JSON log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List the factor weight table in iteration order
    Factors,
    /// Show metrics of the unadjusted reference model
    Baseline {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a factor selection and summarize its metrics
    Evaluate {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the derived series for a factor selection
    Series {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug, Default)]
struct SelectionArgs {
    /// Enable a factor (repeatable). Any use starts from an empty selection.
    #[arg(short, long = "enable", value_name = "FACTOR")]
    enable: Vec<String>,
    /// Disable a factor (repeatable)
    #[arg(short, long = "disable", value_name = "FACTOR")]
    disable: Vec<String>,
    /// Start from no factors enabled
    #[arg(long)]
    none: bool,
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Create default configuration file
    Init,
    /// Show current configuration
    Show,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Human-readable layer for stderr (always active)
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    // JSON file layer, only when a log directory is given
    let mut _guard = None;
    let json_layer = match &cli.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::daily(dir, "yieldcast.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            _guard = Some(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut stdout = std::io::stdout().lock();
    commands::handle_command(cli.command, &workspace, cli.config.as_deref(), &mut stdout)
}

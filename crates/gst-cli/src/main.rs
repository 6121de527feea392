//! # gst CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gst_cli::config::{run_config, ConfigArgs};
use gst_cli::env::EnvSource;
use gst_cli::keep_alive::{run_keep_alive, KeepAliveArgs};
use gst_cli::tax::{run_tax, TaxArgs};

/// GST tax provider toolchain.
///
/// Selects Indian GST tax lines (CGST/SGST or IGST) for orders, validates the
/// platform configuration, and runs the scheduled keep-alive ping.
#[derive(Parser, Debug)]
#[command(name = "gst", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load environment variables from this file instead of `./.env`.
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Select GST tax lines for an order read from a JSON or YAML file.
    Tax(TaxArgs),

    /// Validate the platform configuration from the environment.
    Config(ConfigArgs),

    /// Ping the keep-alive endpoints on a fixed interval.
    KeepAlive(KeepAliveArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The keep-alive job reports each ping at info level.
    let base = u8::from(matches!(cli.command, Commands::KeepAlive(_)));
    let filter = match cli.verbose.saturating_add(base) {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    tracing::debug!("gst CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = EnvSource::load(cli.env_file.as_deref(), Path::new(".")).and_then(|env| {
        match &cli.command {
            Commands::Tax(args) => run_tax(args, &env),
            Commands::Config(args) => run_config(args, &env),
            Commands::KeepAlive(args) => run_keep_alive(args, &env),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

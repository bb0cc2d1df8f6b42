//! Hydro CLI - Frequency Analysis and Reference Evapotranspiration
//!
//! This is the command-line entry point for the hydro workspace.
//!
//! # Commands
//!
//! - `hydro pearson3 <density|cdf|quantile|sample|return-level>` - Pearson Type III distribution
//! - `hydro et0 <penman-monteith|hargreaves>` - FAO-56 reference evapotranspiration
//! - `hydro check` - Show configuration and run numerical self-checks
//!
//! # Configuration
//!
//! Settings are resolved from CLI flags, then `HYDRO_*` environment
//! variables, then a TOML file (`--config`, or `hydro.toml` if present),
//! then defaults. `RUST_LOG` overrides the configured log level.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::et0::Et0Command;
use commands::pearson3::Pearson3Command;
use config::{build_config, CliArgs, HydroConfig};

/// Pearson III frequency analysis and FAO-56 evapotranspiration
#[derive(Parser)]
#[command(name = "hydro")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pearson Type III distribution
    #[command(subcommand)]
    Pearson3(Pearson3Command),

    /// Reference evapotranspiration
    #[command(subcommand)]
    Et0(Et0Command),

    /// Check configuration and numerical accuracy
    Check,
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        CliArgs {
            config_file: cli.config.clone(),
            log_level: cli.log_level.clone(),
            verbose: cli.verbose,
            output: cli.format.clone(),
            seed: None,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn dispatch(command: &Commands, config: &HydroConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match command {
        Commands::Pearson3(command) => commands::pearson3::run(command, config, &mut out)?,
        Commands::Et0(command) => commands::et0::run(command, config, &mut out)?,
        Commands::Check => commands::check::run(config, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&CliArgs::from(&cli)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", CliError::from(e));
            return ExitCode::FAILURE;
        }
    };

    // Initialise tracing
    init_tracing(config.log_level.as_filter_str());
    info!(
        log_level = %config.log_level,
        output = %config.output,
        longwave = %config.longwave,
        "Configuration loaded"
    );
    debug!(?config, "Effective configuration");

    match dispatch(&cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

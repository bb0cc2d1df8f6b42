//! CLI error type.

use hydro_fao56::Fao56Error;
use hydro_stats::distributions::DistributionError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `hydro` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pearson III parameter or probability error.
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    /// FAO-56 input error.
    #[error("FAO-56 error: {0}")]
    Fao56(#[from] Fao56Error),

    /// Argument combination not accepted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// One or more `hydro check` diagnostics failed.
    #[error("Self-check failed: {0}")]
    CheckFailed(String),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering failed.
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV rendering failed.
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

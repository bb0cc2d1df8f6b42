//! CLI configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use hydro_fao56::LongwaveMethod;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Configuration file read when `--config` is not given and the file exists.
pub const DEFAULT_CONFIG_FILE: &str = "hydro.toml";

/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "HYDRO_LOG_LEVEL";
/// Environment variable overriding the sampling seed.
pub const ENV_SEED: &str = "HYDRO_SEED";
/// Environment variable overriding the output format.
pub const ENV_OUTPUT: &str = "HYDRO_OUTPUT";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidOutputFormat(String),

    #[error("Invalid seed: {0}. Must be an unsigned 64-bit integer")]
    InvalidSeed(String),

    #[error("Invalid longwave method: {0}. Must be one of: fao56, brutsaert, swinbank, idso-jackson")]
    InvalidLongwaveMethod(String),

    #[error("Invalid dew point offset: {0}. Must be a finite, non-negative temperature difference")]
    InvalidDewPointOffset(f64),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HydroConfig {
    /// Log level used when `RUST_LOG` is not set
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_output_format")]
    pub output: OutputFormat,
    /// Seed for `pearson3 sample`; entropy when absent
    pub seed: Option<u64>,
    /// Net emissivity formulation used by `et0 penman-monteith`
    #[serde(deserialize_with = "deserialize_longwave")]
    pub longwave: LongwaveMethod,
    /// Dew point depression below Tmin when no humidity data are given (°C)
    pub dew_point_offset: f64,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_output_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_longwave<'de, D>(deserializer: D) -> Result<LongwaveMethod, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LongwaveMethod::from_str(&s)
        .map_err(|_| serde::de::Error::custom(ConfigError::InvalidLongwaveMethod(s.clone())))
}

impl Default for HydroConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            output: OutputFormat::Table,
            seed: None,
            longwave: LongwaveMethod::Fao56,
            dew_point_offset: 0.0,
        }
    }
}

impl HydroConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: HydroConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Override fields from process environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Override fields from an environment lookup
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = Some(parse_seed(&seed)?);
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            self.output = OutputFormat::from_str(&output)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(output) = &cli.output {
            self.output = OutputFormat::from_str(output)?;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dew_point_offset.is_finite() && self.dew_point_offset >= 0.0) {
            return Err(ConfigError::InvalidDewPointOffset(self.dew_point_offset));
        }
        Ok(())
    }
}

fn parse_seed(s: &str) -> Result<u64, ConfigError> {
    s.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSeed(s.to_string()))
}

/// CLI arguments relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Shorthand for the debug log level
    pub verbose: bool,
    /// Output format override
    pub output: Option<String>,
    /// Seed override
    pub seed: Option<u64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<HydroConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => HydroConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            HydroConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => HydroConfig::default(),
    };

    config.apply_env()?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = HydroConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.output, OutputFormat::Table);
        assert_eq!(config.seed, None);
        assert_eq!(config.longwave, LongwaveMethod::Fao56);
        assert_eq!(config.dew_point_offset, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert!(OutputFormat::from_str("xml").is_err());
        assert_eq!(format!("{}", OutputFormat::Json), "json");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = HydroConfig::default();
        config
            .apply_env_from(lookup(&[
                (ENV_LOG_LEVEL, "info"),
                (ENV_SEED, "42"),
                (ENV_OUTPUT, "csv"),
            ]))
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.output, OutputFormat::Csv);
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = HydroConfig::default();
        let err = config
            .apply_env_from(lookup(&[(ENV_SEED, "minus one")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeed(_)));
    }

    #[test]
    fn test_cli_takes_precedence_over_env() {
        let mut config = HydroConfig::default();
        config
            .apply_env_from(lookup(&[(ENV_OUTPUT, "csv"), (ENV_SEED, "1")]))
            .unwrap();
        let cli = CliArgs {
            output: Some("json".to_string()),
            seed: Some(7),
            verbose: true,
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"
            output = "json"
            seed = 2024
            longwave = "idso-jackson"
            dew_point_offset = 2.0
        "#;

        let config: HydroConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.seed, Some(2024));
        assert_eq!(config.longwave, LongwaveMethod::IdsoJackson);
        assert_eq!(config.dew_point_offset, 2.0);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: HydroConfig = toml::from_str("output = \"csv\"").unwrap();
        // Should use defaults for unspecified fields
        assert_eq!(config.output, OutputFormat::Csv);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.longwave, LongwaveMethod::Fao56);
    }

    #[test]
    fn test_invalid_toml_value() {
        assert!(toml::from_str::<HydroConfig>("longwave = \"stefan\"").is_err());
    }

    #[test]
    fn test_validate_dew_point_offset() {
        let config = HydroConfig {
            dew_point_offset: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDewPointOffset(_))
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/hydro.toml")),
            ..Default::default()
        };
        assert!(matches!(build_config(&cli), Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidLogLevel("bad".to_string());
        assert!(err.to_string().contains("Invalid log level"));

        let err = ConfigError::InvalidOutputFormat("bad".to_string());
        assert!(err.to_string().contains("Invalid output format"));
    }
}

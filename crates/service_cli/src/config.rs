//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command line arguments.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`UPIN_*`)
//! 3. Config file
//! 4. Default values

use pricer_mc::mc::{UpAndInCallParams, DEFAULT_PATHS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "upin.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidFormat(String),

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
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
            "warn" => Ok(LogLevel::Warn),
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

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_from_str")]
    pub format: OutputFormat,
    /// Number of Monte Carlo paths
    pub paths: usize,
    /// Seed for reproducible runs; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Contract and market parameters
    pub contract: UpAndInCallParams,
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr<Err = ConfigError>,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            format: OutputFormat::Table,
            paths: DEFAULT_PATHS,
            seed: None,
            contract: UpAndInCallParams::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(log_level) = lookup("UPIN_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&log_level)?;
        }

        if let Some(format) = lookup("UPIN_FORMAT") {
            self.format = OutputFormat::from_str(&format)?;
        }

        if let Some(paths) = lookup("UPIN_PATHS") {
            self.paths = paths.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "UPIN_PATHS",
                value: paths.clone(),
            })?;
        }

        if let Some(seed) = lookup("UPIN_SEED") {
            self.seed = Some(seed.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "UPIN_SEED",
                value: seed.clone(),
            })?);
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        } else if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(format) = &cli.format {
            self.format = OutputFormat::from_str(format)?;
        }
        if let Some(paths) = cli.paths {
            self.paths = paths;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        cli.contract.apply(&mut self.contract);
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths == 0 {
            return Err(ConfigError::Validation("paths must be at least 1".to_string()));
        }

        self.contract
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }
}

/// Per-field contract overrides from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContractOverrides {
    pub expiry: Option<f64>,
    pub strike: Option<f64>,
    pub spot: Option<f64>,
    pub volatility: Option<f64>,
    pub rate: Option<f64>,
    pub barrier: Option<f64>,
}

impl ContractOverrides {
    /// Overwrite every field that was given
    pub fn apply(&self, params: &mut UpAndInCallParams) {
        let fields = [
            (self.expiry, &mut params.expiry),
            (self.strike, &mut params.strike),
            (self.spot, &mut params.spot),
            (self.volatility, &mut params.volatility),
            (self.rate, &mut params.rate),
            (self.barrier, &mut params.barrier),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Verbose flag (debug logging unless a level is given)
    pub verbose: bool,
    /// Log level override
    pub log_level: Option<String>,
    /// Output format override
    pub format: Option<String>,
    /// Path count override
    pub paths: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Contract overrides
    pub contract: ContractOverrides,
}

/// Build configuration from all sources
pub fn build_config(cli: &CliOverrides) -> Result<CliConfig, ConfigError> {
    let mut config = load_file_config(cli.config_file.as_deref())?;
    config.apply_env()?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}

/// An explicitly named file must exist; the default file is optional.
fn load_file_config(path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    match path {
        Some(path) => CliConfig::from_file(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                CliConfig::from_file(default_path)
            } else {
                Ok(CliConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.paths, 10_000);
        assert_eq!(config.seed, None);
        assert_eq!(config.contract, UpAndInCallParams::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("csv").is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_partial_toml() {
        let config = CliConfig::from_toml_str(
            r#"
            log_level = "WARN"
            seed = 7

            [contract]
            barrier = 125.0
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.paths, DEFAULT_PATHS);
        assert_eq!(config.contract.barrier, 125.0);
        assert_eq!(config.contract.spot, 120.0);
    }

    #[test]
    fn test_invalid_toml_values() {
        assert!(CliConfig::from_toml_str("format = \"xml\"").is_err());
        assert!(CliConfig::from_toml_str("paths = \"many\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "paths = 50000\nformat = \"json\"").unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(config.paths, 50_000);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let cli = CliOverrides {
            config_file: Some(missing),
            ..Default::default()
        };
        assert!(matches!(build_config(&cli), Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("UPIN_LOG_LEVEL", "error"),
            ("UPIN_FORMAT", "json"),
            ("UPIN_PATHS", "2500"),
            ("UPIN_SEED", " 99 "),
        ]);
        let mut config = CliConfig::default();
        config.apply_env_with(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.paths, 2_500);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_invalid_env_value() {
        let vars = env(&[("UPIN_PATHS", "lots")]);
        let mut config = CliConfig::default();
        let result = config.apply_env_with(|k| vars.get(k).cloned());

        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv { var: "UPIN_PATHS", .. })
        ));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let vars = env(&[("UPIN_PATHS", "2500"), ("UPIN_SEED", "1")]);
        let mut config = CliConfig::default();
        config.apply_env_with(|k| vars.get(k).cloned()).unwrap();

        let cli = CliOverrides {
            paths: Some(40_000),
            seed: Some(2),
            format: Some("json".to_string()),
            contract: ContractOverrides {
                spot: Some(130.0),
                volatility: Some(0.3),
                ..Default::default()
            },
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.paths, 40_000);
        assert_eq!(config.seed, Some(2));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.contract.spot, 130.0);
        assert_eq!(config.contract.volatility, 0.3);
        assert_eq!(config.contract.strike, 100.0);
    }

    #[test]
    fn test_verbose_sets_debug_unless_level_given() {
        let mut config = CliConfig::default();
        config
            .merge_with_cli(&CliOverrides {
                verbose: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);

        let mut config = CliConfig::default();
        config
            .merge_with_cli(&CliOverrides {
                verbose: true,
                log_level: Some("trace".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Trace);
    }

    #[test]
    fn test_large_path_count_is_valid() {
        let vars = env(&[("UPIN_PATHS", "50000000")]);
        let mut config = CliConfig::default();
        config.apply_env_with(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.paths, 50_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let config = CliConfig {
            paths: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = CliConfig {
            contract: UpAndInCallParams::default().with_volatility(-1.0),
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::Validation(msg)) => assert!(msg.contains("volatility")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}

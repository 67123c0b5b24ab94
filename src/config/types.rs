//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::limits::LimitsConfig;
use super::source::SourceConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "config_io_error",
            Self::Parse(_) => "config_parse_error",
        }
    }
}

/// Statistics run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Aggregator capacities.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Ingestion behavior.
    #[serde(default)]
    pub ingest: IngestConfig,
    /// Reporting and snapshot output.
    #[serde(default)]
    pub output: OutputConfig,
    /// Log files to read, in order.
    #[serde(default)]
    pub source: Vec<SourceConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Ingestion configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Credit streaks still running when the last source ends (default: true).
    #[serde(default = "default_true")]
    pub credit_open_streaks: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            credit_open_streaks: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON snapshot to write after ingestion.
    pub snapshot: Option<String>,
    /// Leaderboard entries shown per summary line (default: 5).
    #[serde(default = "default_report_top")]
    pub report_top: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            snapshot: None,
            report_top: default_report_top(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_report_top() -> usize {
    5
}

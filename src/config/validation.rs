//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use slirc_log::LogFormat;
use std::path::Path;
use thiserror::Error;

/// Largest accepted value for any `[limits]` entry.
///
/// Every channel and user carries its own boards and quote buffer.
pub const MAX_LIMIT: usize = 10_000;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("at least one [[source]] block is required")]
    NoSources,
    #[error("source {0}: network is required")]
    MissingNetwork(usize),
    #[error("source {0}: channel is required")]
    MissingChannel(usize),
    #[error("source {index}: unknown log format '{format}'")]
    UnknownFormat { index: usize, format: String },
    #[error("source {index}: file does not exist: {file}")]
    SourceNotFound { index: usize, file: String },
    #[error("output.snapshot parent directory does not exist: {0}")]
    SnapshotPathInvalid(String),
    #[error("limits.{name} must be at most {}, got {value}", MAX_LIMIT)]
    LimitOutOfRange { name: &'static str, value: usize },
}

impl ValidationError {
    /// Get a static error code string for log labeling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoSources => "no_sources",
            Self::MissingNetwork(_) => "missing_network",
            Self::MissingChannel(_) => "missing_channel",
            Self::UnknownFormat { .. } => "unknown_format",
            Self::SourceNotFound { .. } => "source_not_found",
            Self::SnapshotPathInvalid(_) => "snapshot_path_invalid",
            Self::LimitOutOfRange { .. } => "limit_out_of_range",
        }
    }
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.source.is_empty() {
        errors.push(ValidationError::NoSources);
    }

    for (index, source) in config.source.iter().enumerate() {
        if source.network.is_empty() {
            errors.push(ValidationError::MissingNetwork(index));
        }
        if source.channel.is_empty() {
            errors.push(ValidationError::MissingChannel(index));
        }
        if LogFormat::from_name(&source.format).is_none() {
            errors.push(ValidationError::UnknownFormat {
                index,
                format: source.format.clone(),
            });
        }
        if !Path::new(&source.file).exists() {
            errors.push(ValidationError::SourceNotFound {
                index,
                file: source.file.clone(),
            });
        }
    }

    let limits = &config.limits;
    for (name, value) in [
        ("top_words", limits.top_words),
        ("top_urls", limits.top_urls),
        ("top_streaks", limits.top_streaks),
        ("quotes", limits.quotes),
    ] {
        if value > MAX_LIMIT {
            errors.push(ValidationError::LimitOutOfRange { name, value });
        }
    }

    // Snapshot path validation
    if let Some(ref snapshot) = config.output.snapshot {
        let path = Path::new(snapshot);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            errors.push(ValidationError::SnapshotPathInvalid(snapshot.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

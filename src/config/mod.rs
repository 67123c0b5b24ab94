//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, IngestConfig, OutputConfig)
//! - [`limits`]: Aggregator capacity configuration (LimitsConfig)
//! - [`source`]: Log source blocks (SourceConfig)
//! - [`validation`]: Startup checks over a loaded config

mod limits;
mod source;
mod types;
pub mod validation;

pub use limits::LimitsConfig;
pub use source::SourceConfig;
pub use types::{Config, ConfigError, IngestConfig, OutputConfig};

//! Unified error handling for slirc-stats.
//!
//! This module provides the error hierarchy for the statistics registry
//! and the ingestion pipeline, with static codes for log labeling.

use thiserror::Error;

// ============================================================================
// Registry Errors
// ============================================================================

/// Errors raised by the statistics registry.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("no such network: {0}")]
    NetworkNotFound(String),

    #[error("no such channel on {network}: {channel}")]
    ChannelNotFound { network: String, channel: String },

    #[error("no such user on {network}: {nick}")]
    UserNotFound { network: String, nick: String },

    /// Name indexes were dropped (or never built after a reload).
    #[error("name index not built for {network}")]
    IndexNotBuilt { network: String },

    /// An ID list references an entity the registry does not hold.
    #[error("dangling {kind} id {id}")]
    DanglingId { kind: &'static str, id: u64 },

    /// A counter would reissue an ID the registry already holds.
    #[error("{kind} id counter at {next} is not ahead of stored id {highest}")]
    StaleCounter {
        kind: &'static str,
        next: u64,
        highest: u64,
    },

    /// The event violates the ingestion contract.
    #[error("event is missing its {0}")]
    MissingField(&'static str),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StatsError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NetworkNotFound(_) => "network_not_found",
            Self::ChannelNotFound { .. } => "channel_not_found",
            Self::UserNotFound { .. } => "user_not_found",
            Self::IndexNotBuilt { .. } => "index_not_built",
            Self::DanglingId { .. } => "dangling_id",
            Self::StaleCounter { .. } => "stale_counter",
            Self::MissingField(_) => "missing_field",
            Self::Snapshot(_) => "snapshot_error",
            Self::Io(_) => "io_error",
        }
    }

    /// Whether this is a lookup miss rather than a broken registry.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NetworkNotFound(_) | Self::ChannelNotFound { .. } | Self::UserNotFound { .. }
        )
    }
}

// ============================================================================
// Ingestion Errors
// ============================================================================

/// Errors raised while ingesting a log source.
///
/// Only `Read` and registry failures stop a source; malformed lines are
/// counted and skipped by the reader loop.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("malformed line: {0}")]
    Malformed(#[from] slirc_log::LogError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl IngestError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(err) => err.error_code(),
            Self::Read { .. } => "read_error",
            Self::Stats(err) => err.error_code(),
        }
    }

    /// Whether the offending line can be skipped and ingestion continue.
    pub fn is_line_error(&self) -> bool {
        matches!(
            self,
            Self::Malformed(_) | Self::Stats(StatsError::MissingField(_))
        )
    }
}

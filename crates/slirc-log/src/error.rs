//! Error types for log parsing.
//!
//! Lines that carry no statistic event are not errors; they parse to
//! `Ok(None)`. The variants here describe lines that could not be
//! understood at all.

use thiserror::Error;

/// Convenience type alias for Results using [`LogError`].
pub type Result<T, E = LogError> = std::result::Result<T, E>;

/// Errors produced while parsing a log line.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LogError {
    /// The line does not have the `timestamp<TAB>prefix<TAB>body` shape.
    #[error("malformed log line: {line:?}")]
    MalformedLine {
        /// The offending line.
        line: String,
    },

    /// The timestamp column could not be parsed.
    #[error("invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        /// The raw timestamp column.
        value: String,
        /// Underlying chrono error.
        #[source]
        source: chrono::ParseError,
    },

    /// The line names an event but the nick is empty.
    #[error("missing nick in log line: {line:?}")]
    MissingNick {
        /// The offending line.
        line: String,
    },

    /// A membership or topic line whose body could not be decoded.
    #[error("unrecognized {kind} line: {body:?}")]
    UnrecognizedBody {
        /// What the prefix announced (`join/part/quit`, `topic`).
        kind: &'static str,
        /// The body column.
        body: String,
    },
}

impl LogError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedLine { .. } => "malformed_line",
            Self::InvalidTimestamp { .. } => "invalid_timestamp",
            Self::MissingNick { .. } => "missing_nick",
            Self::UnrecognizedBody { .. } => "unrecognized_body",
        }
    }
}

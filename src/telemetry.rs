//! Telemetry utilities for ingestion timing and span correlation.

use std::time::Instant;
use tracing::debug;

/// Guard for timing one ingestion pass.
///
/// Logs the elapsed time when dropped.
pub struct IngestTimer {
    file: String,
    start: Instant,
}

impl IngestTimer {
    /// Start timing ingestion of `file`.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for IngestTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        debug!(file = %self.file, elapsed_ms, "Ingestion pass finished");
    }
}

/// Standardized span constructors for ingestion observability.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for reading one log file.
    pub fn ingest(file: &str, network: &str) -> Span {
        info_span!("ingest", file = %file, network = %network)
    }

    /// Create a span for one configured source.
    pub fn source(format: &str, channel: Option<&str>) -> Span {
        if let Some(channel) = channel {
            info_span!("source", format = %format, channel = %channel)
        } else {
            info_span!("source", format = %format)
        }
    }
}

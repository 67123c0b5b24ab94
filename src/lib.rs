//! slirc-stats - Straylight IRC log statistics.
//!
//! Aggregates chat logs into per-network, per-channel and per-user
//! statistics: message counts, hourly activity, top words and URLs,
//! consecutive-line streaks and recent quotes.
//!
//! ```
//! use chrono::NaiveDate;
//! use slirc_stats::{NewMessage, Stats};
//!
//! let at = NaiveDate::from_ymd_opt(2013, 8, 7)
//!     .and_then(|d| d.and_hms_opt(16, 50, 2))
//!     .expect("valid timestamp");
//!
//! let mut stats = Stats::new();
//! stats.add_message(NewMessage::msg("zqz", "#deviate", "Aaron", at, "hello world"))?;
//!
//! let channel = stats.channel("zqz", "#deviate")?;
//! assert_eq!(channel.words().count("hello"), 1);
//! # Ok::<(), slirc_stats::StatsError>(())
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod stats;
pub mod telemetry;

pub use error::{IngestError, StatsError};
pub use ingest::{IngestReport, Ingestor};
pub use stats::{
    Channel, ChannelId, Message, MessageId, MessageKind, Network, NetworkId, NewMessage, Stats,
    StatsLimits, StatsSummary, User, UserId,
};

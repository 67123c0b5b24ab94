//! Incremental per-scope aggregators.
//!
//! Channels and users each embed one of every aggregator and feed them
//! every message they see. Each aggregator decides for itself which
//! message kinds it cares about.

mod hourly;
mod quotes;
mod streaks;
mod top_tokens;
mod words;

pub use hourly::HourlyChart;
pub use quotes::{Quote, Quotes};
pub use streaks::{ConsecutiveLines, Streak};
pub use top_tokens::{TokenCount, TopTokenArray};
pub use words::{UrlCounter, WordCounter, is_url};

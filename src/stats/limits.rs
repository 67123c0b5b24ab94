//! Aggregator capacities.

use serde::{Deserialize, Serialize};

/// Capacities applied to every channel and user created by a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsLimits {
    /// Size of each top-words leaderboard.
    pub top_words: usize,
    /// Size of each top-URLs leaderboard.
    pub top_urls: usize,
    /// Size of each consecutive-lines leaderboard.
    pub top_streaks: usize,
    /// Quotes kept per channel and per user.
    pub quotes: usize,
}

impl Default for StatsLimits {
    fn default() -> Self {
        Self {
            top_words: 10,
            top_urls: 10,
            top_streaks: 10,
            quotes: 50,
        }
    }
}

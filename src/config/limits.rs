//! Aggregator capacity configuration.

use serde::Deserialize;

use crate::stats::StatsLimits;

/// Aggregator capacities.
///
/// Every channel and user gets its own leaderboards and quote buffer sized
/// by these values, so memory grows with `entities * capacity`.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Entries kept on each top-words leaderboard (default: 10).
    #[serde(default = "default_top_words")]
    pub top_words: usize,
    /// Entries kept on each top-URLs leaderboard (default: 10).
    #[serde(default = "default_top_urls")]
    pub top_urls: usize,
    /// Entries kept on each streak leaderboard (default: 10).
    #[serde(default = "default_top_streaks")]
    pub top_streaks: usize,
    /// Chat lines kept per quote buffer (default: 50).
    #[serde(default = "default_quotes")]
    pub quotes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            top_words: default_top_words(),
            top_urls: default_top_urls(),
            top_streaks: default_top_streaks(),
            quotes: default_quotes(),
        }
    }
}

impl From<&LimitsConfig> for StatsLimits {
    fn from(config: &LimitsConfig) -> Self {
        Self {
            top_words: config.top_words,
            top_urls: config.top_urls,
            top_streaks: config.top_streaks,
            quotes: config.quotes,
        }
    }
}

fn default_top_words() -> usize {
    10
}

fn default_top_urls() -> usize {
    10
}

fn default_top_streaks() -> usize {
    10
}

fn default_quotes() -> usize {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_match_stats_defaults() {
        let config = LimitsConfig::default();
        assert_eq!(StatsLimits::from(&config), StatsLimits::default());
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let config: LimitsConfig = toml::from_str("top_words = 3").unwrap();
        assert_eq!(config.top_words, 3);
        assert_eq!(config.top_urls, 10);
        assert_eq!(config.quotes, 50);
    }
}

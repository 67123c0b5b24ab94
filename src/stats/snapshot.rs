//! JSON snapshots of the registry.
//!
//! Only the ID-keyed data is written. Name indexes are rebuilt on load, so
//! a reloaded registry answers lookups and accepts new events straight
//! away, continuing the ID sequences where they left off.

use std::fs;
use std::path::Path;
use tracing::info;

use super::Stats;
use crate::error::StatsError;

impl Stats {
    /// Serialize the registry to JSON.
    pub fn to_json(&self) -> Result<String, StatsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a registry from JSON and rebuild its name indexes.
    ///
    /// Rejects snapshots whose ID counters lag behind the stored entities.
    pub fn from_json(json: &str) -> Result<Self, StatsError> {
        let mut stats: Stats = serde_json::from_str(json)?;
        stats.check_counters()?;
        stats.rebuild_indexes()?;
        Ok(stats)
    }

    /// Write a snapshot to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StatsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), messages = self.message_count(), "Saved snapshot");
        Ok(())
    }

    /// Read a snapshot written by [`save`](Self::save).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let path = path.as_ref();
        let stats = Self::from_json(&fs::read_to_string(path)?)?;
        info!(path = %path.display(), messages = stats.message_count(), "Loaded snapshot");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::NewMessage;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 8, 7)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn populated() -> Stats {
        let mut stats = Stats::new();
        stats
            .add_message(NewMessage::join("zqz", "#deviate", "dylan", at(9)))
            .unwrap();
        stats
            .add_message(NewMessage::msg("zqz", "#deviate", "dylan", at(10), "hello world"))
            .unwrap();
        stats
            .add_message(NewMessage::msg("zqz", "#deviate", "Aaron", at(10), "hello http://zqz.ca"))
            .unwrap();
        stats
    }

    #[test]
    fn test_round_trip_restores_lookups() {
        let stats = populated();
        let restored = Stats::from_json(&stats.to_json().unwrap()).unwrap();

        assert_eq!(restored.summary(), stats.summary());
        let channel = restored.channel("zqz", "#deviate").unwrap();
        assert_eq!(channel.message_count(), 3);
        assert_eq!(channel.words().count("hello"), 2);
        assert_eq!(channel.urls().count("http://zqz.ca"), 1);
        assert_eq!(channel.hourly().count(10), 2);
        assert_eq!(restored.user("zqz", "Aaron").unwrap().message_count(), 1);
    }

    #[test]
    fn test_restored_registry_continues_ids() {
        let stats = populated();
        let mut restored = Stats::from_json(&stats.to_json().unwrap()).unwrap();

        let id = restored
            .add_message(NewMessage::msg("zqz", "#deviate", "dylan", at(11), "again"))
            .unwrap()
            .id();
        assert_eq!(id.get(), 4);
        // Existing nick resolves to the existing user.
        assert_eq!(restored.summary().users, 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let stats = populated();
        stats.save(&path).unwrap();
        let loaded = Stats::load(&path).unwrap();
        assert_eq!(loaded.summary(), stats.summary());
        assert!(loaded.network("zqz").unwrap().is_indexed());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Stats::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, StatsError::Io(_)));
    }

    #[test]
    fn test_garbage_is_snapshot_error() {
        let err = Stats::from_json("{not json").unwrap_err();
        assert_eq!(err.error_code(), "snapshot_error");
    }

    #[test]
    fn test_lagging_counter_is_rejected() {
        let mut snapshot: serde_json::Value =
            serde_json::from_str(&populated().to_json().unwrap()).unwrap();
        snapshot["ids"]["user"] = serde_json::json!(1);

        let err = Stats::from_json(&snapshot.to_string()).unwrap_err();
        assert!(matches!(
            err,
            StatsError::StaleCounter {
                kind: "user",
                highest: 2,
                ..
            }
        ));
        assert_eq!(err.error_code(), "stale_counter");
    }
}

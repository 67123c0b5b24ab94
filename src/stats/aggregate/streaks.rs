//! Consecutive-line streak tracking.
//!
//! A streak is an uninterrupted run of chat lines attributed to the same
//! key. In a channel the key is the speaking user; in a user's own stats
//! it is the channel they are speaking in. Joins, parts, quits and topic
//! changes neither extend nor break a streak.

use serde::{Deserialize, Serialize};

use super::top_tokens::TopTokenArray;
use crate::stats::Message;

/// The streak currently in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak<K> {
    pub key: K,
    pub name: String,
    pub length: u64,
}

/// Running streak plus the all-time leaderboard of finished streaks.
///
/// The leaderboard holds each name's best streak. Streaks are credited when
/// a line from a different key ends them, or on [`finish`](Self::finish).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsecutiveLines<K> {
    current: Option<Streak<K>>,
    top: TopTokenArray,
}

impl<K: Copy + PartialEq> ConsecutiveLines<K> {
    pub fn new(capacity: usize) -> Self {
        Self {
            current: None,
            top: TopTokenArray::new(capacity),
        }
    }

    /// Feed one message attributed to `key`, displayed as `name`.
    pub(crate) fn add_message(&mut self, message: &Message, key: K, name: &str) {
        if !message.kind().is_chat() {
            return;
        }

        if let Some(streak) = self.current.as_mut()
            && streak.key == key
        {
            streak.length += 1;
            return;
        }

        if let Some(ended) = self.current.take() {
            self.top.update(&ended.name, ended.length);
        }
        self.current = Some(Streak {
            key,
            name: name.to_string(),
            length: 1,
        });
    }

    /// Credit the running streak to the leaderboard without ending it.
    ///
    /// The leaderboard keeps per-name maxima, so repeated calls are
    /// harmless and a streak that continues afterwards is credited again
    /// when it ends.
    pub fn finish(&mut self) {
        if let Some(streak) = &self.current {
            self.top.update(&streak.name, streak.length);
        }
    }

    pub fn current(&self) -> Option<&Streak<K>> {
        self.current.as_ref()
    }

    /// Best finished streaks, longest first.
    pub fn top(&self) -> &TopTokenArray {
        &self.top
    }
}

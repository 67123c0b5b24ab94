//! Per-channel aggregate.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::aggregate::{ConsecutiveLines, HourlyChart, Quotes, UrlCounter, WordCounter};
use super::{ChannelId, Message, MessageId, MessageKind, NetworkId, StatsLimits, User, UserId};

/// A named room within a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    id: ChannelId,
    name: String,
    topic: Option<String>,
    network_id: NetworkId,
    join_count: u64,
    part_count: u64,
    user_ids: BTreeSet<UserId>,
    message_ids: Vec<MessageId>,
    last_active: Option<NaiveDateTime>,

    hourly: HourlyChart,
    words: WordCounter,
    urls: UrlCounter,
    quotes: Quotes,
    streaks: ConsecutiveLines<UserId>,
}

impl Channel {
    pub(crate) fn new(id: ChannelId, network_id: NetworkId, name: &str, limits: &StatsLimits) -> Self {
        Self {
            id,
            name: name.to_string(),
            topic: None,
            network_id,
            join_count: 0,
            part_count: 0,
            user_ids: BTreeSet::new(),
            message_ids: Vec::new(),
            last_active: None,
            hourly: HourlyChart::new(),
            words: WordCounter::new(limits.top_words),
            urls: UrlCounter::new(limits.top_urls),
            quotes: Quotes::new(limits.quotes),
            streaks: ConsecutiveLines::new(limits.top_streaks),
        }
    }

    /// Absorb a message spoken by `user` in this channel.
    pub(crate) fn add_message(&mut self, message: &Message, user: &User) {
        match message.kind() {
            MessageKind::Join => self.join_count += 1,
            MessageKind::Part | MessageKind::Quit => self.part_count += 1,
            MessageKind::Topic => {
                self.topic = (!message.text().is_empty()).then(|| message.text().to_string());
            }
            MessageKind::Msg => {}
        }

        self.message_ids.push(message.id());
        self.user_ids.insert(message.user_id());

        self.hourly.add_message(message);
        self.words.add_message(message);
        self.urls.add_message(message);
        self.quotes.add_message(message);
        self.streaks.add_message(message, user.id(), user.nick());

        self.last_active = self.last_active.max(Some(message.timestamp()));
    }

    /// Credit the running streak to the leaderboard.
    pub(crate) fn finish(&mut self) {
        self.streaks.finish();
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latest topic set through a topic change, if any.
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn network_id(&self) -> NetworkId {
        self.network_id
    }

    pub fn join_count(&self) -> u64 {
        self.join_count
    }

    pub fn part_count(&self) -> u64 {
        self.part_count
    }

    /// Every user seen in this channel.
    pub fn user_ids(&self) -> &BTreeSet<UserId> {
        &self.user_ids
    }

    pub fn message_ids(&self) -> &[MessageId] {
        &self.message_ids
    }

    pub fn message_count(&self) -> usize {
        self.message_ids.len()
    }

    pub fn last_active(&self) -> Option<NaiveDateTime> {
        self.last_active
    }

    pub fn hourly(&self) -> &HourlyChart {
        &self.hourly
    }

    pub fn words(&self) -> &WordCounter {
        &self.words
    }

    pub fn urls(&self) -> &UrlCounter {
        &self.urls
    }

    pub fn quotes(&self) -> &Quotes {
        &self.quotes
    }

    /// Streaks keyed by speaking user.
    pub fn streaks(&self) -> &ConsecutiveLines<UserId> {
        &self.streaks
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Channel: {} Messages:({})", self.name, self.message_ids.len())
    }
}

//! Per-user aggregate.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::aggregate::{ConsecutiveLines, HourlyChart, Quotes, UrlCounter, WordCounter};
use super::{Channel, ChannelId, Message, MessageId, MessageKind, NetworkId, StatsLimits, UserId};

/// A participant identified by nick within one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    nick: String,
    network_id: NetworkId,
    join_count: u64,
    part_count: u64,
    channel_ids: BTreeSet<ChannelId>,
    message_ids: Vec<MessageId>,
    last_active: Option<NaiveDateTime>,

    hourly: HourlyChart,
    words: WordCounter,
    urls: UrlCounter,
    quotes: Quotes,
    streaks: ConsecutiveLines<ChannelId>,
}

impl User {
    pub(crate) fn new(id: UserId, network_id: NetworkId, nick: &str, limits: &StatsLimits) -> Self {
        Self {
            id,
            nick: nick.to_string(),
            network_id,
            join_count: 0,
            part_count: 0,
            channel_ids: BTreeSet::new(),
            message_ids: Vec::new(),
            last_active: None,
            hourly: HourlyChart::new(),
            words: WordCounter::new(limits.top_words),
            urls: UrlCounter::new(limits.top_urls),
            quotes: Quotes::new(limits.quotes),
            streaks: ConsecutiveLines::new(limits.top_streaks),
        }
    }

    /// Absorb a message from this user, seen in `channel` (none for quits).
    pub(crate) fn add_message(&mut self, message: &Message, channel: Option<&Channel>) {
        match message.kind() {
            MessageKind::Join => self.join_count += 1,
            MessageKind::Part | MessageKind::Quit => self.part_count += 1,
            MessageKind::Msg | MessageKind::Topic => {}
        }

        self.message_ids.push(message.id());

        self.hourly.add_message(message);
        self.words.add_message(message);
        self.urls.add_message(message);
        self.quotes.add_message(message);

        if let Some(channel) = channel {
            self.channel_ids.insert(channel.id());
            self.streaks.add_message(message, channel.id(), channel.name());
        }

        self.last_active = self.last_active.max(Some(message.timestamp()));
    }

    pub(crate) fn finish(&mut self) {
        self.streaks.finish();
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn network_id(&self) -> NetworkId {
        self.network_id
    }

    pub fn join_count(&self) -> u64 {
        self.join_count
    }

    /// Parts and quits.
    pub fn part_count(&self) -> u64 {
        self.part_count
    }

    /// Every channel this user was seen in.
    pub fn channel_ids(&self) -> &BTreeSet<ChannelId> {
        &self.channel_ids
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

    /// Streaks keyed by the channel this user was speaking in.
    pub fn streaks(&self) -> &ConsecutiveLines<ChannelId> {
        &self.streaks
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User: {} Messages:({})", self.nick, self.message_ids.len())
    }
}

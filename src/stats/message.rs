//! Classified log events.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::id::{ChannelId, MessageId, NetworkId, UserId};

/// Classification of a stored message.
///
/// Actions are never stored, so they have no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// A chat line.
    Msg,
    /// A user joined a channel.
    Join,
    /// A user left a channel.
    Part,
    /// A user disconnected from the network.
    Quit,
    /// A channel topic was changed.
    Topic,
}

impl MessageKind {
    /// Whether this is a chat line. Only chat lines feed the charts,
    /// counters, quotes and streaks.
    #[inline]
    pub fn is_chat(self) -> bool {
        matches!(self, Self::Msg)
    }

    /// Kind name for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Msg => "msg",
            Self::Join => "join",
            Self::Part => "part",
            Self::Quit => "quit",
            Self::Topic => "topic",
        }
    }
}

/// An event to be absorbed by [`Stats::add_message`](super::Stats::add_message).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewMessage<'a> {
    pub kind: MessageKind,
    pub network: &'a str,
    /// `None` for events that happen outside any channel (quits).
    pub channel: Option<&'a str>,
    pub nick: &'a str,
    pub timestamp: NaiveDateTime,
    pub text: &'a str,
}

impl<'a> NewMessage<'a> {
    /// A chat line.
    pub fn msg(
        network: &'a str,
        channel: &'a str,
        nick: &'a str,
        timestamp: NaiveDateTime,
        text: &'a str,
    ) -> Self {
        Self {
            kind: MessageKind::Msg,
            network,
            channel: Some(channel),
            nick,
            timestamp,
            text,
        }
    }

    /// A channel join.
    pub fn join(network: &'a str, channel: &'a str, nick: &'a str, timestamp: NaiveDateTime) -> Self {
        Self {
            kind: MessageKind::Join,
            network,
            channel: Some(channel),
            nick,
            timestamp,
            text: "",
        }
    }

    /// A channel part, with an optional reason (empty for none).
    pub fn part(
        network: &'a str,
        channel: &'a str,
        nick: &'a str,
        timestamp: NaiveDateTime,
        reason: &'a str,
    ) -> Self {
        Self {
            kind: MessageKind::Part,
            network,
            channel: Some(channel),
            nick,
            timestamp,
            text: reason,
        }
    }

    /// A network quit. Quits carry no channel.
    pub fn quit(network: &'a str, nick: &'a str, timestamp: NaiveDateTime, reason: &'a str) -> Self {
        Self {
            kind: MessageKind::Quit,
            network,
            channel: None,
            nick,
            timestamp,
            text: reason,
        }
    }

    /// A topic change.
    pub fn topic(
        network: &'a str,
        channel: &'a str,
        nick: &'a str,
        timestamp: NaiveDateTime,
        topic: &'a str,
    ) -> Self {
        Self {
            kind: MessageKind::Topic,
            network,
            channel: Some(channel),
            nick,
            timestamp,
            text: topic,
        }
    }
}

/// A stored message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    kind: MessageKind,
    network_id: NetworkId,
    channel_id: Option<ChannelId>,
    user_id: UserId,
    timestamp: NaiveDateTime,
    text: String,
}

impl Message {
    pub(crate) fn new(
        id: MessageId,
        kind: MessageKind,
        network_id: NetworkId,
        channel_id: Option<ChannelId>,
        user_id: UserId,
        timestamp: NaiveDateTime,
        text: String,
    ) -> Self {
        Self {
            id,
            kind,
            network_id,
            channel_id,
            user_id,
            timestamp,
            text,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn network_id(&self) -> NetworkId {
        self.network_id
    }

    /// Channel the message was seen in; `None` for quits.
    pub fn channel_id(&self) -> Option<ChannelId> {
        self.channel_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Chat text, part/quit reason or new topic. Empty when absent.
    pub fn text(&self) -> &str {
        &self.text
    }
}

//! Normalized chat events.

use chrono::NaiveDateTime;

/// Classification of a log event that carries statistics.
///
/// Actions (`/me`) and informational lines never become events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
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

impl EventKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Msg => "msg",
            Self::Join => "join",
            Self::Part => "part",
            Self::Quit => "quit",
            Self::Topic => "topic",
        }
    }
}

/// One normalized event, ready for aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEvent {
    /// Event classification.
    pub kind: EventKind,
    /// Network the log belongs to.
    pub network: String,
    /// Channel the event happened in. `None` for quits.
    pub channel: Option<String>,
    /// Nick of the acting user, without mode sigils.
    pub nick: String,
    /// Timestamp exactly as written in the log (no timezone conversion).
    pub timestamp: NaiveDateTime,
    /// Message text, part/quit reason or new topic. Empty when absent.
    pub text: String,
}

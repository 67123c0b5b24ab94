//! Numeric identities for registry entities.
//!
//! Every entity kind has its own ID type and its own counter so a channel
//! ID can never be confused with a user ID.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StatsError;

/// First ID handed out for every kind. 0 is never allocated.
const ID_COUNTER_START: u64 = 1;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Raw numeric value.
            #[inline]
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies a [`Network`](super::Network).
    NetworkId
);
entity_id!(
    /// Identifies a [`Channel`](super::Channel).
    ChannelId
);
entity_id!(
    /// Identifies a [`User`](super::User).
    UserId
);
entity_id!(
    /// Identifies a [`Message`](super::Message).
    MessageId
);

/// Monotonic per-kind ID counters.
///
/// Counters only move forward; an ID is never handed out twice for the
/// lifetime of the registry, including across a snapshot reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCounters {
    network: u64,
    channel: u64,
    user: u64,
    message: u64,
}

impl IdCounters {
    /// Create counters that start at 1.
    pub fn new() -> Self {
        Self {
            network: ID_COUNTER_START,
            channel: ID_COUNTER_START,
            user: ID_COUNTER_START,
            message: ID_COUNTER_START,
        }
    }

    /// Allocate the next network ID.
    pub fn next_network(&mut self) -> NetworkId {
        NetworkId(bump(&mut self.network))
    }

    /// Allocate the next channel ID.
    pub fn next_channel(&mut self) -> ChannelId {
        ChannelId(bump(&mut self.channel))
    }

    /// Allocate the next user ID.
    pub fn next_user(&mut self) -> UserId {
        UserId(bump(&mut self.user))
    }

    /// Allocate the next message ID.
    pub fn next_message(&mut self) -> MessageId {
        MessageId(bump(&mut self.message))
    }

    /// Check that no counter would hand out an ID at or below the highest
    /// stored one, or hand out 0.
    pub(crate) fn ensure_ahead(
        &self,
        network: Option<NetworkId>,
        channel: Option<ChannelId>,
        user: Option<UserId>,
        message: Option<MessageId>,
    ) -> Result<(), StatsError> {
        check_ahead("network", self.network, network.map(NetworkId::get))?;
        check_ahead("channel", self.channel, channel.map(ChannelId::get))?;
        check_ahead("user", self.user, user.map(UserId::get))?;
        check_ahead("message", self.message, message.map(MessageId::get))
    }
}

fn check_ahead(kind: &'static str, next: u64, highest: Option<u64>) -> Result<(), StatsError> {
    let highest = highest.unwrap_or(0);
    if next < ID_COUNTER_START || next <= highest {
        return Err(StatsError::StaleCounter {
            kind,
            next,
            highest,
        });
    }
    Ok(())
}

impl Default for IdCounters {
    fn default() -> Self {
        Self::new()
    }
}

fn bump(counter: &mut u64) -> u64 {
    let id = *counter;
    *counter += 1;
    id
}

//! Statistics registry.
//!
//! [`Stats`] is the single owner of every network, channel, user and
//! message. Entities refer to each other by ID only; name lookups go
//! through caches that can be dropped and rebuilt from the ID-keyed maps.
//!
//! Ingestion is single-threaded: one event is fully absorbed before the
//! next is accepted, and the registry is not meant to be mutated from
//! several callers at once.

pub mod aggregate;
mod channel;
mod id;
mod limits;
mod message;
mod network;
mod snapshot;
mod user;

pub use channel::Channel;
pub use id::{ChannelId, IdCounters, MessageId, NetworkId, UserId};
pub use limits::StatsLimits;
pub use message::{Message, MessageKind, NewMessage};
pub use network::Network;
pub use user::User;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{debug, trace};

use crate::error::StatsError;

/// Entity counts, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSummary {
    pub networks: usize,
    pub channels: usize,
    pub users: usize,
    pub messages: usize,
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Networks: {}, Channels: {}, Users: {}, Messages: {}",
            self.networks, self.channels, self.users, self.messages
        )
    }
}

/// Root registry for all statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    limits: StatsLimits,
    ids: IdCounters,
    networks: BTreeMap<NetworkId, Network>,
    channels: BTreeMap<ChannelId, Channel>,
    users: BTreeMap<UserId, User>,
    messages: BTreeMap<MessageId, Message>,

    /// Network name → ID. Derived; rebuilt by [`Stats::rebuild_indexes`].
    #[serde(skip)]
    network_index: Option<HashMap<String, NetworkId>>,
}

impl Stats {
    pub fn new() -> Self {
        Self::with_limits(StatsLimits::default())
    }

    pub fn with_limits(limits: StatsLimits) -> Self {
        Self {
            limits,
            ids: IdCounters::new(),
            networks: BTreeMap::new(),
            channels: BTreeMap::new(),
            users: BTreeMap::new(),
            messages: BTreeMap::new(),
            network_index: Some(HashMap::new()),
        }
    }

    pub fn limits(&self) -> &StatsLimits {
        &self.limits
    }

    /// Absorb one event.
    ///
    /// Resolves (creating on first reference) the network, channel and
    /// user named by the event, stores a new message and feeds it to the
    /// channel's and user's aggregators.
    pub fn add_message(&mut self, new: NewMessage<'_>) -> Result<&Message, StatsError> {
        if new.network.is_empty() {
            return Err(StatsError::MissingField("network"));
        }
        if new.nick.is_empty() {
            return Err(StatsError::MissingField("nick"));
        }
        if new.channel.is_some_and(str::is_empty) {
            return Err(StatsError::MissingField("channel"));
        }

        let network_id = self.get_or_add_network(new.network)?;
        let network = self
            .networks
            .get_mut(&network_id)
            .ok_or(StatsError::DanglingId {
                kind: "network",
                id: network_id.get(),
            })?;

        let channel_id = match new.channel {
            Some(name) => Some(network.get_or_add_channel(
                name,
                &mut self.ids,
                &mut self.channels,
                &self.limits,
            )?),
            None => None,
        };
        let user_id =
            network.get_or_add_user(new.nick, &mut self.ids, &mut self.users, &self.limits)?;

        let id = self.ids.next_message();
        let message = Message::new(
            id,
            new.kind,
            network_id,
            channel_id,
            user_id,
            new.timestamp,
            new.text.to_string(),
        );
        network.add_message_id(id);

        if let Some(channel_id) = channel_id {
            let user = self.users.get(&user_id).ok_or(StatsError::DanglingId {
                kind: "user",
                id: user_id.get(),
            })?;
            let channel = self
                .channels
                .get_mut(&channel_id)
                .ok_or(StatsError::DanglingId {
                    kind: "channel",
                    id: channel_id.get(),
                })?;
            channel.add_message(&message, user);
        }

        let channel = channel_id.and_then(|id| self.channels.get(&id));
        let user = self.users.get_mut(&user_id).ok_or(StatsError::DanglingId {
            kind: "user",
            id: user_id.get(),
        })?;
        user.add_message(&message, channel);

        trace!(
            id = %id,
            kind = message.kind().as_str(),
            network = %new.network,
            channel = new.channel.unwrap_or(""),
            nick = %new.nick,
            "Stored message"
        );

        Ok(self.messages.entry(id).or_insert(message))
    }

    fn get_or_add_network(&mut self, name: &str) -> Result<NetworkId, StatsError> {
        let index = self
            .network_index
            .as_mut()
            .ok_or_else(|| StatsError::IndexNotBuilt {
                network: name.to_string(),
            })?;

        if let Some(id) = index.get(name) {
            return Ok(*id);
        }

        let id = self.ids.next_network();
        self.networks.insert(id, Network::new(id, name));
        index.insert(name.to_string(), id);

        debug!(network = %name, id = %id, "Created network");
        Ok(id)
    }

    // === Lookups by name ===

    /// Find a network by name. Never creates.
    pub fn network(&self, name: &str) -> Result<&Network, StatsError> {
        let index = self
            .network_index
            .as_ref()
            .ok_or_else(|| StatsError::IndexNotBuilt {
                network: name.to_string(),
            })?;

        index
            .get(name)
            .and_then(|id| self.networks.get(id))
            .ok_or_else(|| StatsError::NetworkNotFound(name.to_string()))
    }

    /// Find a channel by network and channel name. Never creates.
    pub fn channel(&self, network: &str, channel: &str) -> Result<&Channel, StatsError> {
        let id = self.network(network)?.channel_id(channel)?;
        self.channels.get(&id).ok_or(StatsError::DanglingId {
            kind: "channel",
            id: id.get(),
        })
    }

    /// Find a user by network and nick. Never creates.
    pub fn user(&self, network: &str, nick: &str) -> Result<&User, StatsError> {
        let id = self.network(network)?.user_id(nick)?;
        self.users.get(&id).ok_or(StatsError::DanglingId {
            kind: "user",
            id: id.get(),
        })
    }

    // === Lookups by ID ===

    pub fn network_by_id(&self, id: NetworkId) -> Option<&Network> {
        self.networks.get(&id)
    }

    pub fn channel_by_id(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(&id)
    }

    pub fn user_by_id(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.get(&id)
    }

    // === Iteration ===

    /// Networks in creation order.
    pub fn networks(&self) -> impl Iterator<Item = &Network> {
        self.networks.values()
    }

    /// Channels in creation order.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    /// Users in creation order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Messages in ingestion order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.values()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            networks: self.networks.len(),
            channels: self.channels.len(),
            users: self.users.len(),
            messages: self.messages.len(),
        }
    }

    // === Index maintenance ===

    /// Rebuild every name index from the ID-keyed maps.
    ///
    /// All-or-nothing: if any network references a missing entity, no
    /// index is replaced.
    pub fn rebuild_indexes(&mut self) -> Result<(), StatsError> {
        let mut rebuilt = Vec::with_capacity(self.networks.len());
        for network in self.networks.values() {
            rebuilt.push((
                network.id(),
                network.collect_index(&self.channels, &self.users)?,
            ));
        }

        let index = self
            .networks
            .values()
            .map(|network| (network.name().to_string(), network.id()))
            .collect();

        for (id, network_index) in rebuilt {
            if let Some(network) = self.networks.get_mut(&id) {
                network.set_index(network_index);
            }
        }
        self.network_index = Some(index);

        debug!(networks = self.networks.len(), "Rebuilt name indexes");
        Ok(())
    }

    /// Fail if an ID counter would hand out an ID already held by the
    /// registry.
    pub(crate) fn check_counters(&self) -> Result<(), StatsError> {
        self.ids.ensure_ahead(
            self.networks.keys().next_back().copied(),
            self.channels.keys().next_back().copied(),
            self.users.keys().next_back().copied(),
            self.messages.keys().next_back().copied(),
        )
    }

    /// Drop every name index. Name lookups and ingestion fail until
    /// [`rebuild_indexes`](Self::rebuild_indexes) is called.
    pub fn invalidate_indexes(&mut self) {
        self.network_index = None;
        for network in self.networks.values_mut() {
            network.invalidate_indexes();
        }
    }

    /// End of input: credit every running streak to its leaderboard.
    ///
    /// Streaks are otherwise only credited when a different speaker
    /// breaks them. Safe to call more than once.
    pub fn finish(&mut self) {
        for channel in self.channels.values_mut() {
            channel.finish();
        }
        for user in self.users.values_mut() {
            user.finish();
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

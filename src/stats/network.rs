//! Networks and their name indexes.
//!
//! A network owns its channels and users by ID only. The name → ID maps
//! are a cache over those ID lists: they are never serialized and can be
//! rebuilt from the registry at any time with [`Network::build_indexes`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::debug;

use super::{
    Channel, ChannelId, IdCounters, MessageId, NetworkId, StatsLimits, User, UserId,
};
use crate::error::StatsError;

/// Derived name lookups for one network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NameIndex {
    channels: HashMap<String, ChannelId>,
    users: HashMap<String, UserId>,
}

/// A chat network grouping channels and users by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    id: NetworkId,
    name: String,
    channel_ids: Vec<ChannelId>,
    user_ids: Vec<UserId>,
    message_ids: Vec<MessageId>,

    /// `None` until built; always `None` right after deserialization.
    #[serde(skip)]
    index: Option<NameIndex>,
}

impl Network {
    pub(crate) fn new(id: NetworkId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            channel_ids: Vec::new(),
            user_ids: Vec::new(),
            message_ids: Vec::new(),
            index: Some(NameIndex::default()),
        }
    }

    pub fn id(&self) -> NetworkId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channel_ids(&self) -> &[ChannelId] {
        &self.channel_ids
    }

    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    pub fn message_ids(&self) -> &[MessageId] {
        &self.message_ids
    }

    /// Number of channels created under this network.
    pub fn channel_count(&self) -> usize {
        self.channel_ids.len()
    }

    /// Number of users created under this network.
    pub fn user_count(&self) -> usize {
        self.user_ids.len()
    }

    pub fn message_count(&self) -> usize {
        self.message_ids.len()
    }

    /// Whether the name indexes are usable.
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    fn index(&self) -> Result<&NameIndex, StatsError> {
        self.index.as_ref().ok_or_else(|| StatsError::IndexNotBuilt {
            network: self.name.clone(),
        })
    }

    /// Look up a channel by name without creating it.
    pub fn channel_id(&self, name: &str) -> Result<ChannelId, StatsError> {
        self.index()?
            .channels
            .get(name)
            .copied()
            .ok_or_else(|| StatsError::ChannelNotFound {
                network: self.name.clone(),
                channel: name.to_string(),
            })
    }

    /// Look up a user by nick without creating it.
    pub fn user_id(&self, nick: &str) -> Result<UserId, StatsError> {
        self.index()?
            .users
            .get(nick)
            .copied()
            .ok_or_else(|| StatsError::UserNotFound {
                network: self.name.clone(),
                nick: nick.to_string(),
            })
    }

    /// Return the channel named `name`, creating it on first reference.
    ///
    /// Calling this twice with the same name yields the same ID.
    pub fn get_or_add_channel(
        &mut self,
        name: &str,
        ids: &mut IdCounters,
        channels: &mut BTreeMap<ChannelId, Channel>,
        limits: &StatsLimits,
    ) -> Result<ChannelId, StatsError> {
        let index = self
            .index
            .as_mut()
            .ok_or_else(|| StatsError::IndexNotBuilt {
                network: self.name.clone(),
            })?;

        if let Some(id) = index.channels.get(name) {
            return Ok(*id);
        }

        let id = ids.next_channel();
        channels.insert(id, Channel::new(id, self.id, name, limits));
        index.channels.insert(name.to_string(), id);
        self.channel_ids.push(id);

        debug!(network = %self.name, channel = %name, id = %id, "Created channel");
        Ok(id)
    }

    /// Return the user named `nick`, creating it on first reference.
    ///
    /// Calling this twice with the same nick yields the same ID.
    pub fn get_or_add_user(
        &mut self,
        nick: &str,
        ids: &mut IdCounters,
        users: &mut BTreeMap<UserId, User>,
        limits: &StatsLimits,
    ) -> Result<UserId, StatsError> {
        let index = self
            .index
            .as_mut()
            .ok_or_else(|| StatsError::IndexNotBuilt {
                network: self.name.clone(),
            })?;

        if let Some(id) = index.users.get(nick) {
            return Ok(*id);
        }

        let id = ids.next_user();
        users.insert(id, User::new(id, self.id, nick, limits));
        index.users.insert(nick.to_string(), id);
        self.user_ids.push(id);

        debug!(network = %self.name, nick = %nick, id = %id, "Created user");
        Ok(id)
    }

    /// Record that a message was seen on this network.
    pub fn add_message_id(&mut self, id: MessageId) {
        self.message_ids.push(id);
    }

    /// Rebuild the name indexes from the ID lists.
    ///
    /// Fails without touching the current index if an ID is missing from
    /// the registry.
    pub fn build_indexes(
        &mut self,
        channels: &BTreeMap<ChannelId, Channel>,
        users: &BTreeMap<UserId, User>,
    ) -> Result<(), StatsError> {
        let index = self.collect_index(channels, users)?;
        self.index = Some(index);
        Ok(())
    }

    /// Resolve every ID list into a fresh index without installing it.
    pub(crate) fn collect_index(
        &self,
        channels: &BTreeMap<ChannelId, Channel>,
        users: &BTreeMap<UserId, User>,
    ) -> Result<NameIndex, StatsError> {
        let mut index = NameIndex::default();

        for id in &self.channel_ids {
            let channel = channels.get(id).ok_or(StatsError::DanglingId {
                kind: "channel",
                id: id.get(),
            })?;
            index.channels.insert(channel.name().to_string(), *id);
        }

        for id in &self.user_ids {
            let user = users.get(id).ok_or(StatsError::DanglingId {
                kind: "user",
                id: id.get(),
            })?;
            index.users.insert(user.nick().to_string(), *id);
        }

        Ok(index)
    }

    pub(crate) fn set_index(&mut self, index: NameIndex) {
        self.index = Some(index);
    }

    /// Drop the name indexes. Lookups fail until they are rebuilt.
    pub fn invalidate_indexes(&mut self) {
        self.index = None;
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Network: {}, Channels: {}, Messages: {}",
            self.name,
            self.channel_ids.len(),
            self.message_ids.len()
        )
    }
}

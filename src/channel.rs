//! Channel state.
//!
//! Narrowed from the teacher's `channels_models.rs`/`channel_ops.rs`, which
//! track the full RFC 2811 mode set (`imnpstaqr`, ban/except/invite-exception
//! lists) over `DashSet`s for concurrent access. This server only implements
//! `i`, `t`, `k`, `l` and the operator flag `o`, and channels live behind the
//! single-owner `ServerState`, so plain `HashSet`s replace the concurrent
//! ones.

use std::collections::HashSet;

use crate::client::ClientId;

#[derive(Debug, Clone, Default)]
pub struct ChannelModes {
    pub invite_only: bool, // +i
    pub topic_lock: bool,  // +t: only operators may TOPIC
    pub key: Option<String>, // +k
    pub user_limit: Option<usize>, // +l
}

#[derive(Debug)]
pub struct Channel {
    pub name: String,
    pub topic: Option<String>,
    pub members: HashSet<ClientId>,
    pub operators: HashSet<ClientId>,
    pub invited: HashSet<ClientId>,
    pub modes: ChannelModes,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Channel {
            name: name.into(),
            topic: None,
            members: HashSet::new(),
            operators: HashSet::new(),
            invited: HashSet::new(),
            modes: ChannelModes::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_operator(&self, id: ClientId) -> bool {
        self.operators.contains(&id)
    }

    pub fn is_member(&self, id: ClientId) -> bool {
        self.members.contains(&id)
    }

    /// Adds a member, granting operator status if this is the channel's
    /// first joiner (the channel has just been created by this JOIN).
    pub fn add_member(&mut self, id: ClientId) {
        let is_first = self.members.is_empty();
        self.members.insert(id);
        self.invited.remove(&id);
        if is_first {
            self.operators.insert(id);
        }
    }

    pub fn remove_member(&mut self, id: ClientId) {
        self.members.remove(&id);
        self.operators.remove(&id);
        self.invited.remove(&id);
    }

    pub fn is_full(&self) -> bool {
        matches!(self.modes.user_limit, Some(limit) if self.members.len() >= limit)
    }

    pub fn is_invited(&self, id: ClientId) -> bool {
        self.invited.contains(&id)
    }

    pub fn invite(&mut self, id: ClientId) {
        self.invited.insert(id);
    }

    /// A mode letters string for RPL_CHANNELMODEIS, e.g. `+itl`, plus any
    /// parameters (key, limit) in declaration order.
    pub fn modes_string(&self) -> (String, Vec<String>) {
        let mut letters = String::from("+");
        let mut params = Vec::new();
        if self.modes.invite_only {
            letters.push('i');
        }
        if self.modes.topic_lock {
            letters.push('t');
        }
        if let Some(key) = &self.modes.key {
            letters.push('k');
            params.push(key.clone());
        }
        if let Some(limit) = self.modes.user_limit {
            letters.push('l');
            params.push(limit.to_string());
        }
        (letters, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_joiner_becomes_operator() {
        let mut c = Channel::new("#test");
        c.add_member(1);
        assert!(c.is_operator(1));
        c.add_member(2);
        assert!(!c.is_operator(2));
    }

    #[test]
    fn remove_member_clears_operator_and_invite_flags() {
        let mut c = Channel::new("#test");
        c.add_member(1);
        c.invite(2);
        c.remove_member(1);
        assert!(!c.is_member(1));
        assert!(!c.is_operator(1));
        assert!(c.is_invited(2));
    }

    #[test]
    fn join_clears_pending_invite() {
        let mut c = Channel::new("#test");
        c.invite(2);
        c.add_member(2);
        assert!(!c.is_invited(2));
    }

    #[test]
    fn user_limit_enforced() {
        let mut c = Channel::new("#test");
        c.modes.user_limit = Some(1);
        c.add_member(1);
        assert!(c.is_full());
    }

    #[test]
    fn modes_string_reflects_active_modes_in_order() {
        let mut c = Channel::new("#test");
        c.modes.invite_only = true;
        c.modes.key = Some("secret".into());
        c.modes.user_limit = Some(10);
        let (letters, params) = c.modes_string();
        assert_eq!(letters, "+ikl");
        assert_eq!(params, vec!["secret".to_string(), "10".to_string()]);
    }
}

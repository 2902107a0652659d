//! The single-owner entity store: every client and channel the server
//! knows about lives here, behind one `Rc<RefCell<ServerState>>` shared by
//! the connection tasks in `server.rs`.
//!
//! Grounded in the teacher's `state.rs`/`server_state.rs` (the teacher keeps
//! both, each wrapping `Arc<DashMap<..>>` for concurrent access from many
//! tokio tasks). Dispatch here never runs two commands at once — it is
//! driven synchronously from each connection's reader task one line at a
//! time — so the concurrent maps collapse to plain `HashMap`s with no
//! locking at all.

use std::collections::HashMap;

use crate::channel::Channel;
use crate::client::{Client, ClientId};

#[derive(Default)]
pub struct ServerState {
    clients: HashMap<ClientId, Client>,
    nicks: HashMap<String, ClientId>,
    channels: HashMap<String, Channel>,
    next_id: ClientId,
}

impl ServerState {
    pub fn new() -> Self {
        ServerState::default()
    }

    pub fn next_client_id(&mut self) -> ClientId {
        self.next_id += 1;
        self.next_id
    }

    pub fn insert_client(&mut self, client: Client) {
        self.clients.insert(client.id, client);
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn client_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.get_mut(&id)
    }

    pub fn find_by_nick(&self, nick: &str) -> Option<ClientId> {
        self.nicks.get(nick).copied()
    }

    pub fn nick_in_use(&self, nick: &str) -> bool {
        self.nicks.contains_key(nick)
    }

    /// Registers `nick` for `id`, releasing any nick the client held
    /// before. Caller must have already checked `nick_in_use`. Lookup is
    /// case-sensitive, consistent with the server's case-sensitive command
    /// policy.
    pub fn set_nick(&mut self, id: ClientId, nick: &str) {
        if let Some(client) = self.clients.get(&id) {
            if let Some(old) = &client.nick {
                self.nicks.remove(old.as_str());
            }
        }
        self.nicks.insert(nick.to_string(), id);
        if let Some(client) = self.clients.get_mut(&id) {
            client.nick = Some(nick.to_string());
        }
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(name)
    }

    pub fn get_or_create_channel(&mut self, name: &str) -> &mut Channel {
        self.channels
            .entry(name.to_string())
            .or_insert_with(|| Channel::new(name))
    }

    /// Removes an empty channel so it doesn't linger forever. Called after
    /// every PART/KICK/QUIT that might have emptied a channel.
    pub fn prune_if_empty(&mut self, name: &str) {
        if self.channels.get(name).is_some_and(Channel::is_empty) {
            self.channels.remove(name);
        }
    }

    /// The single convergence point for client removal: QUIT, EOF,
    /// protocol error and line-overflow all funnel here. Removes the
    /// client from every channel it was a member of, pruning channels left
    /// empty, and returns the channel names that need a QUIT broadcast
    /// plus the removed client itself. Idempotent: calling this twice for
    /// an id already gone is a no-op returning an empty channel list.
    pub fn remove_client(&mut self, id: ClientId) -> Option<(Client, Vec<String>)> {
        let client = self.clients.remove(&id)?;
        if let Some(nick) = &client.nick {
            if self.nicks.get(nick.as_str()) == Some(&id) {
                self.nicks.remove(nick.as_str());
            }
        }
        let mut affected = Vec::new();
        for name in &client.channels {
            if let Some(channel) = self.channels.get_mut(name) {
                channel.remove_member(id);
                affected.push(name.clone());
            }
        }
        for name in &affected {
            self.prune_if_empty(name);
        }
        Some((client, affected))
    }

    /// Sends `line` to every member of `channel_name`, optionally skipping
    /// one client (the usual case: the sender already echoed locally).
    pub fn broadcast_to_channel(&self, channel_name: &str, line: &str, exclude: Option<ClientId>) {
        let Some(channel) = self.channels.get(channel_name) else {
            return;
        };
        for member_id in &channel.members {
            if Some(*member_id) != exclude {
                if let Some(client) = self.clients.get(member_id) {
                    client.send_line(line.to_string());
                }
            }
        }
    }

    pub fn client_ids(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.clients.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    fn addr() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 4000)
    }

    fn insert_client(state: &mut ServerState) -> ClientId {
        let id = state.next_client_id();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        state.insert_client(Client::new(id, addr(), tx));
        id
    }

    #[test]
    fn set_nick_registers_and_releases_old_one() {
        let mut state = ServerState::new();
        let id = insert_client(&mut state);
        state.set_nick(id, "bob");
        assert_eq!(state.find_by_nick("bob"), Some(id));
        state.set_nick(id, "bobby");
        assert_eq!(state.find_by_nick("bob"), None);
        assert_eq!(state.find_by_nick("bobby"), Some(id));
    }

    #[test]
    fn nick_lookup_is_case_sensitive() {
        let mut state = ServerState::new();
        let id = insert_client(&mut state);
        state.set_nick(id, "Bob");
        assert!(!state.nick_in_use("bob"));
        assert_eq!(state.find_by_nick("BOB"), None);
        assert_eq!(state.find_by_nick("Bob"), Some(id));
    }

    #[test]
    fn remove_client_prunes_emptied_channels() {
        let mut state = ServerState::new();
        let id = insert_client(&mut state);
        state.get_or_create_channel("#test").add_member(id);
        state.client_mut(id).unwrap().channels.insert("#test".to_string());

        let (removed, affected) = state.remove_client(id).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(affected, vec!["#test".to_string()]);
        assert!(state.channel("#test").is_none());
    }

    #[test]
    fn remove_client_keeps_nonempty_channel() {
        let mut state = ServerState::new();
        let a = insert_client(&mut state);
        let b = insert_client(&mut state);
        state.get_or_create_channel("#test").add_member(a);
        state.get_or_create_channel("#test").add_member(b);
        state.client_mut(a).unwrap().channels.insert("#test".to_string());
        state.client_mut(b).unwrap().channels.insert("#test".to_string());

        state.remove_client(a);
        let channel = state.channel("#test").unwrap();
        assert!(!channel.is_member(a));
        assert!(channel.is_member(b));
    }

    #[test]
    fn remove_client_is_idempotent() {
        let mut state = ServerState::new();
        let id = insert_client(&mut state);
        assert!(state.remove_client(id).is_some());
        assert!(state.remove_client(id).is_none());
    }
}

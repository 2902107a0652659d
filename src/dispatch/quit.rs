//! QUIT: hands off to the entity store's single disconnect convergence
//! point. The caller (the connection's reader task in `server.rs`) must
//! stop processing further lines for this client once this returns, since
//! the client record no longer exists.

use crate::client::ClientId;
use crate::state::ServerState;

const DEFAULT_QUIT_REASON: &str = "Client Quit";

pub fn handle_quit(state: &mut ServerState, client_id: ClientId, params: &[String]) {
    let reason = params.first().cloned().unwrap_or_else(|| DEFAULT_QUIT_REASON.to_string());
    let Some(client) = state.client(client_id) else { return };
    let prefix = client.prefix();
    let registered = client.is_registered();

    let Some((_removed, affected_channels)) = state.remove_client(client_id) else {
        return;
    };
    if !registered {
        return;
    }
    let line = format!(":{} QUIT :{}\r\n", prefix, reason);
    for channel_name in &affected_channels {
        state.broadcast_to_channel(channel_name, &line, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};
    use tokio::sync::mpsc::unbounded_channel;

    use crate::client::Client;
    use crate::dispatch::channels::handle_join;

    fn add_client(state: &mut ServerState, nick: &str, port: u16) -> (ClientId, tokio::sync::mpsc::UnboundedReceiver<String>) {
        let id = state.next_client_id();
        let (tx, rx) = unbounded_channel();
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), port);
        let mut client = Client::new(id, addr, tx);
        client.password_ok = true;
        client.user = Some(nick.to_string());
        state.insert_client(client);
        state.set_nick(id, nick);
        (id, rx)
    }

    #[test]
    fn quit_broadcasts_to_channel_mates_and_removes_client() {
        let mut state = ServerState::new();
        let (a, mut rx_a) = add_client(&mut state, "bob", 4000);
        let (b, mut rx_b) = add_client(&mut state, "alice", 4001);
        handle_join(&mut state, a, &["#test".to_string()]);
        handle_join(&mut state, b, &["#test".to_string()]);
        while rx_a.try_recv().is_ok() {}
        while rx_b.try_recv().is_ok() {}

        handle_quit(&mut state, a, &["bye everyone".to_string()]);
        assert!(state.client(a).is_none());
        assert!(rx_b.try_recv().unwrap().contains("QUIT :bye everyone"));
        assert!(state.channel("#test").unwrap().is_member(b));
    }

    #[test]
    fn quit_deletes_emptied_channel() {
        let mut state = ServerState::new();
        let (a, _rx_a) = add_client(&mut state, "bob", 4000);
        handle_join(&mut state, a, &["#test".to_string()]);
        handle_quit(&mut state, a, &[]);
        assert!(state.channel("#test").is_none());
    }
}

//! PRIVMSG: channel broadcast or direct delivery, never echoed to the
//! sender.

use crate::client::ClientId;
use crate::replies::IrcReply;
use crate::state::ServerState;

fn nick_of(state: &ServerState, id: ClientId) -> String {
    state
        .client(id)
        .and_then(|c| c.nick.clone())
        .unwrap_or_else(|| "*".to_string())
}

fn reply(state: &ServerState, id: ClientId, line: String) {
    if let Some(client) = state.client(id) {
        client.send_line(line + "\r\n");
    }
}

pub fn handle_privmsg(state: &mut ServerState, client_id: ClientId, params: &[String]) {
    let nick = nick_of(state, client_id);

    let Some(target) = params.first() else {
        reply(
            state,
            client_id,
            IrcReply::ErrNoRecipient {
                nick: &nick,
                command: "PRIVMSG",
            }
            .format(),
        );
        return;
    };
    let Some(text) = params.get(1) else {
        reply(state, client_id, IrcReply::ErrNoTextToSend { nick: &nick }.format());
        return;
    };

    let prefix = state.client(client_id).unwrap().prefix();
    let line = format!(":{} PRIVMSG {} :{}\r\n", prefix, target, text);

    if target.starts_with('#') {
        let channel_name = target.as_str();
        let Some(channel) = state.channel(channel_name) else {
            reply(
                state,
                client_id,
                IrcReply::ErrNoSuchChannel { nick: &nick, channel: channel_name }.format(),
            );
            return;
        };
        if !channel.is_member(client_id) {
            reply(
                state,
                client_id,
                IrcReply::ErrCannotSendToChan { nick: &nick, channel: channel_name }.format(),
            );
            return;
        }
        state.broadcast_to_channel(channel_name, &line, Some(client_id));
    } else {
        let Some(target_id) = state.find_by_nick(target) else {
            reply(
                state,
                client_id,
                IrcReply::ErrNoSuchNick { nick: &nick, target }.format(),
            );
            return;
        };
        if let Some(target_client) = state.client(target_id) {
            target_client.send_line(line);
        }
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
    fn direct_message_delivered_to_target_only() {
        let mut state = ServerState::new();
        let (a, _rx_a) = add_client(&mut state, "bob", 4000);
        let (_b, mut rx_b) = add_client(&mut state, "alice", 4001);
        handle_privmsg(&mut state, a, &["alice".to_string(), "hi".to_string()]);
        assert!(rx_b.try_recv().unwrap().contains("PRIVMSG alice :hi"));
    }

    #[test]
    fn channel_message_excludes_sender() {
        let mut state = ServerState::new();
        let (a, mut rx_a) = add_client(&mut state, "bob", 4000);
        let (b, mut rx_b) = add_client(&mut state, "alice", 4001);
        handle_join(&mut state, a, &["#test".to_string()]);
        handle_join(&mut state, b, &["#test".to_string()]);
        while rx_a.try_recv().is_ok() {}
        while rx_b.try_recv().is_ok() {}

        handle_privmsg(&mut state, a, &["#test".to_string(), "hello".to_string()]);
        assert!(rx_b.try_recv().unwrap().contains("PRIVMSG #test :hello"));
        assert!(rx_a.try_recv().is_err());
    }

    #[test]
    fn no_recipient_yields_411() {
        let mut state = ServerState::new();
        let (a, mut rx_a) = add_client(&mut state, "bob", 4000);
        handle_privmsg(&mut state, a, &[]);
        assert!(rx_a.try_recv().unwrap().contains("411"));
    }
}

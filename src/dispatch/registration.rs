//! PASS / NICK / USER and the welcome burst.
//!
//! Grounded in the teacher's `handlers/registration.rs` (`handle_nick_registration`,
//! `handle_user_registration`, `when_registered`), generalized from a single
//! `RPL_WELCOME` line into the full 001-004 burst this spec requires, and
//! rewritten synchronously since dispatch here never awaits.

use std::collections::HashSet;

use crate::client::ClientId;
use crate::constants::MAX_NICK_LEN;
use crate::replies::IrcReply;
use crate::state::ServerState;
use crate::validate::is_valid_nickname;

pub fn handle_pass(state: &mut ServerState, expected_password: &str, client_id: ClientId, params: &[String]) {
    let Some(client) = state.client(client_id) else { return };
    let nick = client.nick.clone().unwrap_or_else(|| "*".to_string());

    if client.is_registered() {
        client.send_line(
            IrcReply::ErrAlreadyRegistered { nick: &nick }.format() + "\r\n",
        );
        return;
    }
    let Some(password) = params.first() else {
        client.send_line(
            IrcReply::ErrNeedMoreParams {
                nick: &nick,
                command: "PASS",
            }
            .format()
                + "\r\n",
        );
        return;
    };
    let ok = password == expected_password;
    let client = state.client_mut(client_id).unwrap();
    if ok {
        client.password_ok = true;
    } else {
        client.send_line(IrcReply::ErrPasswdMismatch { nick: &nick }.format() + "\r\n");
    }
}

pub fn handle_nick(state: &mut ServerState, client_id: ClientId, params: &[String]) {
    let Some(client) = state.client(client_id) else { return };
    let current_nick = client.nick.clone().unwrap_or_else(|| "*".to_string());

    let Some(requested) = params.first() else {
        client.send_line(IrcReply::ErrNoNicknameGiven { nick: &current_nick }.format() + "\r\n");
        return;
    };

    if !is_valid_nickname(requested) || requested.len() > MAX_NICK_LEN {
        client.send_line(
            IrcReply::ErrErroneousNickname {
                nick: &current_nick,
                attempted: requested,
            }
            .format()
                + "\r\n",
        );
        return;
    }

    let already_mine = client.nick.as_deref() == Some(requested.as_str());
    if !already_mine && state.nick_in_use(requested) {
        client.send_line(
            IrcReply::ErrNicknameInUse {
                nick: &current_nick,
                attempted: requested,
            }
            .format()
                + "\r\n",
        );
        return;
    }
    if already_mine {
        return;
    }

    let was_registered = client.is_registered();
    let prefix = client.prefix();
    let channels = client.channels.clone();

    state.set_nick(client_id, requested);

    if was_registered {
        let line = format!(":{} NICK :{}\r\n", prefix, requested);
        let mut notified: HashSet<ClientId> = HashSet::new();
        notified.insert(client_id);
        if let Some(me) = state.client(client_id) {
            me.send_line(line.clone());
        }
        for channel_name in &channels {
            if let Some(channel) = state.channel(channel_name) {
                for member in channel.members.clone() {
                    if notified.insert(member) {
                        if let Some(member_client) = state.client(member) {
                            member_client.send_line(line.clone());
                        }
                    }
                }
            }
        }
    } else {
        maybe_welcome(state, client_id);
    }
}

pub fn handle_user(state: &mut ServerState, client_id: ClientId, params: &[String]) {
    let Some(client) = state.client(client_id) else { return };
    let current_nick = client.nick.clone().unwrap_or_else(|| "*".to_string());

    if client.is_registered() {
        client.send_line(IrcReply::ErrAlreadyRegistered { nick: &current_nick }.format() + "\r\n");
        return;
    }
    if params.len() < 4 {
        client.send_line(
            IrcReply::ErrNeedMoreParams {
                nick: &current_nick,
                command: "USER",
            }
            .format()
                + "\r\n",
        );
        return;
    }

    let client = state.client_mut(client_id).unwrap();
    client.user = Some(params[0].clone());
    client.realname = Some(params[3].clone());

    maybe_welcome(state, client_id);
}

/// Emits the 001-004 burst the instant PASS, NICK and USER have all landed.
fn maybe_welcome(state: &mut ServerState, client_id: ClientId) {
    let Some(client) = state.client(client_id) else { return };
    if !client.is_registered() {
        return;
    }
    let nick = client.nick.clone().unwrap();
    let user = client.user.clone().unwrap();
    let host = client.addr.ip().to_string();

    let lines = [
        IrcReply::Welcome {
            nick: &nick,
            user: &user,
            host: &host,
        }
        .format(),
        IrcReply::YourHost { nick: &nick }.format(),
        IrcReply::Created {
            nick: &nick,
            date: "at server start",
        }
        .format(),
        IrcReply::MyInfo { nick: &nick }.format(),
    ];
    let client = state.client(client_id).unwrap();
    for line in lines {
        client.send_line(line + "\r\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    use crate::client::Client;

    fn make_state() -> (ServerState, ClientId, UnboundedReceiver<String>) {
        let mut state = ServerState::new();
        let id = state.next_client_id();
        let (tx, rx) = unbounded_channel();
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 4000);
        state.insert_client(Client::new(id, addr, tx));
        (state, id, rx)
    }

    #[test]
    fn full_handshake_sends_welcome_burst() {
        let (mut state, id, mut rx) = make_state();
        handle_pass(&mut state, "secret", id, &["secret".to_string()]);
        handle_nick(&mut state, id, &["bob".to_string()]);
        handle_user(
            &mut state,
            id,
            &vec!["bob".into(), "0".into(), "*".into(), "Bob Bobson".into()],
        );
        assert!(state.client(id).unwrap().is_registered());
        let first = rx.try_recv().unwrap();
        assert!(first.contains(" 001 "));
    }

    #[test]
    fn wrong_password_rejected() {
        let (mut state, id, mut rx) = make_state();
        handle_pass(&mut state, "secret", id, &["wrong".to_string()]);
        assert!(!state.client(id).unwrap().password_ok);
        assert!(rx.try_recv().unwrap().contains("464"));
    }

    #[test]
    fn duplicate_nick_rejected() {
        let (mut state, id, _rx) = make_state();
        state.set_nick(id, "taken");
        let id2 = state.next_client_id();
        let (tx2, mut rx2) = unbounded_channel();
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 4001);
        state.insert_client(Client::new(id2, addr, tx2));
        handle_nick(&mut state, id2, &["taken".to_string()]);
        assert!(rx2.try_recv().unwrap().contains("433"));
    }

    #[test]
    fn invalid_nick_rejected() {
        let (mut state, id, mut rx) = make_state();
        handle_nick(&mut state, id, &["9bad".to_string()]);
        assert!(rx.try_recv().unwrap().contains("432"));
    }

    #[test]
    fn nick_change_after_registration_notifies_channel_mates_once() {
        let (mut state, id, mut rx) = make_state();
        handle_pass(&mut state, "secret", id, &["secret".to_string()]);
        handle_nick(&mut state, id, &["bob".to_string()]);
        handle_user(
            &mut state,
            id,
            &vec!["bob".into(), "0".into(), "*".into(), "Bob".into()],
        );
        while rx.try_recv().is_ok() {}

        let other_id = state.next_client_id();
        let (tx2, mut rx2) = unbounded_channel();
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 4002);
        state.insert_client(Client::new(other_id, addr, tx2));
        state.set_nick(other_id, "alice");

        state.get_or_create_channel("#chan").add_member(id);
        state.get_or_create_channel("#chan").add_member(other_id);
        state.client_mut(id).unwrap().channels.insert("#chan".into());
        state
            .client_mut(other_id)
            .unwrap()
            .channels
            .insert("#chan".into());

        handle_nick(&mut state, id, &["robert".to_string()]);
        let received = rx2.try_recv().unwrap();
        assert!(received.contains("NICK :robert"));
        assert!(rx2.try_recv().is_err());
    }
}

//! Command dispatch table.
//!
//! Generalizes the teacher's `handlers/request.rs` fallback chain (CAP ->
//! registration -> channel ops -> unknown) into a single match on the
//! uppercased command token, since this server drops IRCv3 capability
//! negotiation entirely.

pub mod channels;
pub mod messaging;
pub mod quit;
pub mod registration;

use crate::client::ClientId;
use crate::message::Message;
use crate::replies::IrcReply;
use crate::state::ServerState;

/// Commands usable before registration completes; every other command is
/// silently ignored in that state per the registration state machine.
fn allowed_before_registered(command: &str) -> bool {
    matches!(command, "PASS" | "NICK" | "USER" | "QUIT")
}

pub fn dispatch(state: &mut ServerState, expected_password: &str, client_id: ClientId, msg: Message) {
    if msg.command.is_empty() {
        return;
    }
    let Some(client) = state.client(client_id) else {
        return;
    };
    let registered = client.is_registered();
    let command = msg.command.as_str();

    if !registered && !allowed_before_registered(command) {
        return;
    }

    match command {
        "PASS" => registration::handle_pass(state, expected_password, client_id, &msg.params),
        "NICK" => registration::handle_nick(state, client_id, &msg.params),
        "USER" => registration::handle_user(state, client_id, &msg.params),
        "JOIN" => channels::handle_join(state, client_id, &msg.params),
        "PART" => channels::handle_part(state, client_id, &msg.params),
        "TOPIC" => channels::handle_topic(state, client_id, &msg.params),
        "MODE" => channels::handle_mode(state, client_id, &msg.params),
        "INVITE" => channels::handle_invite(state, client_id, &msg.params),
        "KICK" => channels::handle_kick(state, client_id, &msg.params),
        "PRIVMSG" => messaging::handle_privmsg(state, client_id, &msg.params),
        "QUIT" => quit::handle_quit(state, client_id, &msg.params),
        other => {
            let nick = state
                .client(client_id)
                .and_then(|c| c.nick.clone())
                .unwrap_or_else(|| "*".to_string());
            if let Some(client) = state.client(client_id) {
                client.send_line(
                    IrcReply::ErrUnknownCommand {
                        nick: &nick,
                        command: other,
                    }
                    .format()
                        + "\r\n",
                );
            }
        }
    }
}

/// True once `client_id` no longer exists in the store — the event loop's
/// per-line guard after every dispatched line (a QUIT or line overflow may
/// have removed it mid-batch).
pub fn client_gone(state: &ServerState, client_id: ClientId) -> bool {
    state.client(client_id).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};
    use tokio::sync::mpsc::unbounded_channel;

    use crate::client::Client;
    use crate::message::parse_message;

    fn make_state() -> (ServerState, ClientId, tokio::sync::mpsc::UnboundedReceiver<String>) {
        let mut state = ServerState::new();
        let id = state.next_client_id();
        let (tx, rx) = unbounded_channel();
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 4000);
        state.insert_client(Client::new(id, addr, tx));
        (state, id, rx)
    }

    #[test]
    fn unregistered_client_join_is_silently_ignored() {
        let (mut state, id, mut rx) = make_state();
        dispatch(&mut state, "secret", id, parse_message("JOIN #test"));
        assert!(rx.try_recv().is_err());
        assert!(state.channel("#test").is_none());
    }

    #[test]
    fn unknown_command_yields_421() {
        let (mut state, id, mut rx) = make_state();
        dispatch(&mut state, "secret", id, parse_message("PASS secret"));
        dispatch(&mut state, "secret", id, parse_message("NICK bob"));
        dispatch(
            &mut state,
            "secret",
            id,
            parse_message("USER bob 0 * :Bob Bobson"),
        );
        while rx.try_recv().is_ok() {}
        dispatch(&mut state, "secret", id, parse_message("FROBNICATE"));
        assert!(rx.try_recv().unwrap().contains("421"));
    }

    #[test]
    fn quit_removes_client_and_is_allowed_before_registration() {
        let (mut state, id, _rx) = make_state();
        dispatch(&mut state, "secret", id, parse_message("QUIT :bye"));
        assert!(client_gone(&state, id));
    }
}

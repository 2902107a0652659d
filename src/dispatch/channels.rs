//! JOIN / PART / KICK / INVITE / TOPIC / MODE / NAMES.
//!
//! Grounded in the teacher's `channel_ops.rs` (`IrcChannelOperation` and its
//! RFC 1459 §3.2 commentary) for command shapes, narrowed to the `i`/`t`/`k`/`l`
//! channel modes and the single `o` privilege this server implements.

use crate::client::ClientId;
use crate::replies::IrcReply;
use crate::state::ServerState;
use crate::validate::is_valid_channel_name;

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

pub fn handle_join(state: &mut ServerState, client_id: ClientId, params: &[String]) {
    let nick = nick_of(state, client_id);
    let Some(channel_list) = params.first() else {
        reply(
            state,
            client_id,
            IrcReply::ErrNeedMoreParams {
                nick: &nick,
                command: "JOIN",
            }
            .format(),
        );
        return;
    };
    let keys: Vec<&str> = params.get(1).map(|k| k.split(',').collect()).unwrap_or_default();

    for (i, channel_name) in channel_list.split(',').enumerate() {
        let key = keys.get(i).copied();
        join_one(state, client_id, &nick, channel_name, key);
    }
}

fn join_one(state: &mut ServerState, client_id: ClientId, nick: &str, channel_name: &str, key: Option<&str>) {
    if !is_valid_channel_name(channel_name) {
        reply(
            state,
            client_id,
            IrcReply::ErrNoSuchChannel {
                nick,
                channel: channel_name,
            }
            .format(),
        );
        return;
    }
    if state.client(client_id).is_some_and(|c| c.channels.contains(channel_name)) {
        return;
    }

    let is_new = state.channel(channel_name).is_none();
    if !is_new {
        let channel = state.channel(channel_name).unwrap();
        if channel.modes.invite_only && !channel.is_invited(client_id) {
            reply(
                state,
                client_id,
                IrcReply::ErrInviteOnlyChan {
                    nick,
                    channel: channel_name,
                }
                .format(),
            );
            return;
        }
        if let Some(required) = &channel.modes.key {
            if key != Some(required.as_str()) {
                reply(
                    state,
                    client_id,
                    IrcReply::ErrBadChannelKey {
                        nick,
                        channel: channel_name,
                    }
                    .format(),
                );
                return;
            }
        }
        if channel.is_full() {
            reply(
                state,
                client_id,
                IrcReply::ErrChannelIsFull {
                    nick,
                    channel: channel_name,
                }
                .format(),
            );
            return;
        }
    }

    let channel = state.get_or_create_channel(channel_name);
    channel.add_member(client_id);
    let topic = channel.topic.clone();
    let names: Vec<String> = channel.members.iter().copied().collect();

    if let Some(client) = state.client_mut(client_id) {
        client.channels.insert(channel_name.to_string());
    }

    let prefix = state.client(client_id).unwrap().prefix();
    let join_line = format!(":{} JOIN {}\r\n", prefix, channel_name);
    state.broadcast_to_channel(channel_name, &join_line, None);

    if let Some(topic) = topic {
        reply(
            state,
            client_id,
            IrcReply::Topic {
                nick,
                channel: channel_name,
                topic: &topic,
            }
            .format(),
        );
    }

    let name_list: Vec<String> = names
        .iter()
        .filter_map(|id| {
            let c = state.client(*id)?;
            let n = c.nick.clone()?;
            Some(if state.channel(channel_name).unwrap().is_operator(*id) {
                format!("@{n}")
            } else {
                n
            })
        })
        .collect();
    reply(
        state,
        client_id,
        IrcReply::NamReply {
            nick,
            channel: channel_name,
            names: &name_list.join(" "),
        }
        .format(),
    );
    reply(
        state,
        client_id,
        IrcReply::EndOfNames {
            nick,
            channel: channel_name,
        }
        .format(),
    );
}

pub fn handle_part(state: &mut ServerState, client_id: ClientId, params: &[String]) {
    let nick = nick_of(state, client_id);
    let Some(channel_list) = params.first() else {
        reply(
            state,
            client_id,
            IrcReply::ErrNeedMoreParams {
                nick: &nick,
                command: "PART",
            }
            .format(),
        );
        return;
    };
    let reason = params.get(1).cloned();

    for channel_name in channel_list.split(',') {
        part_one(state, client_id, &nick, channel_name, reason.as_deref());
    }
}

fn part_one(state: &mut ServerState, client_id: ClientId, nick: &str, channel_name: &str, reason: Option<&str>) {
    let in_channel = state
        .channel(channel_name)
        .is_some_and(|c| c.is_member(client_id));
    if !in_channel {
        reply(
            state,
            client_id,
            IrcReply::ErrNotOnChannel { nick, channel: channel_name }.format(),
        );
        return;
    }

    let prefix = state.client(client_id).unwrap().prefix();
    let part_line = match reason {
        Some(reason) => format!(":{} PART {} :{}\r\n", prefix, channel_name, reason),
        None => format!(":{} PART {}\r\n", prefix, channel_name),
    };
    state.broadcast_to_channel(channel_name, &part_line, None);

    state.channel_mut(channel_name).unwrap().remove_member(client_id);
    if let Some(client) = state.client_mut(client_id) {
        client.channels.remove(channel_name);
    }
    state.prune_if_empty(channel_name);
}

pub fn handle_topic(state: &mut ServerState, client_id: ClientId, params: &[String]) {
    let nick = nick_of(state, client_id);
    let Some(channel_name) = params.first() else {
        reply(
            state,
            client_id,
            IrcReply::ErrNeedMoreParams {
                nick: &nick,
                command: "TOPIC",
            }
            .format(),
        );
        return;
    };

    let Some(channel) = state.channel(channel_name) else {
        reply(state, client_id, IrcReply::ErrNoSuchChannel { nick: &nick, channel: channel_name }.format());
        return;
    };
    if !channel.is_member(client_id) {
        reply(state, client_id, IrcReply::ErrNotOnChannel { nick: &nick, channel: channel_name }.format());
        return;
    }

    match params.get(1) {
        None => {
            // No reply is permitted when the topic is unset.
            if let Some(topic) = state.channel(channel_name).unwrap().topic.clone() {
                reply(
                    state,
                    client_id,
                    IrcReply::Topic { nick: &nick, channel: channel_name, topic: &topic }.format(),
                );
            }
        }
        Some(new_topic) => {
            let locked = state.channel(channel_name).unwrap().modes.topic_lock;
            let is_op = state.channel(channel_name).unwrap().is_operator(client_id);
            if locked && !is_op {
                reply(state, client_id, IrcReply::ErrChanOprivsNeeded { nick: &nick, channel: channel_name }.format());
                return;
            }
            state.channel_mut(channel_name).unwrap().topic = Some(new_topic.clone());
            let prefix = state.client(client_id).unwrap().prefix();
            let line = format!(":{} TOPIC {} :{}\r\n", prefix, channel_name, new_topic);
            state.broadcast_to_channel(channel_name, &line, None);
        }
    }
}

pub fn handle_invite(state: &mut ServerState, client_id: ClientId, params: &[String]) {
    let nick = nick_of(state, client_id);
    if params.len() < 2 {
        reply(
            state,
            client_id,
            IrcReply::ErrNeedMoreParams { nick: &nick, command: "INVITE" }.format(),
        );
        return;
    }
    let target_nick = &params[0];
    let channel_name = &params[1];

    let Some(channel) = state.channel(channel_name) else {
        reply(state, client_id, IrcReply::ErrNoSuchChannel { nick: &nick, channel: channel_name }.format());
        return;
    };
    if !channel.is_member(client_id) {
        reply(state, client_id, IrcReply::ErrNotOnChannel { nick: &nick, channel: channel_name }.format());
        return;
    }
    if !channel.is_operator(client_id) {
        reply(state, client_id, IrcReply::ErrChanOprivsNeeded { nick: &nick, channel: channel_name }.format());
        return;
    }
    let Some(target_id) = state.find_by_nick(target_nick) else {
        reply(state, client_id, IrcReply::ErrNoSuchNick { nick: &nick, target: target_nick }.format());
        return;
    };
    if state.channel(channel_name).unwrap().is_member(target_id) {
        reply(
            state,
            client_id,
            IrcReply::ErrUserOnChannel { nick: &nick, target: target_nick, channel: channel_name }.format(),
        );
        return;
    }

    state.channel_mut(channel_name).unwrap().invite(target_id);

    let prefix = state.client(client_id).unwrap().prefix();
    if let Some(target) = state.client(target_id) {
        target.send_line(format!(":{} INVITE {} {}\r\n", prefix, target_nick, channel_name));
    }
}

pub fn handle_kick(state: &mut ServerState, client_id: ClientId, params: &[String]) {
    let nick = nick_of(state, client_id);
    if params.len() < 2 {
        reply(state, client_id, IrcReply::ErrNeedMoreParams { nick: &nick, command: "KICK" }.format());
        return;
    }
    let channel_name = &params[0];
    let target_nick = &params[1];
    let comment = params.get(2).cloned().unwrap_or_else(|| nick.clone());

    let Some(channel) = state.channel(channel_name) else {
        reply(state, client_id, IrcReply::ErrNoSuchChannel { nick: &nick, channel: channel_name }.format());
        return;
    };
    if !channel.is_member(client_id) {
        reply(state, client_id, IrcReply::ErrNotOnChannel { nick: &nick, channel: channel_name }.format());
        return;
    }
    if !channel.is_operator(client_id) {
        reply(state, client_id, IrcReply::ErrChanOprivsNeeded { nick: &nick, channel: channel_name }.format());
        return;
    }
    let Some(target_id) = state.find_by_nick(target_nick) else {
        reply(state, client_id, IrcReply::ErrNoSuchNick { nick: &nick, target: target_nick }.format());
        return;
    };
    if !channel.is_member(target_id) {
        reply(
            state,
            client_id,
            IrcReply::ErrUserNotInChannel { nick: &nick, target: target_nick, channel: channel_name }.format(),
        );
        return;
    }

    let prefix = state.client(client_id).unwrap().prefix();
    let kick_line = format!(":{} KICK {} {} :{}\r\n", prefix, channel_name, target_nick, comment);
    state.broadcast_to_channel(channel_name, &kick_line, None);

    state.channel_mut(channel_name).unwrap().remove_member(target_id);
    if let Some(target) = state.client_mut(target_id) {
        target.channels.remove(channel_name);
    }
    state.prune_if_empty(channel_name);
}

pub fn handle_mode(state: &mut ServerState, client_id: ClientId, params: &[String]) {
    let nick = nick_of(state, client_id);
    let Some(channel_name) = params.first() else {
        reply(state, client_id, IrcReply::ErrNeedMoreParams { nick: &nick, command: "MODE" }.format());
        return;
    };

    let Some(channel) = state.channel(channel_name) else {
        reply(state, client_id, IrcReply::ErrNoSuchChannel { nick: &nick, channel: channel_name }.format());
        return;
    };
    if !channel.is_member(client_id) {
        reply(state, client_id, IrcReply::ErrNotOnChannel { nick: &nick, channel: channel_name }.format());
        return;
    }

    let Some(modestring) = params.get(1) else {
        let (letters, mode_params) = state.channel(channel_name).unwrap().modes_string();
        reply(
            state,
            client_id,
            IrcReply::ChannelModeIs {
                nick: &nick,
                channel: channel_name,
                modes: &letters,
                params: &mode_params.join(" "),
            }
            .format(),
        );
        return;
    };

    if !state.channel(channel_name).unwrap().is_operator(client_id) {
        reply(state, client_id, IrcReply::ErrChanOprivsNeeded { nick: &nick, channel: channel_name }.format());
        return;
    }

    let mut args = params[2..].iter();
    let mut sign = '+';
    let mut applied = String::new();
    let mut applied_params = Vec::new();

    for c in modestring.chars() {
        match c {
            '+' | '-' => sign = c,
            'i' => {
                state.channel_mut(channel_name).unwrap().modes.invite_only = sign == '+';
                applied.push(sign);
                applied.push('i');
            }
            't' => {
                state.channel_mut(channel_name).unwrap().modes.topic_lock = sign == '+';
                applied.push(sign);
                applied.push('t');
            }
            'k' => {
                if sign == '+' {
                    if let Some(key) = args.next() {
                        state.channel_mut(channel_name).unwrap().modes.key = Some(key.clone());
                        applied.push(sign);
                        applied.push('k');
                        applied_params.push(key.clone());
                    }
                } else {
                    state.channel_mut(channel_name).unwrap().modes.key = None;
                    applied.push(sign);
                    applied.push('k');
                }
            }
            'l' => {
                if sign == '+' {
                    if let Some(limit) = args
                        .next()
                        .and_then(|s| s.parse::<i64>().ok())
                        .filter(|n| *n > 0)
                        .map(|n| n as usize)
                    {
                        state.channel_mut(channel_name).unwrap().modes.user_limit = Some(limit);
                        applied.push(sign);
                        applied.push('l');
                        applied_params.push(limit.to_string());
                    }
                } else {
                    state.channel_mut(channel_name).unwrap().modes.user_limit = None;
                    applied.push(sign);
                    applied.push('l');
                }
            }
            'o' => {
                if let Some(target_nick) = args.next() {
                    if let Some(target_id) = state.find_by_nick(target_nick) {
                        let channel = state.channel_mut(channel_name).unwrap();
                        if channel.is_member(target_id) {
                            if sign == '+' {
                                channel.operators.insert(target_id);
                            } else {
                                channel.operators.remove(&target_id);
                            }
                            applied.push(sign);
                            applied.push('o');
                            applied_params.push(target_nick.clone());
                        }
                    }
                }
            }
            _ => {}
        }
    }

    if applied.is_empty() {
        return;
    }
    let prefix = state.client(client_id).unwrap().prefix();
    let mut line = format!(":{} MODE {} {}", prefix, channel_name, applied);
    if !applied_params.is_empty() {
        line.push(' ');
        line.push_str(&applied_params.join(" "));
    }
    line.push_str("\r\n");
    state.broadcast_to_channel(channel_name, &line, None);
}

//! Nickname and channel-name validators, translated from the teacher's
//! `parsers.rs` character-class predicates (`is_nickname_first_char` /
//! `is_nickname_tail_char`) into the narrower rules this spec requires.

use crate::constants::{MAX_CHANNEL_NAME_LEN, MAX_NICK_LEN};

const NICK_SPECIALS: &str = "[]{}\\|^_-";

fn is_nick_first_char(c: char) -> bool {
    c.is_ascii_alphabetic() || NICK_SPECIALS.contains(c)
}

fn is_nick_tail_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || NICK_SPECIALS.contains(c)
}

/// First character letter or one of `[]{}\|^_-`; subsequent characters may
/// additionally be digits; length bounded.
pub fn is_valid_nickname(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_NICK_LEN {
        return false;
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_nick_first_char(c) => {}
        _ => return false,
    }
    chars.all(is_nick_tail_char)
}

/// `#` + non-empty, no space, no comma, no control byte, length <= 50.
pub fn is_valid_channel_name(s: &str) -> bool {
    if !s.starts_with('#') || s.len() > MAX_CHANNEL_NAME_LEN {
        return false;
    }
    let rest = &s[1..];
    if rest.is_empty() {
        return false;
    }
    rest.chars()
        .all(|c| c != ' ' && c != ',' && !c.is_control())
}

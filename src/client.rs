//! Per-connection client record.
//!
//! Adapted from the teacher's `User`/`UserState` (`types.rs`, `user_state.rs`):
//! the same fields (nick, user, full_user_name, registered, addr), but
//! collapsed from `Arc<RwLock<User>>` + atomic double-checked registration
//! into a plain struct living in the single-owner `ServerState` map, since
//! dispatch never runs concurrently with itself.

use std::collections::HashSet;
use std::net::SocketAddr;

use tokio::sync::mpsc::UnboundedSender;

pub type ClientId = u64;

/// Registration progresses PASS -> NICK -> USER; a client is fully
/// registered once all three have landed (order of NICK/USER is not
/// enforced beyond both being present, matching RFC 1459's leniency there).
#[derive(Debug)]
pub struct Client {
    pub id: ClientId,
    pub addr: SocketAddr,
    pub password_ok: bool,
    pub nick: Option<String>,
    pub user: Option<String>,
    pub realname: Option<String>,
    pub channels: HashSet<String>,
    pub outbound: UnboundedSender<String>,
}

impl Client {
    pub fn new(id: ClientId, addr: SocketAddr, outbound: UnboundedSender<String>) -> Self {
        Client {
            id,
            addr,
            password_ok: false,
            nick: None,
            user: None,
            realname: None,
            channels: HashSet::new(),
            outbound,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.password_ok && self.nick.is_some() && self.user.is_some()
    }

    /// `nick!user@host`, used as the source prefix on messages this client
    /// originates once registered.
    pub fn prefix(&self) -> String {
        format!(
            "{}!{}@{}",
            self.nick.as_deref().unwrap_or("*"),
            self.user.as_deref().unwrap_or("*"),
            self.addr.ip()
        )
    }

    /// Best-effort send: a dropped receiver means the connection's writer
    /// task has already exited, which the disconnect path will notice.
    pub fn send_line(&self, line: String) {
        let _ = self.outbound.send(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn make_client() -> (Client, tokio::sync::mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 4000);
        (Client::new(1, addr, tx), rx)
    }

    #[test]
    fn not_registered_until_all_three_steps_land() {
        let (mut c, _rx) = make_client();
        assert!(!c.is_registered());
        c.password_ok = true;
        assert!(!c.is_registered());
        c.nick = Some("bob".into());
        assert!(!c.is_registered());
        c.user = Some("bob".into());
        assert!(c.is_registered());
    }

    #[test]
    fn prefix_uses_star_before_registration() {
        let (c, _rx) = make_client();
        assert_eq!(c.prefix(), "*!*@127.0.0.1");
    }

    #[test]
    fn prefix_uses_nick_and_user_once_set() {
        let (mut c, _rx) = make_client();
        c.nick = Some("bob".into());
        c.user = Some("bobby".into());
        assert_eq!(c.prefix(), "bob!bobby@127.0.0.1");
    }

    #[tokio::test]
    async fn send_line_is_observable_on_receiver() {
        let (c, mut rx) = make_client();
        c.send_line("hello\r\n".into());
        assert_eq!(rx.recv().await.as_deref(), Some("hello\r\n"));
    }
}

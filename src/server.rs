//! The connection engine.
//!
//! Generalizes the teacher's `bin/irc_server.rs` accept-loop-plus-per-connection-task
//! shape (`TcpListener::accept` in a loop, `tokio::spawn` per client, a fixed
//! read buffer) into the single-threaded model this spec requires: one
//! `LocalSet` running every connection task, all of them sharing one
//! `Rc<RefCell<ServerState>>` instead of the teacher's `Arc<DashMap<..>>`.
//! Outbound writes are decoupled from dispatch through a per-connection
//! mpsc queue so a slow reader never blocks another client's broadcast.

use std::cell::RefCell;
use std::net::SocketAddr;
use std::rc::Rc;

use log::{error, info, warn};
use socket2::{Domain, Protocol, Socket, Type};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::LocalSet;

use crate::client::{Client, ClientId};
use crate::config::Config;
use crate::constants::MAX_LINE_BYTES;
use crate::dispatch;
use crate::errors::ServerError;
use crate::message::parse_message;
use crate::reassembler::LineReassembler;
use crate::state::ServerState;

const BACKLOG: i32 = 10;
const DISCONNECT_REASON: &str = "Connection closed";

/// Binds with `SO_REUSEADDR` and an explicit backlog — both outside what
/// `tokio::net::TcpListener::bind` exposes directly.
fn bind_listener(port: u16) -> Result<TcpListener, ServerError> {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP)).map_err(ServerError::Bind)?;
    socket.set_reuse_address(true).map_err(ServerError::Bind)?;
    socket.bind(&addr.into()).map_err(ServerError::Bind)?;
    socket.listen(BACKLOG).map_err(ServerError::Bind)?;
    socket.set_nonblocking(true).map_err(ServerError::Bind)?;
    TcpListener::from_std(socket.into()).map_err(ServerError::Bind)
}

pub async fn run(config: Config) -> Result<(), ServerError> {
    let listener = bind_listener(config.port)?;
    info!("listening on 0.0.0.0:{}", config.port);

    let state = Rc::new(RefCell::new(ServerState::new()));
    let local = LocalSet::new();
    local.run_until(accept_loop(listener, state, config.password)).await;
    Ok(())
}

async fn accept_loop(listener: TcpListener, state: Rc<RefCell<ServerState>>, password: String) {
    let password = Rc::new(password);
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, addr)) => {
                        let state = Rc::clone(&state);
                        let password = Rc::clone(&password);
                        tokio::task::spawn_local(handle_connection(stream, addr, state, password));
                    }
                    Err(err) => {
                        error!("accept failed: {err}");
                    }
                }
            }
            _ = shutdown_signal() => {
                info!("shutdown requested, disconnecting all clients");
                teardown(&state);
                break;
            }
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = term.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn teardown(state: &Rc<RefCell<ServerState>>) {
    let ids: Vec<ClientId> = state.borrow().client_ids().collect();
    for id in ids {
        disconnect(state, id, DISCONNECT_REASON);
    }
}

async fn handle_connection(
    stream: tokio::net::TcpStream,
    addr: SocketAddr,
    state: Rc<RefCell<ServerState>>,
    password: Rc<String>,
) {
    let _ = stream.set_nodelay(true);
    let (mut read_half, mut write_half) = stream.into_split();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();

    let client_id = {
        let mut state = state.borrow_mut();
        let id = state.next_client_id();
        state.insert_client(Client::new(id, addr, tx));
        id
    };
    info!("client {client_id} connected from {addr}");

    tokio::task::spawn_local(async move {
        while let Some(line) = rx.recv().await {
            if write_half.write_all(line.as_bytes()).await.is_err() {
                break;
            }
        }
    });

    let mut reassembler = LineReassembler::new();
    let mut buf = [0u8; MAX_LINE_BYTES];

    'connection: loop {
        let n = match read_half.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) => {
                warn!("client {client_id} read error: {err}");
                break;
            }
        };
        reassembler.append(&buf[..n]);

        while let Some(line) = reassembler.take_line() {
            if line.is_empty() {
                continue;
            }
            let msg = parse_message(&line);
            {
                let mut state = state.borrow_mut();
                dispatch::dispatch(&mut state, &password, client_id, msg);
            }
            if dispatch::client_gone(&state.borrow(), client_id) {
                break 'connection;
            }
        }

        if reassembler.is_overflowing() {
            break;
        }
    }

    disconnect(&state, client_id, DISCONNECT_REASON);
}

fn disconnect(state: &Rc<RefCell<ServerState>>, client_id: ClientId, reason: &str) {
    let mut state = state.borrow_mut();
    let Some(client) = state.client(client_id) else {
        return;
    };
    let prefix = client.prefix();
    let registered = client.is_registered();
    let Some((_removed, affected)) = state.remove_client(client_id) else {
        return;
    };
    if !registered {
        return;
    }
    let line = format!(":{prefix} QUIT :{reason}\r\n");
    for channel_name in &affected {
        state.broadcast_to_channel(channel_name, &line, None);
    }
}

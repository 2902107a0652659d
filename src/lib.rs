//! A small, single-threaded IRC server implementing the RFC 1459 subset
//! needed for authenticated multi-user chat over channels.

pub mod channel;
pub mod client;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod errors;
pub mod message;
pub mod reassembler;
pub mod replies;
pub mod server;
pub mod state;
pub mod validate;

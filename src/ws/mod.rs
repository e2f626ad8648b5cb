//! Websocket transport: session actors and the wire protocol.

pub mod protocol;
pub mod session;

pub use protocol::{ClientMsg, GameMode, ServerMsg};

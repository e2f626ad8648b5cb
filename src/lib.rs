//! Authoritative server core for four-player partnership Guandan:
//! two-deck shuffle and deal, hand legality and comparison, the per-deal
//! state machine (deal → tribute → play → score), multi-deal match
//! control, and websocket rooms with reconnect tolerance and bot fill.

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod room;
pub mod telemetry;
pub mod ws;

pub use error::AppError;

//! Server-level error taxonomy.
//!
//! Domain errors stay in [`crate::errors::domain`]; this type covers the
//! transport and room layers: protocol violations, capacity, and
//! configuration. The server never crashes on user input — every variant
//! here ends as a private `error` message or a log line.

use thiserror::Error;

use crate::errors::domain::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("room is full")]
    RoomFull,

    #[error("seat {seat} is occupied")]
    SeatOccupied { seat: u8 },

    #[error("seat switching is unavailable during a match")]
    SeatSwitchUnavailable,

    #[error("protocol error: {detail}")]
    Protocol { detail: String },

    #[error("unauthorized: {detail}")]
    Unauthorized { detail: String },

    #[error("rule violation: {0}")]
    Rule(DomainError),

    #[error("configuration error: {detail}")]
    Config { detail: String },

    #[error("internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn protocol(detail: impl Into<String>) -> Self {
        Self::Protocol {
            detail: detail.into(),
        }
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::Unauthorized {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// Message safe to echo back to the offending client.
    pub fn client_message(&self) -> String {
        self.to_string()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Rule(err)
    }
}

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rule- and phase-level errors produced by the deal engine and classifier.
///
/// Phase-level variants (`PhaseMismatch`, `OutOfTurn`) are silently dropped
/// by the room layer because they are usually stale replays after a
/// reconnect; rule-level variants are reported privately to the sender.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    PhaseMismatch,
    OutOfTurn,
    InvalidHand(String),
    NotBigEnough,
    CardNotInHand,
    CannotPassFreeLead,
    WrongTributeCard,
    ParseCard(String),
    Other(String),
}

impl DomainError {
    /// True for errors the room layer drops without a reply.
    pub fn is_stale(&self) -> bool {
        matches!(self, DomainError::PhaseMismatch | DomainError::OutOfTurn)
    }
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::PhaseMismatch => write!(f, "phase mismatch"),
            DomainError::OutOfTurn => write!(f, "out of turn"),
            DomainError::InvalidHand(s) => write!(f, "invalid hand: {s}"),
            DomainError::NotBigEnough => write!(f, "not big enough"),
            DomainError::CardNotInHand => write!(f, "card not in hand"),
            DomainError::CannotPassFreeLead => write!(f, "cannot pass on a free lead"),
            DomainError::WrongTributeCard => write!(f, "tribute must be the largest card"),
            DomainError::ParseCard(s) => write!(f, "parse card: {s}"),
            DomainError::Other(s) => write!(f, "domain error: {s}"),
        }
    }
}

impl Error for DomainError {}

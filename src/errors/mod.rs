//! Error types below the transport layer.

pub mod domain;

pub use domain::DomainError;

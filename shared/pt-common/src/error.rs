//! Shared error type.

use thiserror::Error;

/// Errors raised by shared types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The identifier is not part of the closed role enumeration.
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

pub type Result<T> = std::result::Result<T, Error>;

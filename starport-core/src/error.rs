//! Error types for Starport core.

use std::{error::Error, fmt};

/// Error type for Starport catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StarportError {
    /// Invalid or incomplete request input.
    BadRequest(String),
    /// The addressed ship does not exist.
    NotFound,
    /// The underlying repository failed.
    Storage(String),
}

impl fmt::Display for StarportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(reason) => write!(f, "bad request: {reason}"),
            Self::NotFound => write!(f, "ship not found"),
            Self::Storage(message) => write!(f, "storage error: {message}"),
        }
    }
}

impl Error for StarportError {}

/// Convenience result type for Starport core.
pub type Result<T> = std::result::Result<T, StarportError>;

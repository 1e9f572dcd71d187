//! Error types for quotedrill-core.

use thiserror::Error;

/// Result type alias using SessionError.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors that can occur while building or driving a practice session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no chapters selected")]
    NoChaptersSelected,

    #[error("selected chapters contain no quotes")]
    NoQuotes,

    #[error("percentage {value} is out of range (0-100)")]
    InvalidPercentage { value: u8 },

    #[error("input index {index} out of range")]
    InputOutOfRange { index: usize },

    #[error("cannot mark: inputs incomplete or answer not yet revealed")]
    MarkNotReady,

    #[error("{action} is not available in the current phase")]
    WrongPhase { action: &'static str },
}

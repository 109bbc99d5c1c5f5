//! Error types for rxstudy

use thiserror::Error;

/// Result type alias for reactive operations
pub type Result<T> = std::result::Result<T, RxError>;

/// Errors carried by a pipeline's error signal
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RxError {
    /// Error pushed by a producer, optionally without a message
    #[error("{}", .0.as_deref().unwrap_or("null"))]
    Emitted(Option<String>),

    /// A completable action failed
    #[error("Action failed: {0}")]
    Action(String),

    /// A factory was called with arguments it cannot honour
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl RxError {
    /// Error with no message, like a bare `Throwable`
    pub fn bare() -> Self {
        Self::Emitted(None)
    }

    /// Error with a message
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Emitted(Some(message.into()))
    }

    /// The error's message, if it has one
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Emitted(message) => message.as_deref(),
            Self::Action(message) | Self::InvalidArgument(message) => Some(message),
        }
    }
}

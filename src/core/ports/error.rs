//! Rejections raised by the runtime

use thiserror::Error;

/// A rejected runtime operation
///
/// The variant classifies the failure; the message is passed to the client
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The addressed resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// The runtime refused the arguments (unknown key, duplicate name, ...)
    #[error("{0}")]
    InvalidRequest(String),

    /// The injected identity is unknown to the runtime
    #[error("{0}")]
    Unauthorized(String),

    /// Any other failure
    #[error("{0}")]
    Failed(String),
}

impl RuntimeError {
    /// Create a not found rejection
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an invalid request rejection
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an unauthorized rejection
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Create a generic failure
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

impl From<anyhow::Error> for RuntimeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Failed(format!("{err:#}"))
    }
}

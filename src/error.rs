//! Error type shared by the logger, the backends and the global config.

use thiserror::Error;

/// Errors surfaced by context logging.
///
/// Duplicate context keys are never an error; they only produce an
/// advisory warning line.
#[derive(Debug, Error)]
pub enum Error {
    /// The backend refused or failed to emit a record. Propagated unmodified.
    #[error("backend '{backend}' failed to emit: {message}")]
    Backend { backend: String, message: String },

    /// A process-wide logger was already installed.
    #[error("global logging is already configured")]
    AlreadyConfigured,

    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),

    /// A context value could not be converted to JSON.
    #[error("failed to serialize context value: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn backend(backend: &str, message: impl Into<String>) -> Self {
        Self::Backend {
            backend: backend.to_string(),
            message: message.into(),
        }
    }
}

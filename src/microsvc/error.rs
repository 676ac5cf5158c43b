//! Error types for microsvc command handlers.

use crate::model::ModelError;
use crate::school::EditError;

/// Error type for command handler operations.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// No handler registered for this command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// Payload decode / deserialization failed.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Record not found, or no id supplied.
    #[error("not found: {0}")]
    NotFound(String),
    /// Guard rejected the command (input shape check failed).
    #[error("guard rejected command: {0}")]
    GuardRejected(String),
    /// Backing store failure.
    #[error("store error: {0}")]
    Store(#[from] ModelError),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl From<EditError> for HandlerError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::MissingId | EditError::NotFound(_) => HandlerError::NotFound(err.to_string()),
            EditError::Store(e) => HandlerError::Store(e),
        }
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::NotFound(_) => 404,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Store(_) => 500,
        }
    }
}

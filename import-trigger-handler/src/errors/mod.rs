//! Error types for the import trigger handler.

use import_trigger_repository::ImportError;
use thiserror::Error;

/// Errors that can occur while handling a storage event.
///
/// Events without a bucket or object name are not errors; they are skipped.
#[derive(Error, Debug)]
pub enum TriggerError {
    /// The event body could not be decoded.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Submitting the import or waiting for it failed.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),
}

impl TriggerError {
    /// Create an invalid payload error.
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }
}

impl From<serde_json::Error> for TriggerError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err.to_string())
    }
}

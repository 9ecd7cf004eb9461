//! Import error types.
//!
//! This module defines the error types that can occur while submitting an
//! import to the indexing service or waiting for it to finish.

use thiserror::Error;

/// Errors that can occur during indexing service operations.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Failed to reach the indexing service.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to obtain credentials for the indexing service.
    #[error("Auth error: {0}")]
    AuthError(String),

    /// The service rejected a request.
    #[error("Request failed with status {status}: {body}")]
    RequestError { status: u16, body: String },

    /// The long-running operation finished with an error status.
    #[error("Operation {name} failed with code {code}: {message}")]
    OperationFailed {
        name: String,
        code: i32,
        message: String,
    },

    /// Failed to parse a response from the service.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ImportError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an auth error.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::AuthError(msg.into())
    }

    /// Create a request error from a non-success HTTP status.
    pub fn request(status: u16, body: impl Into<String>) -> Self {
        Self::RequestError {
            status,
            body: body.into(),
        }
    }

    /// Create an operation failure.
    pub fn operation_failed(name: impl Into<String>, code: i32, message: impl Into<String>) -> Self {
        Self::OperationFailed {
            name: name.into(),
            code,
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

impl From<reqwest::Error> for ImportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::ConnectionError(err.to_string())
        }
    }
}

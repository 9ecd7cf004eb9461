//! # Import Trigger
//!
//! Entry point of the storage-to-datastore import trigger.
//!
//! This crate provides the configuration, dependency wiring and HTTP
//! CloudEvent endpoint that hand storage events to the trigger handler.

pub mod config;
pub mod server;

pub use config::{Dependencies, Settings};

use import_trigger_repository::ImportError;
use thiserror::Error;

/// Errors that can occur during startup or while serving.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Indexing service client error.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

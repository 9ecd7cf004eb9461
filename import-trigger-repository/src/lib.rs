//! # Import Trigger Repository
//!
//! This crate provides the capability traits the import trigger talks to the
//! indexing service through, the error types for those calls, and a concrete
//! implementation for the Discovery Engine REST API.

pub mod config;
pub mod discovery_engine;
pub mod errors;
pub mod interfaces;
pub mod types;

pub use config::DiscoveryEngineConfig;
pub use discovery_engine::{DiscoveryEngineClient, MetadataServerToken, StaticToken, TokenSource};
pub use errors::ImportError;
pub use interfaces::{IndexingService, OperationHandle};
pub use types::OperationOutcome;

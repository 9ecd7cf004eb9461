//! Interface definitions for the indexing service.
//!
//! This module defines the abstract `IndexingService` and `OperationHandle`
//! traits that allow for dependency injection and swappable backends.

mod indexing_service;

pub use indexing_service::{IndexingService, OperationHandle};

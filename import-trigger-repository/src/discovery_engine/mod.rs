//! Discovery Engine implementation of the indexing service.
//!
//! Talks to the `v1` REST API: imports are started with
//! `documents:import` and tracked through `google.longrunning.Operation`
//! resources.

mod auth;
mod client;
mod operation;
mod transport;

pub use auth::{MetadataServerToken, StaticToken, TokenSource};
pub use client::DiscoveryEngineClient;
pub use operation::{Operation, OperationStatus, PendingOperation};

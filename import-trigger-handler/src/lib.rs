//! # Import Trigger Handler
//!
//! This crate turns storage change events into datastore imports.
//!
//! ## Flow
//!
//! 1. **Event**: A CloudEvent carrying storage object data is parsed
//! 2. **Extraction**: The bucket and object name are pulled out of it
//! 3. **Request**: An incremental import of that single object is built
//! 4. **Submission**: The request is sent to the indexing service
//! 5. **Wait**: The invocation blocks until the import operation finishes

pub mod errors;
pub mod event;
pub mod handler;

pub use errors::TriggerError;
pub use event::StorageEvent;
pub use handler::TriggerHandler;

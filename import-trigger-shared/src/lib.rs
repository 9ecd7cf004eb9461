//! # Import Trigger Shared
//!
//! Shared types for the storage-to-datastore import trigger: the change
//! notification extracted from a storage event, the resource path of the
//! target datastore branch, and the import request submitted for it.

pub mod notification;
pub mod request;
pub mod resource;

pub use notification::{gcs_uri, ChangeNotification, MissingField, MissingFields, StorageObjectData};
pub use request::{DataSchema, ImportRequest, ReconciliationMode};
pub use resource::BranchPath;

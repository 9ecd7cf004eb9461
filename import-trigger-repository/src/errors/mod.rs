//! Error types for the import trigger repository.

mod import_error;

pub use import_error::ImportError;

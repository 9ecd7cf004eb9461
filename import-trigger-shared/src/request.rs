//! Import request types.

use std::fmt;

use serde::Serialize;

use crate::resource::BranchPath;

/// Schema the imported objects are interpreted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataSchema {
    /// Unstructured content (PDF, HTML, text, ...), one document per object.
    #[serde(rename = "content")]
    Content,
}

impl DataSchema {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
        }
    }
}

impl fmt::Display for DataSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How imported documents are merged with what the datastore already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReconciliationMode {
    /// Add new documents and update existing ones.
    Incremental,
    /// Replace the whole datastore with the imported documents.
    Full,
}

impl ReconciliationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incremental => "INCREMENTAL",
            Self::Full => "FULL",
        }
    }
}

impl fmt::Display for ReconciliationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to import a single storage object into a datastore branch.
///
/// Built fresh for every event and never mutated; two requests built from the
/// same event and configuration compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    /// Resource path of the target branch.
    pub parent: String,
    /// Locator of the object to import.
    pub source_locator: String,
    pub data_schema: DataSchema,
    pub reconciliation_mode: ReconciliationMode,
}

impl ImportRequest {
    /// Create an incremental content import of one object into `parent`.
    pub fn incremental(parent: &BranchPath, source_locator: impl Into<String>) -> Self {
        Self {
            parent: parent.to_string(),
            source_locator: source_locator.into(),
            data_schema: DataSchema::Content,
            reconciliation_mode: ReconciliationMode::Incremental,
        }
    }

    /// The source URIs sent to the service. Always exactly one.
    pub fn source_uris(&self) -> Vec<String> {
        vec![self.source_locator.clone()]
    }
}

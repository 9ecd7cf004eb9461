//! Result types for indexing service operations.

use serde_json::Value;

/// What a finished import operation reported.
///
/// Both parts are kept as raw JSON so they can be logged verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationOutcome {
    /// The operation's `response` (an `ImportDocumentsResponse`).
    pub response: Value,
    /// The operation's last `metadata` (an `ImportDocumentsMetadata`).
    pub metadata: Value,
}

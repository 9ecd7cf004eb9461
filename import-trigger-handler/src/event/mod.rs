//! Storage CloudEvents.
//!
//! Events arrive over HTTP in either CloudEvents content mode:
//!
//! - **binary**: attributes in `ce-*` headers, the body is the object data
//! - **structured**: the body is the whole event as JSON, object data under `data`

use serde::Deserialize;

use crate::errors::TriggerError;
use import_trigger_shared::StorageObjectData;

/// A storage CloudEvent as received by the trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// The CloudEvent `type` attribute.
    pub event_type: String,
    /// The CloudEvent `id` attribute, when present.
    pub id: Option<String>,
    /// The object data.
    pub data: StorageObjectData,
}

#[derive(Debug, Deserialize)]
struct StructuredEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    data: Option<StorageObjectData>,
}

impl StorageEvent {
    pub fn new(event_type: impl Into<String>, data: StorageObjectData) -> Self {
        Self {
            event_type: event_type.into(),
            id: None,
            data,
        }
    }

    /// Decode a binary-mode event from its attributes and body.
    ///
    /// An empty body yields empty object data.
    pub fn from_binary(
        event_type: impl Into<String>,
        id: Option<String>,
        body: &[u8],
    ) -> Result<Self, TriggerError> {
        let data = if body.iter().all(u8::is_ascii_whitespace) {
            StorageObjectData::default()
        } else {
            serde_json::from_slice(body)?
        };

        Ok(Self {
            event_type: event_type.into(),
            id,
            data,
        })
    }

    /// Decode a structured-mode event.
    pub fn from_structured(body: &[u8]) -> Result<Self, TriggerError> {
        let event: StructuredEvent = serde_json::from_slice(body)?;

        Ok(Self {
            event_type: event.event_type,
            id: event.id,
            data: event.data.unwrap_or_default(),
        })
    }
}

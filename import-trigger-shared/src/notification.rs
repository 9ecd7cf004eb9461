//! Storage change notifications.
//!
//! A notification is extracted from the object data carried by a storage
//! event. Events that do not name both a bucket and an object produce
//! [`MissingFields`] instead, which callers treat as "nothing to import".

use std::fmt;

use serde::Deserialize;

/// URI scheme of Cloud Storage locators.
pub const GCS_SCHEME: &str = "gs";

/// Build the canonical locator for an object in a bucket.
///
/// The same `(bucket, object)` pair always yields the same locator, so a
/// redelivered event produces an identical import request.
pub fn gcs_uri(container_id: &str, object_key: &str) -> String {
    format!("{}://{}/{}", GCS_SCHEME, container_id, object_key)
}

/// Object data carried in the `data` of a Cloud Storage CloudEvent.
///
/// Only the fields this trigger reads are modelled; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageObjectData {
    /// The bucket holding the object.
    #[serde(default)]
    pub bucket: Option<String>,
    /// The object name (key) within the bucket.
    #[serde(default)]
    pub name: Option<String>,
    /// The object's content type, when reported.
    #[serde(default)]
    pub content_type: Option<String>,
}

/// A required event field that was absent or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    /// The `bucket` field.
    Bucket,
    /// The `name` field.
    Name,
}

impl MissingField {
    /// The field name as it appears in the event payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bucket => "bucket",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of required fields an event lacked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields {
    pub fields: Vec<MissingField>,
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.fields.iter().map(MissingField::as_str).collect();
        write!(f, "missing {}", names.join(", "))
    }
}

/// A storage change that names a concrete object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotification {
    /// The bucket holding the changed object.
    pub container_id: String,
    /// The object key within the bucket.
    pub object_key: String,
    /// The CloudEvent type, e.g. `google.cloud.storage.object.v1.finalized`.
    pub event_kind: String,
}

impl ChangeNotification {
    /// Extract a notification from an event's type and object data.
    ///
    /// Absent and empty values are both treated as missing.
    pub fn from_object_data(
        event_kind: impl Into<String>,
        data: &StorageObjectData,
    ) -> Result<Self, MissingFields> {
        let bucket = non_empty(data.bucket.as_deref());
        let name = non_empty(data.name.as_deref());

        match (bucket, name) {
            (Some(bucket), Some(name)) => Ok(Self {
                container_id: bucket.to_string(),
                object_key: name.to_string(),
                event_kind: event_kind.into(),
            }),
            (bucket, name) => {
                let mut fields = Vec::with_capacity(2);
                if bucket.is_none() {
                    fields.push(MissingField::Bucket);
                }
                if name.is_none() {
                    fields.push(MissingField::Name);
                }
                Err(MissingFields { fields })
            }
        }
    }

    /// The `gs://` locator of the changed object.
    pub fn locator(&self) -> String {
        gcs_uri(&self.container_id, &self.object_key)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

use chrono::{DateTime, Utc};
use common::{RequestId, Validate, ValidationError};
use serde::{Deserialize, Serialize};

use crate::StreamId;

/// Version number of a stream, used for optimistic concurrency control.
///
/// Versions start at 1 for the first event and increment by 1 for each
/// subsequent event on a stream. Version 0 never belongs to an event; it
/// stands for "no events yet".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the version of a stream with no events (0).
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the version of the first event (1).
    pub fn first() -> Self {
        Self(1)
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Validate for Version {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.0 == 0 {
            Err(ValidationError::new("version", self.0.to_string()))
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

/// The stored form of an event.
///
/// The store only looks at the metadata; the payload is the kind-specific
/// JSON body and is interpreted by whoever owns the event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// The type tag of the event (e.g. "bucket.Opened").
    #[serde(rename = "type")]
    pub event_type: String,

    /// The stream this event belongs to.
    pub stream_id: StreamId,

    /// The version of the stream after this event.
    pub version: Version,

    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,

    /// The request that caused the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestId>,

    /// The event payload as JSON.
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    pub fn new(
        event_type: impl Into<String>,
        stream_id: StreamId,
        version: Version,
        occurred_at: DateTime<Utc>,
        request_id: Option<RequestId>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            stream_id,
            version,
            occurred_at,
            request_id,
            payload,
        }
    }

    /// Serializes the envelope to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserializes an envelope from JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(request_id: Option<RequestId>) -> EventEnvelope {
        EventEnvelope::new(
            "TestEvent",
            StreamId::new("TestStream"),
            Version::first(),
            Utc::now(),
            request_id,
            serde_json::json!({"item": "test"}),
        )
    }

    #[test]
    fn version_ordering() {
        let v1 = Version::new(1);
        let v2 = Version::new(2);
        assert!(v1 < v2);
        assert_eq!(v1.next(), v2);
    }

    #[test]
    fn version_initial_and_first() {
        assert_eq!(Version::initial().as_u64(), 0);
        assert_eq!(Version::first().as_u64(), 1);
        assert_eq!(Version::initial().next(), Version::first());
    }

    #[test]
    fn version_zero_is_invalid() {
        assert!(Version::initial().validate().is_err());
        assert!(Version::first().validate().is_ok());
    }

    #[test]
    fn envelope_bytes_roundtrip() {
        let original = envelope(Some(RequestId::new()));
        let bytes = original.to_bytes().unwrap();
        let decoded = EventEnvelope::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn envelope_uses_type_key_and_omits_missing_request_id() {
        let value = serde_json::to_value(envelope(None)).unwrap();
        assert_eq!(value["type"], "TestEvent");
        assert_eq!(value["stream_id"], "TestStream");
        assert_eq!(value["version"], 1);
        assert!(value.get("request_id").is_none());
    }

    #[test]
    fn envelope_from_garbage_fails() {
        assert!(EventEnvelope::from_bytes(b"{not json").is_err());
    }
}

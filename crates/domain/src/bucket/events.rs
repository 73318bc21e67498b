//! Bucket domain events.

use chrono::{DateTime, Utc};
use common::{RequestId, StreamId};
use event_store::{EventEnvelope, Version};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregate::DomainEvent;

use super::{Description, Title};

/// Type tag of [`BucketEventData::Opened`].
pub const OPENED: &str = "bucket.Opened";
/// Type tag of [`BucketEventData::Updated`].
pub const UPDATED: &str = "bucket.Updated";
/// Type tag of [`BucketEventData::Closed`].
pub const CLOSED: &str = "bucket.Closed";

/// Errors decoding a stored event.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("unknown event type: {0:?}")]
    UnknownEventType(String),

    #[error("could not decode {event_type} payload")]
    Payload {
        event_type: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Metadata shared by every bucket event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// The bucket's stream.
    pub stream_id: StreamId,

    /// The stream version after this event.
    pub version: Version,

    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,

    /// The request that caused the event.
    pub request_id: Option<RequestId>,
}

impl EventMetadata {
    /// Metadata for an event occurring now.
    pub fn now(stream_id: StreamId, version: Version, request_id: Option<RequestId>) -> Self {
        Self {
            stream_id,
            version,
            occurred_at: Utc::now(),
            request_id,
        }
    }

    fn from_envelope(envelope: &EventEnvelope) -> Self {
        Self {
            stream_id: envelope.stream_id.clone(),
            version: envelope.version,
            occurred_at: envelope.occurred_at,
            request_id: envelope.request_id.clone(),
        }
    }
}

/// Kind-specific part of a bucket event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketEventData {
    /// Bucket was opened.
    Opened(OpenedData),

    /// Bucket title and description were replaced.
    Updated(UpdatedData),

    /// Bucket was closed. No further events may follow.
    Closed(ClosedData),
}

/// Data for the Opened event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenedData {
    pub title: Title,
    pub description: Description,
}

/// Data for the Updated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedData {
    /// New title.
    pub title: Title,

    /// New description.
    pub description: Description,
}

/// Data for the Closed event (empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedData {}

/// An event on a bucket stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketEvent {
    pub metadata: EventMetadata,
    pub data: BucketEventData,
}

impl DomainEvent for BucketEvent {
    fn event_type(&self) -> &'static str {
        match self.data {
            BucketEventData::Opened(_) => OPENED,
            BucketEventData::Updated(_) => UPDATED,
            BucketEventData::Closed(_) => CLOSED,
        }
    }

    fn stream_id(&self) -> &StreamId {
        &self.metadata.stream_id
    }

    fn version(&self) -> Version {
        self.metadata.version
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.metadata.occurred_at
    }

    fn request_id(&self) -> Option<&RequestId> {
        self.metadata.request_id.as_ref()
    }
}

// Convenience constructors for events
impl BucketEvent {
    /// Creates an Opened event.
    pub fn opened(metadata: EventMetadata, title: Title, description: Description) -> Self {
        Self {
            metadata,
            data: BucketEventData::Opened(OpenedData { title, description }),
        }
    }

    /// Creates an Updated event.
    pub fn updated(metadata: EventMetadata, title: Title, description: Description) -> Self {
        Self {
            metadata,
            data: BucketEventData::Updated(UpdatedData { title, description }),
        }
    }

    /// Creates a Closed event.
    pub fn closed(metadata: EventMetadata) -> Self {
        Self {
            metadata,
            data: BucketEventData::Closed(ClosedData {}),
        }
    }

    /// Converts the event to its stored form.
    pub fn encode(&self) -> Result<EventEnvelope, serde_json::Error> {
        let payload = match &self.data {
            BucketEventData::Opened(data) => serde_json::to_value(data)?,
            BucketEventData::Updated(data) => serde_json::to_value(data)?,
            BucketEventData::Closed(data) => serde_json::to_value(data)?,
        };

        Ok(EventEnvelope::new(
            self.event_type(),
            self.metadata.stream_id.clone(),
            self.metadata.version,
            self.metadata.occurred_at,
            self.metadata.request_id.clone(),
            payload,
        ))
    }

    /// Rebuilds an event from its stored form.
    ///
    /// Metadata is taken from the envelope; the payload is interpreted
    /// according to the envelope's type tag.
    pub fn decode(envelope: &EventEnvelope) -> Result<Self, EventError> {
        let data = match envelope.event_type.as_str() {
            OPENED => BucketEventData::Opened(payload(OPENED, envelope)?),
            UPDATED => BucketEventData::Updated(payload(UPDATED, envelope)?),
            CLOSED => BucketEventData::Closed(payload(CLOSED, envelope)?),
            other => return Err(EventError::UnknownEventType(other.to_string())),
        };

        Ok(Self {
            metadata: EventMetadata::from_envelope(envelope),
            data,
        })
    }
}

fn payload<T: for<'de> Deserialize<'de>>(
    event_type: &'static str,
    envelope: &EventEnvelope,
) -> Result<T, EventError> {
    T::deserialize(&envelope.payload).map_err(|source| EventError::Payload { event_type, source })
}

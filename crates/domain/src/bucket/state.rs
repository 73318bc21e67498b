//! Bucket state reconstruction.

use chrono::{DateTime, Utc};
use common::StreamId;
use event_store::{EventEnvelope, Version};

use crate::aggregate::{Aggregate, DomainEvent, fold};
use crate::error::ReduceError;

use super::events::{BucketEvent, BucketEventData, EventError};
use super::{Description, Title};

/// Current state of a bucket, derived from its stream.
///
/// Never stored; rebuilt from the events every time it is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketState {
    id: Option<StreamId>,
    title: Title,
    description: Description,
    closed: bool,
    version: Version,
    updated_at: Option<DateTime<Utc>>,
}

impl Aggregate for BucketState {
    type Event = BucketEvent;

    fn id(&self) -> Option<&StreamId> {
        self.id.as_ref()
    }

    fn version(&self) -> Version {
        self.version
    }

    fn apply(&mut self, event: &BucketEvent) {
        match &event.data {
            BucketEventData::Opened(data) => {
                self.title = data.title.clone();
                self.description = data.description.clone();
                self.closed = false;
            }
            BucketEventData::Updated(data) => {
                self.title = data.title.clone();
                self.description = data.description.clone();
            }
            BucketEventData::Closed(_) => {
                self.closed = true;
            }
        }
        self.id = Some(event.stream_id().clone());
        self.version = event.version();
        self.updated_at = Some(event.occurred_at());
    }
}

// Query methods
impl BucketState {
    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Returns true once the bucket has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns when the last event occurred.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// Folds a bucket stream into its current state.
///
/// The stream must be non-empty and every event must belong to `id`.
pub fn build_state(id: &StreamId, stream: &[BucketEvent]) -> Result<BucketState, ReduceError> {
    fold(id, stream)
}

/// Decodes the stored stream of bucket `id`.
///
/// Events are checked in version order: an event of another stream is
/// reported as [`ReduceError::IdMismatch`] before its type tag is looked at.
/// Unknown type tags and malformed payloads are reported as
/// [`ReduceError::UnknownEvent`] and [`ReduceError::Payload`].
pub fn decode_stream(
    id: &StreamId,
    envelopes: &[EventEnvelope],
) -> Result<Vec<BucketEvent>, ReduceError> {
    envelopes
        .iter()
        .map(|envelope| {
            if &envelope.stream_id != id {
                return Err(ReduceError::IdMismatch {
                    expected: id.clone(),
                    found: envelope.stream_id.clone(),
                    version: envelope.version,
                });
            }
            BucketEvent::decode(envelope).map_err(|err| match err {
                EventError::UnknownEventType(event_type) => ReduceError::UnknownEvent {
                    event_type,
                    version: envelope.version,
                },
                EventError::Payload { source, .. } => ReduceError::Payload {
                    event_type: envelope.event_type.clone(),
                    version: envelope.version,
                    source,
                },
            })
        })
        .collect()
}

/// Decodes a stored stream and folds it into state.
pub fn replay(id: &StreamId, envelopes: &[EventEnvelope]) -> Result<BucketState, ReduceError> {
    build_state(id, &decode_stream(id, envelopes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::events::EventMetadata;

    fn meta(id: &str, version: u64) -> EventMetadata {
        EventMetadata::now(StreamId::new(id), Version::new(version), None)
    }

    fn opened(id: &str) -> BucketEvent {
        BucketEvent::opened(meta(id, 1), "TestTitle".into(), "Test Description".into())
    }

    fn updated(id: &str, version: u64) -> BucketEvent {
        BucketEvent::updated(meta(id, version), "NewTitle".into(), "New Description".into())
    }

    fn closed(id: &str, version: u64) -> BucketEvent {
        BucketEvent::closed(meta(id, version))
    }

    #[test]
    fn test_opened_only() {
        let id = StreamId::new("TestBucket");
        let stream = vec![opened("TestBucket")];

        let state = build_state(&id, &stream).unwrap();

        assert_eq!(state.id(), Some(&id));
        assert_eq!(state.title().as_str(), "TestTitle");
        assert_eq!(state.description().as_str(), "Test Description");
        assert_eq!(state.version(), Version::first());
        assert!(!state.is_closed());
        assert_eq!(state.updated_at(), Some(stream[0].occurred_at()));
    }

    #[test]
    fn test_update_is_last_write_wins() {
        let id = StreamId::new("TestBucket");
        let stream = vec![opened("TestBucket"), updated("TestBucket", 2)];

        let state = build_state(&id, &stream).unwrap();

        assert_eq!(state.version(), Version::new(2));
        assert!(!state.is_closed());
        assert_eq!(state.title().as_str(), "NewTitle");
        assert_eq!(state.description().as_str(), "New Description");
        assert_eq!(state.updated_at(), Some(stream[1].occurred_at()));
    }

    #[test]
    fn test_closed_stream() {
        let id = StreamId::new("TestBucket");
        let stream = vec![
            opened("TestBucket"),
            updated("TestBucket", 2),
            closed("TestBucket", 3),
        ];

        let state = build_state(&id, &stream).unwrap();

        assert!(state.is_closed());
        assert_eq!(state.version(), Version::new(3));
        assert_eq!(state.title().as_str(), "NewTitle");
    }

    #[test]
    fn test_prefixes_fold_to_intermediate_states() {
        let id = StreamId::new("TestBucket");
        let stream = vec![
            opened("TestBucket"),
            updated("TestBucket", 2),
            closed("TestBucket", 3),
        ];

        for len in 1..=stream.len() {
            let state = build_state(&id, &stream[..len]).unwrap();
            assert_eq!(state.version(), Version::new(len as u64));
            assert_eq!(state.is_closed(), len == 3);
        }
    }

    #[test]
    fn test_empty_stream() {
        let result = build_state(&StreamId::new("TestBucket"), &[]);
        assert!(matches!(result, Err(ReduceError::EmptyStream)));
    }

    #[test]
    fn test_wrong_stream() {
        let stream = vec![opened("AnotherBucket"), closed("AnotherBucket", 2)];
        let result = build_state(&StreamId::new("TestBucket"), &stream);
        assert!(matches!(result, Err(ReduceError::IdMismatch { .. })));
    }

    #[test]
    fn test_mismatch_mid_stream() {
        let stream = vec![opened("TestBucket"), updated("AnotherBucket", 2)];
        let result = build_state(&StreamId::new("TestBucket"), &stream);
        assert!(matches!(
            result,
            Err(ReduceError::IdMismatch { version, .. }) if version == Version::new(2)
        ));
    }

    #[test]
    fn test_replay_from_envelopes() {
        let id = StreamId::new("TestBucket");
        let envelopes: Vec<_> = [opened("TestBucket"), closed("TestBucket", 2)]
            .iter()
            .map(|e| e.encode().unwrap())
            .collect();

        let state = replay(&id, &envelopes).unwrap();
        assert!(state.is_closed());
        assert_eq!(state.version(), Version::new(2));
    }

    #[test]
    fn test_replay_unknown_event() {
        let id = StreamId::new("TestBucket");
        let mut envelopes: Vec<_> = [opened("TestBucket"), updated("TestBucket", 2)]
            .iter()
            .map(|e| e.encode().unwrap())
            .collect();
        envelopes[1].event_type = "bucket.Archived".to_string();

        let result = replay(&id, &envelopes);
        assert!(matches!(
            result,
            Err(ReduceError::UnknownEvent { ref event_type, version })
                if event_type == "bucket.Archived" && version == Version::new(2)
        ));
    }

    #[test]
    fn test_replay_malformed_payload() {
        let id = StreamId::new("TestBucket");
        let mut envelope = opened("TestBucket").encode().unwrap();
        envelope.payload = serde_json::json!("not an object");

        let result = replay(&id, &[envelope]);
        assert!(matches!(result, Err(ReduceError::Payload { .. })));
    }

    #[test]
    fn test_replay_reports_foreign_event_before_unknown_type() {
        let id = StreamId::new("TestBucket");
        let mut envelopes: Vec<_> = [opened("AnotherBucket"), updated("AnotherBucket", 2)]
            .iter()
            .map(|e| e.encode().unwrap())
            .collect();
        envelopes[1].event_type = "bucket.Archived".to_string();

        let result = replay(&id, &envelopes);
        assert!(matches!(
            result,
            Err(ReduceError::IdMismatch { ref found, version, .. })
                if found.as_str() == "AnotherBucket" && version == Version::first()
        ));
    }

    #[test]
    fn test_decode_stream_checks_ids_in_order() {
        let id = StreamId::new("TestBucket");
        let mut envelopes: Vec<_> = [opened("TestBucket"), updated("AnotherBucket", 2)]
            .iter()
            .map(|e| e.encode().unwrap())
            .collect();
        envelopes[0].event_type = "bucket.Archived".to_string();

        // the unknown event comes first, so it wins
        let result = decode_stream(&id, &envelopes);
        assert!(matches!(
            result,
            Err(ReduceError::UnknownEvent { version, .. }) if version == Version::first()
        ));
    }
}

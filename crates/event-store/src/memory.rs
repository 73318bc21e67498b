use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    EventEnvelope, EventStoreError, Result, StreamId, Version,
    store::{EventStore, expected_next},
};

type Streams = HashMap<StreamId, Vec<EventEnvelope>>;

/// In-memory event store.
///
/// Every stream is a `Vec` of envelopes in version order. Appends take the
/// write lock for both the version check and the push, so concurrent
/// writers to the same stream are serialized; readers share the read lock
/// and always see whole events.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    streams: Arc<RwLock<Streams>>,
}

impl InMemoryEventStore {
    /// Creates a new empty in-memory event store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of events stored across all streams.
    pub async fn event_count(&self) -> usize {
        self.streams.read().await.values().map(Vec::len).sum()
    }

    /// Returns the number of streams.
    pub async fn stream_count(&self) -> usize {
        self.streams.read().await.len()
    }

    /// Clears all streams.
    pub async fn clear(&self) {
        self.streams.write().await.clear();
    }

    fn append(streams: &mut Streams, event: EventEnvelope) -> Result<Version> {
        let current = streams
            .get(&event.stream_id)
            .map(|events| Version::new(events.len() as u64));
        let expected = expected_next(current);

        if event.version != expected {
            metrics::counter!("event_store_version_conflicts_total").increment(1);
            tracing::warn!(
                stream_id = %event.stream_id,
                %expected,
                found = %event.version,
                "version conflict"
            );
            return Err(EventStoreError::VersionConflict {
                stream_id: event.stream_id,
                expected,
                found: event.version,
            });
        }

        let version = event.version;
        streams
            .entry(event.stream_id.clone())
            .or_default()
            .push(event);
        metrics::counter!("event_store_events_inserted_total").increment(1);

        Ok(version)
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn get_stream(&self, stream_id: &StreamId) -> Result<Vec<EventEnvelope>> {
        let streams = self.streams.read().await;
        streams
            .get(stream_id)
            .cloned()
            .ok_or_else(|| EventStoreError::StreamNotFound(stream_id.clone()))
    }

    async fn insert_event(&self, event: EventEnvelope) -> Result<Version> {
        let mut streams = self.streams.write().await;
        Self::append(&mut streams, event)
    }

    async fn open_stream(&self, event: EventEnvelope) -> Result<Version> {
        let mut streams = self.streams.write().await;
        if streams.contains_key(&event.stream_id) {
            return Err(EventStoreError::AlreadyExists(event.stream_id));
        }
        Self::append(&mut streams, event)
    }

    async fn stream_version(&self, stream_id: &StreamId) -> Result<Option<Version>> {
        let streams = self.streams.read().await;
        Ok(streams
            .get(stream_id)
            .and_then(|events| events.last())
            .map(|e| e.version))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::EventStoreExt;

    fn create_test_event(stream_id: &str, version: u64, event_type: &str) -> EventEnvelope {
        EventEnvelope::new(
            event_type,
            StreamId::new(stream_id),
            Version::new(version),
            Utc::now(),
            None,
            serde_json::json!({"test": true}),
        )
    }

    #[tokio::test]
    async fn insert_first_event() {
        let store = InMemoryEventStore::new();
        let event = create_test_event("Stream1", 1, "TestEvent");

        let result = store.insert_event(event).await;
        assert_eq!(result.unwrap(), Version::first());

        let events = store.get_stream(&StreamId::new("Stream1")).await.unwrap();
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn insert_sequential_events() {
        let store = InMemoryEventStore::new();

        for version in 1..=3 {
            let event = create_test_event("Stream1", version, "Event");
            assert_eq!(
                store.insert_event(event).await.unwrap(),
                Version::new(version)
            );
        }

        let stored = store.get_stream(&StreamId::new("Stream1")).await.unwrap();
        let versions: Vec<u64> = stored.iter().map(|e| e.version.as_u64()).collect();
        assert_eq!(versions, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn first_event_must_carry_version_one() {
        let store = InMemoryEventStore::new();

        for version in [0, 2] {
            let result = store
                .insert_event(create_test_event("Stream1", version, "Event"))
                .await;
            assert!(matches!(
                result,
                Err(EventStoreError::VersionConflict { expected, .. }) if expected == Version::first()
            ));
        }
        assert_eq!(store.event_count().await, 0);
    }

    #[tokio::test]
    async fn version_conflict_on_duplicate_or_gap() {
        let store = InMemoryEventStore::new();
        store
            .insert_event(create_test_event("Stream1", 1, "Event1"))
            .await
            .unwrap();

        let duplicate = store
            .insert_event(create_test_event("Stream1", 1, "Event2"))
            .await;
        assert!(matches!(
            duplicate,
            Err(EventStoreError::VersionConflict { expected, found, .. })
                if expected == Version::new(2) && found == Version::first()
        ));

        let gap = store
            .insert_event(create_test_event("Stream1", 3, "Event3"))
            .await;
        assert!(gap.unwrap_err().is_conflict());

        assert_eq!(store.event_count().await, 1);
    }

    #[tokio::test]
    async fn get_missing_stream_fails_not_found() {
        let store = InMemoryEventStore::new();
        let result = store.get_stream(&StreamId::new("Missing")).await;
        assert!(matches!(result, Err(EventStoreError::StreamNotFound(id)) if id.as_str() == "Missing"));
    }

    #[tokio::test]
    async fn open_stream_rejects_existing_stream() {
        let store = InMemoryEventStore::new();
        store
            .open_stream(create_test_event("Stream1", 1, "Opened"))
            .await
            .unwrap();

        let again = store
            .open_stream(create_test_event("Stream1", 1, "Opened"))
            .await;
        assert!(matches!(again, Err(EventStoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn open_stream_still_checks_version() {
        let store = InMemoryEventStore::new();
        let result = store
            .open_stream(create_test_event("Stream1", 2, "Opened"))
            .await;
        assert!(matches!(result, Err(EventStoreError::VersionConflict { .. })));
        assert!(!store.stream_exists(&StreamId::new("Stream1")).await.unwrap());
    }

    #[tokio::test]
    async fn streams_are_independent() {
        let store = InMemoryEventStore::new();
        store
            .insert_event(create_test_event("StreamA", 1, "Event"))
            .await
            .unwrap();
        store
            .insert_event(create_test_event("StreamB", 1, "Event"))
            .await
            .unwrap();
        store
            .insert_event(create_test_event("StreamA", 2, "Event"))
            .await
            .unwrap();

        assert_eq!(store.stream_count().await, 2);
        assert_eq!(store.event_count().await, 3);
        assert_eq!(
            store.stream_version(&StreamId::new("StreamA")).await.unwrap(),
            Some(Version::new(2))
        );
        assert_eq!(
            store.stream_version(&StreamId::new("StreamB")).await.unwrap(),
            Some(Version::first())
        );
        assert_eq!(
            store.stream_version(&StreamId::new("StreamC")).await.unwrap(),
            None
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_of_same_version_have_one_winner() {
        let store = InMemoryEventStore::new();
        store
            .insert_event(create_test_event("Contended", 1, "Opened"))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert_event(create_test_event("Contended", 2, "Updated"))
                    .await
            }));
        }

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(EventStoreError::VersionConflict { .. }) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(
            store.get_stream(&StreamId::new("Contended")).await.unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = InMemoryEventStore::new();
        store
            .insert_event(create_test_event("Stream1", 1, "Event"))
            .await
            .unwrap();
        store.clear().await;
        assert_eq!(store.event_count().await, 0);
        assert_eq!(store.stream_count().await, 0);
    }
}

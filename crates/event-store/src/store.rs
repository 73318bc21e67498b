use async_trait::async_trait;

use crate::{EventEnvelope, Result, StreamId, Version};

/// Port for stream storage.
///
/// Streams are independent append-only logs keyed by [`StreamId`].
/// Implementations must be thread-safe (Send + Sync) and must make the
/// version check and the append of [`EventStore::insert_event`] a single
/// atomic step, so that at most one event is ever stored per
/// (stream, version) pair.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Retrieves all events of a stream in version order (oldest first).
    ///
    /// Fails with `StreamNotFound` if the stream has no events.
    async fn get_stream(&self, stream_id: &StreamId) -> Result<Vec<EventEnvelope>>;

    /// Appends an event to its stream.
    ///
    /// The event version must be exactly one past the stream's current
    /// version (1 for a stream that does not exist yet), otherwise the call
    /// fails with `VersionConflict` and nothing is stored.
    ///
    /// Returns the new version of the stream.
    async fn insert_event(&self, event: EventEnvelope) -> Result<Version>;

    /// Appends the first event of a new stream.
    ///
    /// Same as [`EventStore::insert_event`], but fails with `AlreadyExists`
    /// when the stream is already present.
    async fn open_stream(&self, event: EventEnvelope) -> Result<Version>;

    /// Gets the current version of a stream.
    ///
    /// Returns None if the stream doesn't exist.
    async fn stream_version(&self, stream_id: &StreamId) -> Result<Option<Version>>;
}

/// Extension trait providing convenience methods for event stores.
#[async_trait]
pub trait EventStoreExt: EventStore {
    /// Checks if a stream exists (has any events).
    async fn stream_exists(&self, stream_id: &StreamId) -> Result<bool> {
        Ok(self.stream_version(stream_id).await?.is_some())
    }
}

// Blanket implementation for all EventStore implementations
impl<T: EventStore + ?Sized> EventStoreExt for T {}

/// Returns the version a stream at `current` expects from its next event.
pub fn expected_next(current: Option<Version>) -> Version {
    current.unwrap_or(Version::initial()).next()
}

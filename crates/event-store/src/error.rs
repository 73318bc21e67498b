use thiserror::Error;

use crate::{StreamId, Version};

/// Errors that can occur when interacting with the event store.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// The event does not carry the version the stream expects next.
    /// Another writer got there first, or the caller built the event
    /// from a stale stream.
    #[error("version conflict for stream {stream_id}: expected version {expected}, found {found}")]
    VersionConflict {
        stream_id: StreamId,
        expected: Version,
        found: Version,
    },

    /// The stream was not found in the event store.
    #[error("stream not found: {0}")]
    StreamNotFound(StreamId),

    /// A stream with this ID has already been opened.
    #[error("stream already exists: {0}")]
    AlreadyExists(StreamId),
}

impl EventStoreError {
    /// Returns true if retrying against a freshly loaded stream may succeed.
    pub fn is_conflict(&self) -> bool {
        matches!(self, EventStoreError::VersionConflict { .. })
    }
}

/// Result type for event store operations.
pub type Result<T> = std::result::Result<T, EventStoreError>;

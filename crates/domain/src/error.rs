//! State reconstruction errors.

use common::StreamId;
use event_store::Version;
use thiserror::Error;

/// Errors raised while folding a stream into aggregate state.
///
/// All of these mean the stream itself is unusable. Callers wrap them with
/// the operation they were attempting; they are never surfaced raw.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// There are no events to fold.
    #[error("empty stream")]
    EmptyStream,

    /// An event belongs to a different stream than the one being rebuilt.
    #[error("id mismatch: expected stream {expected}, found {found} at version {version}")]
    IdMismatch {
        expected: StreamId,
        found: StreamId,
        version: Version,
    },

    /// A stored event carries a type tag this aggregate does not know.
    #[error("stream contains unknown event type {event_type:?} at version {version}")]
    UnknownEvent { event_type: String, version: Version },

    /// A stored event's payload does not match its type.
    #[error("malformed {event_type} payload at version {version}")]
    Payload {
        event_type: String,
        version: Version,
        #[source]
        source: serde_json::Error,
    },
}

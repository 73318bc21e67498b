//! Core aggregate and domain event traits.

use chrono::{DateTime, Utc};
use common::{RequestId, StreamId};
use event_store::Version;

use crate::error::ReduceError;

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense. Every event
/// carries the metadata that places it in its stream.
pub trait DomainEvent: Send + Sync + Clone {
    /// Returns the event type name.
    ///
    /// This is the tag written to the event store.
    fn event_type(&self) -> &'static str;

    /// Returns the stream this event belongs to.
    fn stream_id(&self) -> &StreamId;

    /// Returns the stream version produced by this event.
    fn version(&self) -> Version;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Returns the request that caused the event, if known.
    fn request_id(&self) -> Option<&RequestId>;
}

/// Trait for aggregates in an event-sourced system.
///
/// In event sourcing, aggregates:
/// - Are rebuilt by replaying events
/// - Generate events from commands
/// - Apply events to update state (pure, deterministic)
pub trait Aggregate: Default + Send + Sync + Sized {
    /// The type of events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate's stream ID.
    ///
    /// Returns None for a new, uninitialized aggregate.
    fn id(&self) -> Option<&StreamId>;

    /// Returns the current version of the aggregate.
    ///
    /// Version starts at 0 for a new aggregate and follows the version of
    /// the last applied event.
    fn version(&self) -> Version;

    /// Applies an event to the aggregate, updating its state.
    ///
    /// This method must be pure and deterministic:
    /// - Given the same state and event, it must always produce the same new state
    /// - It must not have side effects
    /// - It must not fail (events represent facts that have happened)
    fn apply(&mut self, event: &Self::Event);
}

/// Rebuilds an aggregate by folding `stream` from the default state.
///
/// Fails on an empty stream, and on the first event whose stream ID is not
/// `id`. Works on any prefix of a stream.
pub fn fold<A: Aggregate>(id: &StreamId, stream: &[A::Event]) -> Result<A, ReduceError> {
    if stream.is_empty() {
        return Err(ReduceError::EmptyStream);
    }

    let mut aggregate = A::default();

    for event in stream {
        if event.stream_id() != id {
            return Err(ReduceError::IdMismatch {
                expected: id.clone(),
                found: event.stream_id().clone(),
                version: event.version(),
            });
        }
        aggregate.apply(event);
    }

    Ok(aggregate)
}

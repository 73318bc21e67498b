//! Command trait.

use common::{RequestId, StreamId, Validate};

/// Trait for commands targeting a single stream.
///
/// Commands represent an intention to perform an action. They are checked
/// with [`Validate`] before any state is loaded, and may still be rejected
/// by the handler if the aggregate's current state doesn't allow the action.
pub trait Command: Validate + Send + Sync {
    /// Returns the ID of the stream this command targets.
    fn stream_id(&self) -> &StreamId;

    /// Returns the ID of the request carrying this command, if any.
    fn request_id(&self) -> Option<&RequestId>;
}

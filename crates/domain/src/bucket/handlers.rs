//! Bucket command handlers.
//!
//! Each handler is a pure function from a command (and, except for
//! [`open`], the bucket's current stream) to the single event it produces.
//! Storing the event is the caller's job.

use common::Validate;
use event_store::Version;

use crate::aggregate::Aggregate;

use super::events::{BucketEvent, EventMetadata};
use super::state::build_state;
use super::{BucketError, CloseBucket, OpenBucket, UpdateBucket};

/// Opens a bucket.
///
/// Does not look at any stream; a duplicate open is rejected by the store.
#[tracing::instrument(level = "debug", skip_all, fields(stream_id = %cmd.id))]
pub fn open(cmd: &OpenBucket) -> Result<BucketEvent, BucketError> {
    cmd.validate().map_err(BucketError::InvalidArguments)?;

    let metadata = EventMetadata::now(cmd.id.clone(), Version::first(), cmd.request_id.clone());
    Ok(BucketEvent::opened(
        metadata,
        cmd.title.clone(),
        cmd.description.clone(),
    ))
}

/// Replaces the title and description of an open bucket.
#[tracing::instrument(level = "debug", skip_all, fields(stream_id = %cmd.id, events = stream.len()))]
pub fn update(cmd: &UpdateBucket, stream: &[BucketEvent]) -> Result<BucketEvent, BucketError> {
    cmd.validate().map_err(BucketError::InvalidArguments)?;

    let state = build_state(&cmd.id, stream).map_err(|source| BucketError::State {
        action: "update",
        source,
    })?;

    if state.is_closed() {
        return Err(BucketError::BucketClosed);
    }

    let metadata = EventMetadata::now(
        cmd.id.clone(),
        state.version().next(),
        cmd.request_id.clone(),
    );
    Ok(BucketEvent::updated(
        metadata,
        cmd.title.clone(),
        cmd.description.clone(),
    ))
}

/// Closes an open bucket.
#[tracing::instrument(level = "debug", skip_all, fields(stream_id = %cmd.id, events = stream.len()))]
pub fn close(cmd: &CloseBucket, stream: &[BucketEvent]) -> Result<BucketEvent, BucketError> {
    cmd.validate().map_err(BucketError::InvalidArguments)?;

    let state = build_state(&cmd.id, stream).map_err(|source| BucketError::State {
        action: "closing",
        source,
    })?;

    if state.is_closed() {
        return Err(BucketError::AlreadyClosed);
    }

    let metadata = EventMetadata::now(
        cmd.id.clone(),
        state.version().next(),
        cmd.request_id.clone(),
    );
    Ok(BucketEvent::closed(metadata))
}

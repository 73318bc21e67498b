//! Bucket view: the query-side shape of a bucket.

use chrono::{DateTime, Utc};
use common::StreamId;
use domain::{Aggregate, BucketEvent, BucketState, build_state};
use event_store::Version;
use serde::{Deserialize, Serialize};

use crate::{ProjectionError, Result};

/// Read-only projection of a bucket.
///
/// Field names are part of the query API and do not follow
/// [`BucketState`] renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketView {
    pub id: StreamId,
    pub title: String,
    pub description: String,
    pub version: Version,
    pub is_closed: bool,
    pub last_update: DateTime<Utc>,
}

impl BucketView {
    /// Copies the queryable fields out of a folded state.
    pub fn from_state(id: StreamId, state: &BucketState) -> Self {
        Self {
            id,
            title: state.title().to_string(),
            description: state.description().to_string(),
            version: state.version(),
            is_closed: state.is_closed(),
            last_update: state.updated_at().unwrap_or_default(),
        }
    }
}

/// Builds the view of bucket `id` from its stream.
#[tracing::instrument(level = "debug", skip(stream), fields(events = stream.len()))]
pub fn new_view(id: &StreamId, stream: &[BucketEvent]) -> Result<BucketView> {
    let state = build_state(id, stream).map_err(ProjectionError::State)?;
    Ok(BucketView::from_state(id.clone(), &state))
}

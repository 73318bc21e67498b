//! Bucket aggregate and related types.

mod commands;
mod events;
mod handlers;
mod state;
mod values;

pub use commands::{CloseBucket, OpenBucket, UpdateBucket};
pub use events::{
    BucketEvent, BucketEventData, CLOSED, ClosedData, EventError, EventMetadata, OPENED,
    OpenedData, UPDATED, UpdatedData,
};
pub use handlers::{close, open, update};
pub use state::{BucketState, build_state, decode_stream, replay};
pub use values::{Description, Title};

use common::{ErrorKind, ValidationError};
use thiserror::Error;

use crate::error::ReduceError;

/// Errors returned by the bucket command handlers.
#[derive(Debug, Error)]
pub enum BucketError {
    /// The command failed validation.
    #[error("invalid arguments")]
    InvalidArguments(#[source] ValidationError),

    /// The bucket is closed and cannot be updated.
    #[error("bucket is closed")]
    BucketClosed,

    /// The bucket is closed already.
    #[error("bucket already closed")]
    AlreadyClosed,

    /// The stream could not be folded into state.
    #[error("error building state for {action}")]
    State {
        action: &'static str,
        #[source]
        source: ReduceError,
    },
}

impl BucketError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BucketError::InvalidArguments(_) => ErrorKind::Validation,
            BucketError::BucketClosed | BucketError::AlreadyClosed => ErrorKind::Expected,
            BucketError::State { .. } => ErrorKind::Unexpected,
        }
    }
}

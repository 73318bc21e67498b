//! Service error types with error-kind mapping.

use common::{ErrorKind, ValidationError};
use domain::{BucketError, ReduceError};
use event_store::EventStoreError;
use projections::ProjectionError;
use thiserror::Error;

/// Errors returned by [`crate::BucketService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The command failed validation before anything was loaded.
    #[error("invalid arguments")]
    InvalidRequest(#[source] ValidationError),

    /// The stream could not be read.
    #[error("could not load stream")]
    Load(#[source] EventStoreError),

    /// The stored stream could not be decoded.
    #[error("could not decode stream")]
    Decode(#[source] ReduceError),

    /// The handler refused the command.
    #[error(transparent)]
    Rejected(#[from] BucketError),

    /// The event could not be converted to its stored form.
    #[error("could not encode event")]
    Encode(#[source] serde_json::Error),

    /// The store refused the event.
    #[error("could not store event")]
    Insert(#[source] EventStoreError),

    /// The view could not be built from the stored stream.
    #[error(transparent)]
    View(#[from] ProjectionError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::InvalidRequest(_) => ErrorKind::Validation,
            ServiceError::Load(EventStoreError::StreamNotFound(_)) => ErrorKind::NotFound,
            ServiceError::Insert(EventStoreError::AlreadyExists(_)) => ErrorKind::AlreadyExists,
            ServiceError::Rejected(err) => err.kind(),
            ServiceError::Load(_)
            | ServiceError::Decode(_)
            | ServiceError::Encode(_)
            | ServiceError::Insert(_)
            | ServiceError::View(_) => ErrorKind::Unexpected,
        }
    }

    /// Returns true if the same command may succeed when sent again.
    ///
    /// Only a lost version race on update or close qualifies: the retry
    /// reloads the stream. A duplicate open is reported as `AlreadyExists`.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Insert(err) if err.is_conflict())
    }
}

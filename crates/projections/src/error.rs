//! Projection error types.

use domain::ReduceError;
use thiserror::Error;

/// Errors that can occur while projecting a stream.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The stream could not be folded into state.
    #[error("error building view")]
    State(#[source] ReduceError),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;

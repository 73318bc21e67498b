//! Shared building blocks for the bucket event store.
//!
//! - [`StreamId`] and [`RequestId`] value objects
//! - [`Validate`] and [`validate_args`] for chained input validation
//! - [`ErrorKind`] taxonomy and [`report`] for rendering error chains

pub mod error;
pub mod types;
pub mod validation;

pub use error::{ErrorKind, report};
pub use types::{RequestId, StreamId};
pub use validation::{Validate, ValidationError, validate_args};

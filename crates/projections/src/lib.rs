//! Read-side views for the bucket event store.
//!
//! Views are stateless projections: every query folds the full stream
//! again, so the same stream always yields the same [`BucketView`].

pub mod error;
pub mod view;

pub use error::{ProjectionError, Result};
pub use view::{BucketView, new_view};

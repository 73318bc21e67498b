//! Domain layer for the bucket event store.
//!
//! This crate provides the core domain abstractions including:
//! - Aggregate trait and the generic stream [`fold`]
//! - DomainEvent trait for domain events
//! - Command trait for validated commands
//! - Bucket aggregate: events, state reducer and command handlers

pub mod aggregate;
pub mod bucket;
pub mod command;
pub mod error;

pub use aggregate::{Aggregate, DomainEvent, fold};
pub use bucket::{
    BucketError, BucketEvent, BucketEventData, BucketState, CloseBucket, Description, EventError,
    EventMetadata, OpenBucket, Title, UpdateBucket, build_state, close, decode_stream, open,
    replay, update,
};
pub use command::Command;
pub use error::ReduceError;

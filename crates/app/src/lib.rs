//! Bucket service with observability.
//!
//! Wires the bucket handlers to an event store and answers every command
//! with the bucket's view, with structured logging (tracing) and metrics.

pub mod config;
pub mod error;
pub mod service;
pub mod telemetry;

pub use config::{Config, LogFormat};
pub use error::ServiceError;
pub use service::BucketService;

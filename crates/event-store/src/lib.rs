pub mod error;
pub mod event;
pub mod memory;
pub mod store;

pub use common::StreamId;
pub use error::{EventStoreError, Result};
pub use event::{EventEnvelope, Version};
pub use memory::InMemoryEventStore;
pub use store::{EventStore, EventStoreExt};

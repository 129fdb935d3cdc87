//! Pub/sub transport for job submissions and status updates.
//!
//! [`MessageBus`] is the seam the pipeline talks through. [`RedisBus`] is
//! the production transport (Redis pub/sub, shared with the submitting
//! service and any live subscribers); [`InMemoryBus`] is a process-local
//! broadcast fan-out for tests and single-process setups.

pub mod bus;
pub mod memory;
pub mod redis_bus;

pub use bus::{BusError, MessageBus};
pub use memory::InMemoryBus;
pub use redis_bus::RedisBus;

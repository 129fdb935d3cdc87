//! Bounded admission for generation calls.
//!
//! The generation backend is accelerator-memory-limited, so at most N calls
//! may run at once. [`SlotPool`] carries no job semantics; it is a counting
//! admission primitive and nothing else.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// A fixed pool of N concurrency slots.
///
/// Waiters are served in arrival order (the tokio semaphore queues fairly),
/// so a burst of submissions cannot starve an earlier one. Cheaply
/// cloneable; clones share the same slots.
#[derive(Clone)]
pub struct SlotPool {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl SlotPool {
    /// Create a pool admitting at most `capacity` concurrent holders.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero — a pool that can never admit anything
    /// is a configuration error worth failing fast on.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "slot pool capacity must be at least 1");
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Wait until a slot is free and take it.
    ///
    /// The returned [`SlotPermit`] frees the slot when dropped, on every
    /// exit path including panic unwind.
    pub async fn acquire(&self) -> SlotPermit {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            // The pool never closes its semaphore, so acquisition only
            // completes successfully.
            .expect("slot pool semaphore closed");
        SlotPermit { _permit: permit }
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots not currently held.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// Holding this authorizes one generation call to run.
pub struct SlotPermit {
    _permit: OwnedSemaphorePermit,
}

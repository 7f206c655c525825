//! Shared state for the HTTP server.
//!
//! Wraps the CarStore in the one lock every handler goes through.

use carstore_core::CarStore;
use std::sync::{Mutex, MutexGuard};

/// Shared state available to all HTTP handlers.
///
/// The store does blocking `std::fs` writes while the lock is held, so
/// handlers reach it from `tokio::task::spawn_blocking` rather than from an
/// async worker.
pub struct SharedState {
    store: Mutex<CarStore>,
}

impl SharedState {
    /// Create a new shared state around a loaded store.
    pub fn new(store: CarStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Lock the store for one read-modify-write-persist step.
    ///
    /// Holding the guard across the file write serializes requests. A
    /// poisoned lock is recovered: the store only swaps in a new registry
    /// after a successful save, so it is never left half-updated.
    pub fn store(&self) -> MutexGuard<'_, CarStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

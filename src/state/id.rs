//! Client identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identifier for one accepted connection.
pub type ClientId = u64;

/// Issues client identifiers from a monotonic counter.
///
/// Identifiers are never reused within a process, so a stale id can never
/// remove a newer client from the registry.
pub struct ClientIdGenerator {
    counter: AtomicU64,
}

const FIRST_CLIENT_ID: u64 = 1;

impl ClientIdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(FIRST_CLIENT_ID),
        }
    }

    /// Generate the next unique id.
    pub fn next(&self) -> ClientId {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for ClientIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

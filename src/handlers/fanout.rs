//! Broadcast fan-out to every registered client.

use crate::state::Registry;
use std::sync::Arc;
use tracing::debug;

/// Outcome of one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Queue `message` on every client in the registry, the sender included.
///
/// A client whose queue is full or whose connection is closed is skipped;
/// the remaining clients still receive the message. Failed clients are left
/// in the registry: each handler removes itself when its own I/O fails.
pub fn broadcast(registry: &Registry, message: impl Into<Arc<str>>) -> BroadcastReport {
    let message: Arc<str> = message.into();
    let mut report = BroadcastReport::default();

    for client in registry.snapshot() {
        match client.send(Arc::clone(&message)) {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                report.failed += 1;
                debug!(
                    client = %client.id(),
                    code = e.error_code(),
                    "Broadcast delivery failed"
                );
            }
        }
    }

    report
}

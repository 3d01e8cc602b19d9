//! Registry of live clients.

use crate::state::dashmap_ext::DashMapExt;
use crate::state::{ClientHandle, ClientId};
use dashmap::DashMap;
use std::sync::Arc;

/// The set of currently active clients.
///
/// Inserted into by the accept loop, removed from by each handler as it
/// closes, and snapshotted by every broadcast. All operations are safe to
/// run concurrently.
#[derive(Debug, Default)]
pub struct Registry {
    clients: DashMap<ClientId, Arc<ClientHandle>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, client: Arc<ClientHandle>) {
        self.clients.insert(client.id(), client);
    }

    /// Remove a client. Returns `false` if it was not registered.
    pub fn remove(&self, id: ClientId) -> bool {
        self.clients.remove(&id).is_some()
    }

    pub fn get(&self, id: ClientId) -> Option<Arc<ClientHandle>> {
        self.clients.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Every client registered at the time of the call.
    ///
    /// Clients added or removed while the caller iterates the snapshot may
    /// or may not be reflected.
    pub fn snapshot(&self) -> Vec<Arc<ClientHandle>> {
        self.clients.values_cloned()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

//! Process-wide server state.

use crate::config::Config;
use crate::state::{ClientId, ClientIdGenerator, Registry};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tracing::info;

/// Lifecycle of the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerPhase {
    Idle,
    Listening,
    ShuttingDown,
    Stopped,
}

/// State shared by the accept loop and every handler.
pub struct ServerState {
    config: Config,
    registry: Registry,
    ids: ClientIdGenerator,
    done: AtomicBool,
    phase: Mutex<ServerPhase>,
    shutdown_tx: watch::Sender<bool>,
}

impl ServerState {
    pub fn new(config: Config) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            config,
            registry: Registry::new(),
            ids: ClientIdGenerator::new(),
            done: AtomicBool::new(false),
            phase: Mutex::new(ServerPhase::Idle),
            shutdown_tx,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn next_client_id(&self) -> ClientId {
        self.ids.next()
    }

    pub fn phase(&self) -> ServerPhase {
        *self.phase.lock()
    }

    pub(crate) fn set_phase(&self, phase: ServerPhase) {
        *self.phase.lock() = phase;
    }

    pub fn is_shutting_down(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    /// Receiver that flips to `true` when shutdown begins.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// Stop accepting and close every registered client.
    ///
    /// Safe to call from any task, any number of times; only the first call
    /// acts, and it returns `true`.
    pub fn shutdown(&self) -> bool {
        if self.done.swap(true, Ordering::SeqCst) {
            return false;
        }

        {
            let mut phase = self.phase.lock();
            if *phase != ServerPhase::Stopped {
                *phase = ServerPhase::ShuttingDown;
            }
        }
        self.shutdown_tx.send_replace(true);

        let clients = self.registry.snapshot();
        info!(
            server = %self.config.server.name,
            clients = clients.len(),
            "Shutting down"
        );
        for client in clients {
            client.shutdown();
        }
        true
    }
}

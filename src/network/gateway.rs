//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the listening socket and spawns one
//! [`ConnectionHandler`] task per accepted client. It stops on the shared
//! shutdown signal or on the first accept failure.

use crate::config::{self, Config};
use crate::error::ServerError;
use crate::handlers::ConnectionHandler;
use crate::network::Connection;
use crate::state::{ServerPhase, ServerState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, instrument};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    state: Arc<ServerState>,
}

impl Gateway {
    /// Validate the configuration and bind the listen address.
    pub async fn bind(config: Config) -> Result<Self, ServerError> {
        if let Err(errors) = config::validate(&config) {
            for e in &errors {
                error!(error = %e, "Invalid configuration");
            }
            return Err(ServerError::Invalid(errors));
        }

        let addr = config.listen.address;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        let state = Arc::new(ServerState::new(config));
        state.set_phase(ServerPhase::Listening);
        info!(
            server = %state.config().server.name,
            addr = %listener.local_addr().unwrap_or(addr),
            "Listener bound"
        );

        Ok(Self { listener, state })
    }

    /// The address actually bound (useful when binding port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Shared state; call [`ServerState::shutdown`] on it to stop the server.
    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    /// Accept connections until shutdown.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) {
        let mut shutdown = self.state.shutdown_signal();

        loop {
            tokio::select! {
                _ = shutdown.wait_for(|stop| *stop) => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => self.admit(stream, addr),
                    Err(e) => {
                        error!(error = %e, "Failed to accept connection");
                        self.state.shutdown();
                        break;
                    }
                },
            }
        }

        drop(self.listener);
        // No-op when shutdown was what ended the loop.
        self.state.shutdown();
        self.state.set_phase(ServerPhase::Stopped);
        info!("Listener closed");
    }

    /// Register a freshly accepted client and start its task.
    fn admit(&self, stream: TcpStream, addr: SocketAddr) {
        if self.state.is_shutting_down() {
            debug!(%addr, "Connection refused during shutdown");
            return;
        }

        let id = self.state.next_client_id();
        let conn = Connection::new(id, stream, addr, &self.state.config().limits);
        let handler = ConnectionHandler::new(conn, Arc::clone(&self.state));
        let client = handler.client();
        self.state.registry().add(Arc::clone(&client));

        // Shutdown may have snapshotted the registry just before the add.
        if self.state.is_shutting_down() {
            client.shutdown();
        }

        debug!(client = id, %addr, "Connection accepted");
        tokio::spawn(handler.run());
    }
}

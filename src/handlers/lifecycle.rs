//! Per-client protocol loop.
//!
//! Each accepted connection runs one [`ConnectionHandler`] on its own task:
//!
//! ```text
//! Connecting → Registering → Active → Closing → Closed
//!                   │           │         ▲
//!                   └───────────┴─────────┘  (EOF, I/O error, /quit,
//!                                             idle timeout, shutdown)
//! ```

use super::fanout::broadcast;
use super::replies::{INPUT_TOO_LONG, join_notice, leave_notice};
use super::{Context, Flow, dispatch};
use crate::network::Connection;
use crate::network::connection::{ReadErrorAction, classify_read_error};
use crate::state::{ClientHandle, HandlerState, ServerState};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Why a client left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Departure {
    /// Sent `/quit`; the leave notice has already gone out.
    Quit,
    /// End of stream, transport failure, or closed by the server.
    Disconnected,
    /// Silent for longer than the configured idle timeout.
    TimedOut,
    /// Sent a line over the length limit.
    InputTooLong,
}

impl Departure {
    fn as_str(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::Disconnected => "disconnected",
            Self::TimedOut => "idle_timeout",
            Self::InputTooLong => "input_too_long",
        }
    }
}

enum ReadOutcome {
    Line(String),
    Ended(Departure),
}

/// Runs the protocol for one client.
pub struct ConnectionHandler {
    conn: Connection,
    client: Arc<ClientHandle>,
    server: Arc<ServerState>,
}

impl ConnectionHandler {
    /// Wrap a fresh connection and queue its nickname prompt.
    ///
    /// The prompt is queued here, before the client can be added to the
    /// registry, so it is always the first line the peer receives.
    pub fn new(conn: Connection, server: Arc<ServerState>) -> Self {
        let client = Arc::new(ClientHandle::new(conn.id(), conn.addr(), conn.writer()));
        client.advance(HandlerState::Registering);
        if let Err(e) = conn.write_line(&server.config().server.prompt) {
            debug!(client = conn.id(), error = %e, "Prompt not delivered");
            conn.close();
        }
        Self {
            conn,
            client,
            server,
        }
    }

    /// The shared record to put in the registry.
    pub fn client(&self) -> Arc<ClientHandle> {
        Arc::clone(&self.client)
    }

    /// Drive the client from registration to close.
    #[instrument(skip(self), fields(client = %self.client.id(), addr = %self.client.addr()), name = "handler")]
    pub async fn run(mut self) {
        info!("Client connected");

        let departure = match self.register().await {
            Ok(()) => self.serve().await,
            Err(departure) => departure,
        };

        self.shutdown(departure);
    }

    /// Read the nickname and announce the newcomer.
    async fn register(&mut self) -> Result<(), Departure> {
        // The first line is the nickname, whatever it contains.
        let nick = match self.next_line().await {
            ReadOutcome::Line(line) => line,
            ReadOutcome::Ended(departure) => return Err(departure),
        };

        self.client.set_nick(&nick);
        self.client.advance(HandlerState::Active);
        info!(nick = %nick, "Client registered");

        broadcast(self.server.registry(), join_notice(&nick));
        Ok(())
    }

    async fn serve(&mut self) -> Departure {
        loop {
            let line = match self.next_line().await {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Ended(departure) => return departure,
            };
            debug!(line = %line, "Received line");

            let ctx = Context::new(&self.client, self.server.registry());
            if dispatch(&ctx, &line) == Flow::Quit {
                return Departure::Quit;
            }
        }
    }

    async fn next_line(&mut self) -> ReadOutcome {
        let read = match self.server.config().limits.idle_timeout() {
            Some(limit) => match tokio::time::timeout(limit, self.conn.read_line()).await {
                Ok(read) => read,
                Err(_) => {
                    warn!(timeout_secs = limit.as_secs(), "Idle timeout");
                    return ReadOutcome::Ended(Departure::TimedOut);
                }
            },
            None => self.conn.read_line().await,
        };

        match read {
            Ok(Some(line)) => ReadOutcome::Line(line),
            Ok(None) => ReadOutcome::Ended(Departure::Disconnected),
            Err(e) => match classify_read_error(&e) {
                ReadErrorAction::InputTooLong { limit } => {
                    warn!(limit, "Input line too long");
                    let _ = self.conn.write_line(INPUT_TOO_LONG);
                    ReadOutcome::Ended(Departure::InputTooLong)
                }
                ReadErrorAction::IoError => {
                    debug!(error = %e, code = e.error_code(), "Read failed");
                    ReadOutcome::Ended(Departure::Disconnected)
                }
            },
        }
    }

    /// Leave the registry, close the connection, mark closed.
    ///
    /// Only the first call does anything.
    fn shutdown(&self, departure: Departure) {
        if !self.client.begin_closing() {
            return;
        }

        self.server.registry().remove(self.client.id());
        self.conn.close();
        self.client.advance(HandlerState::Closed);

        let nick = self.client.nick();
        info!(
            nick = ?nick.as_deref(),
            reason = departure.as_str(),
            "Client disconnected"
        );

        if departure != Departure::Quit
            && self.server.config().server.announce_dropped
            && let Some(nick) = nick
        {
            broadcast(self.server.registry(), leave_notice(&nick));
        }
    }
}

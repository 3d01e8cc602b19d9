//! Per-client shared record.
//!
//! A [`ClientHandle`] is what the registry holds for each connection. The
//! owning handler task is its only writer; broadcasts from other tasks read
//! the nickname and queue lines through its [`LineWriter`].

use crate::error::ConnectionError;
use crate::network::LineWriter;
use crate::state::ClientId;
use parking_lot::RwLock;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of a connection handler.
///
/// States only move forward: `Connecting → Registering → Active → Closing →
/// Closed`. `Closing` can be entered from any earlier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum HandlerState {
    Connecting = 0,
    Registering = 1,
    Active = 2,
    Closing = 3,
    Closed = 4,
}

impl HandlerState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Connecting,
            1 => Self::Registering,
            2 => Self::Active,
            3 => Self::Closing,
            _ => Self::Closed,
        }
    }
}

/// Shared view of one connected client.
#[derive(Debug)]
pub struct ClientHandle {
    id: ClientId,
    addr: SocketAddr,
    /// Replaced wholesale on rename; readers clone the `Arc` out.
    nick: RwLock<Option<Arc<str>>>,
    state: AtomicU8,
    writer: LineWriter,
}

impl ClientHandle {
    pub fn new(id: ClientId, addr: SocketAddr, writer: LineWriter) -> Self {
        Self {
            id,
            addr,
            nick: RwLock::new(None),
            state: AtomicU8::new(HandlerState::Connecting as u8),
            writer,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Current nickname, or `None` before registration.
    pub fn nick(&self) -> Option<Arc<str>> {
        self.nick.read().clone()
    }

    /// Install a new nickname, returning the previous one.
    pub fn set_nick(&self, nick: &str) -> Option<Arc<str>> {
        let new: Arc<str> = Arc::from(nick);
        std::mem::replace(&mut *self.nick.write(), Some(new))
    }

    pub fn state(&self) -> HandlerState {
        HandlerState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Advance the lifecycle. Moving backwards is ignored.
    pub fn advance(&self, next: HandlerState) {
        self.state.fetch_max(next as u8, Ordering::AcqRel);
    }

    /// Enter `Closing`. Returns `false` if the client was already closing or
    /// closed, so exactly one caller runs the teardown.
    pub fn begin_closing(&self) -> bool {
        let previous = self
            .state
            .fetch_max(HandlerState::Closing as u8, Ordering::AcqRel);
        previous < HandlerState::Closing as u8
    }

    /// Queue a line for this client.
    pub fn send(&self, line: impl Into<Arc<str>>) -> Result<(), ConnectionError> {
        self.writer.write_line(line)
    }

    /// Close the client's connection.
    ///
    /// The handler task notices the close, unwinds, and removes itself from
    /// the registry. Repeated calls do nothing.
    pub fn shutdown(&self) -> bool {
        self.writer.close()
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_closed()
    }
}

//! Client command handlers.
//!
//! After registration every input line is parsed into a [`Command`] and
//! dispatched here. Handlers are synchronous: broadcasting only queues lines
//! on each recipient's connection, it never waits on a socket.

mod chat;
mod command;
pub mod fanout;
mod lifecycle;
mod nick;
mod quit;
pub mod replies;

pub use command::Command;
pub use fanout::{BroadcastReport, broadcast};
pub use lifecycle::ConnectionHandler;

use crate::state::{ClientHandle, Registry};
use std::sync::Arc;
use tracing::debug;

/// What the handler loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything a command needs: the issuing client and the registry.
pub struct Context<'a> {
    pub client: &'a ClientHandle,
    pub registry: &'a Registry,
}

impl<'a> Context<'a> {
    pub fn new(client: &'a ClientHandle, registry: &'a Registry) -> Self {
        Self { client, registry }
    }

    /// The client's nickname as of now.
    pub fn nick(&self) -> Arc<str> {
        self.client.nick().unwrap_or_else(|| Arc::from(""))
    }

    /// Send a line to the issuing client only. Failures are logged and dropped.
    pub fn reply(&self, line: impl Into<Arc<str>>) {
        if let Err(e) = self.client.send(line) {
            debug!(client = %self.client.id(), error = %e, "Reply not delivered");
        }
    }
}

/// Run one input line from a registered client.
pub fn dispatch(ctx: &Context<'_>, line: &str) -> Flow {
    match Command::parse(line) {
        Command::Nick(new_nick) => {
            if let Err(e) = nick::handle_nick(ctx, new_nick) {
                debug!(client = %ctx.client.id(), code = e.error_code(), "Command rejected");
                ctx.reply(e.to_reply());
            }
            Flow::Continue
        }
        Command::Quit => {
            quit::handle_quit(ctx);
            Flow::Quit
        }
        Command::Chat(text) => {
            chat::handle_chat(ctx, text);
            Flow::Continue
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::network::LineWriter;
    use crate::state::{ClientHandle, HandlerState, Registry};
    use std::net::{Ipv4Addr, SocketAddr};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    /// Register an Active client backed by an in-memory queue.
    pub fn join(
        registry: &Registry,
        id: u64,
        nick: &str,
    ) -> (Arc<ClientHandle>, mpsc::Receiver<Arc<str>>) {
        let (writer, rx) = LineWriter::channel(16);
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, 40000 + id as u16));
        let client = Arc::new(ClientHandle::new(id, addr, writer));
        client.set_nick(nick);
        client.advance(HandlerState::Active);
        registry.add(Arc::clone(&client));
        (client, rx)
    }

    /// Everything queued so far.
    pub fn drain(rx: &mut mpsc::Receiver<Arc<str>>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            lines.push(line.to_string());
        }
        lines
    }
}

//! Connection - one accepted TCP stream, framed as text lines.
//!
//! ```text
//!   TcpStream::into_split()
//!      │                          │
//!      ▼                          ▼
//!  FramedRead<LossyLinesCodec> FramedWrite<LossyLinesCodec>
//!      │                          ▲
//!  read_line() (handler)      writer task ◄── mpsc ◄── LineWriter (cloned
//!                                                       into the registry)
//! ```
//!
//! Reads belong to the owning handler. Writes from any task go through the
//! bounded queue, so lines reach one peer in the order they were queued.

mod codec;
mod error_handling;
mod writer;

pub use codec::LossyLinesCodec;
pub(crate) use error_handling::{ReadErrorAction, classify_read_error};
pub use writer::LineWriter;

use crate::config::LimitsConfig;
use crate::error::ConnectionError;
use crate::state::ClientId;
use futures_util::StreamExt;
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedReadHalf;
use tokio_util::codec::{FramedRead, FramedWrite};

/// A client transport: line reader plus a shareable line writer.
pub struct Connection {
    id: ClientId,
    addr: SocketAddr,
    reader: FramedRead<OwnedReadHalf, LossyLinesCodec>,
    writer: LineWriter,
}

impl Connection {
    /// Wrap an accepted stream and start its writer task.
    pub fn new(id: ClientId, stream: TcpStream, addr: SocketAddr, limits: &LimitsConfig) -> Self {
        let (read_half, write_half) = stream.into_split();
        let reader = FramedRead::new(
            read_half,
            LossyLinesCodec::with_max_len(limits.max_line_length),
        );

        let (writer, outbound) = LineWriter::channel(limits.outbound_queue);
        let sink = FramedWrite::new(write_half, LossyLinesCodec::new());
        tokio::spawn(writer::write_loop(id, sink, outbound, writer.close_flag()));

        Self {
            id,
            addr,
            reader,
            writer,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// A cloneable handle for writing to this connection from other tasks.
    pub fn writer(&self) -> LineWriter {
        self.writer.clone()
    }

    /// Read the next line.
    ///
    /// Returns `Ok(None)` on end-of-stream, and also once the connection has
    /// been closed from any task, so a blocked read unwinds on shutdown.
    pub async fn read_line(&mut self) -> Result<Option<String>, ConnectionError> {
        if self.writer.is_closed() {
            return Ok(None);
        }

        tokio::select! {
            biased;
            _ = self.writer.closed() => Ok(None),
            next = self.reader.next() => match next {
                Some(Ok(line)) => Ok(Some(line)),
                Some(Err(e)) => Err(ConnectionError::from_codec(e, self.reader.decoder().max_len())),
                None => Ok(None),
            },
        }
    }

    /// Queue one line for this peer.
    pub fn write_line(&self, line: &str) -> Result<(), ConnectionError> {
        self.writer.write_line(line)
    }

    /// Close the connection. Returns `true` only for the call that closed it.
    pub fn close(&self) -> bool {
        self.writer.close()
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_closed()
    }
}

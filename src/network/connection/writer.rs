//! Outbound half of a connection.

use crate::error::ConnectionError;
use crate::state::ClientId;
use futures_util::SinkExt;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};
use super::codec::LossyLinesCodec;
use tokio_util::codec::FramedWrite;
use tracing::debug;

/// Cloneable write handle for one connection.
///
/// Every clone shares the same queue and the same closed flag.
#[derive(Debug, Clone)]
pub struct LineWriter {
    tx: mpsc::Sender<Arc<str>>,
    closed: Arc<watch::Sender<bool>>,
}

impl LineWriter {
    /// Create a writer and the receiving end of its queue.
    ///
    /// [`Connection::new`](super::Connection::new) drains the receiver into
    /// the socket; anything else may drain it directly.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Arc<str>>) {
        let (tx, rx) = mpsc::channel(capacity);
        let (closed, _) = watch::channel(false);
        (
            Self {
                tx,
                closed: Arc::new(closed),
            },
            rx,
        )
    }

    /// Queue a line without waiting.
    ///
    /// Fails with [`ConnectionError::QueueFull`] when the peer is not keeping
    /// up, and [`ConnectionError::Closed`] once the connection is closed.
    pub fn write_line(&self, line: impl Into<Arc<str>>) -> Result<(), ConnectionError> {
        if self.is_closed() {
            return Err(ConnectionError::Closed);
        }
        self.tx.try_send(line.into()).map_err(|e| match e {
            TrySendError::Full(_) => ConnectionError::QueueFull,
            TrySendError::Closed(_) => ConnectionError::Closed,
        })
    }

    /// Mark the connection closed. Only the first call returns `true`.
    pub fn close(&self) -> bool {
        self.closed.send_if_modified(|closed| {
            if *closed {
                false
            } else {
                *closed = true;
                true
            }
        })
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Resolve once the connection is closed.
    pub async fn closed(&self) {
        let mut rx = self.closed.subscribe();
        let _ = rx.wait_for(|closed| *closed).await;
    }

    pub(super) fn close_flag(&self) -> Arc<watch::Sender<bool>> {
        Arc::clone(&self.closed)
    }
}

/// Drain the queue into the socket until closed.
///
/// Lines queued before the close are still written. A write failure closes
/// the connection so the owning handler stops reading.
pub(super) async fn write_loop(
    id: ClientId,
    mut sink: FramedWrite<OwnedWriteHalf, LossyLinesCodec>,
    mut outbound: mpsc::Receiver<Arc<str>>,
    closed: Arc<watch::Sender<bool>>,
) {
    let mut closed_rx = closed.subscribe();

    loop {
        tokio::select! {
            biased;
            line = outbound.recv() => {
                let Some(line) = line else { break };
                if let Err(e) = sink.send(line).await {
                    debug!(client = %id, error = %e, "Write failed");
                    closed.send_replace(true);
                    break;
                }
            }
            // The watch guard must not outlive this arm's future.
            _ = async { let _ = closed_rx.wait_for(|closed| *closed).await; } => {
                while let Ok(line) = outbound.try_recv() {
                    if sink.feed(line).await.is_err() {
                        break;
                    }
                }
                break;
            }
        }
    }

    let _ = SinkExt::<Arc<str>>::flush(&mut sink).await;
    let _ = sink.get_mut().shutdown().await;
    debug!(client = %id, "Writer stopped");
}

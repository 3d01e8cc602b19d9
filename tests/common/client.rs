//! Test chat client.
//!
//! A line client for integration testing that can send lines and assert on
//! received ones.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

pub const PROMPT: &str = "Please enter a nick name: ";

/// A test chat client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    nick: String,
}

#[allow(dead_code)]
impl TestClient {
    /// Connect to a test server.
    pub async fn connect(addr: SocketAddr, nick: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;

        // Split stream for reading and writing
        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            nick: nick.to_string(),
        })
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Send one line.
    pub async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Send raw bytes, newline included by the caller.
    pub async fn send_raw(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single line from the server.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a line with a timeout. End of stream is an error.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed by server");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive lines until the given predicate returns true.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                break;
            }
        }
        Ok(lines)
    }

    /// Answer the nickname prompt and wait for our own join notice.
    pub async fn register(&mut self) -> anyhow::Result<()> {
        self.recv_until(|line| line == PROMPT).await?;
        let nick = self.nick.clone();
        self.send(&nick).await?;

        let joined = format!("{nick} joined the chat!");
        self.recv_until(|line| line == joined).await?;
        Ok(())
    }

    /// Send `/quit`.
    pub async fn quit(&mut self) -> anyhow::Result<()> {
        self.send("/quit").await
    }

    /// Read until the server closes the connection, returning what arrived.
    pub async fn recv_until_closed(&mut self) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            let n = timeout(Duration::from_secs(5), self.reader.read_line(&mut line)).await??;
            if n == 0 {
                return Ok(lines);
            }
            lines.push(line.trim_end_matches(['\r', '\n']).to_string());
        }
    }

    /// Assert nothing arrives for `dur`.
    pub async fn expect_silence(&mut self, dur: Duration) -> anyhow::Result<()> {
        match self.recv_timeout(dur).await {
            Ok(line) => anyhow::bail!("unexpected line: {line:?}"),
            Err(_) => Ok(()),
        }
    }
}

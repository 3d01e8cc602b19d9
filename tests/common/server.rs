//! Test server management.
//!
//! Runs a linechat gateway on an ephemeral localhost port inside the test's
//! own runtime.

use linechat::{Config, Gateway, ServerState};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// A test server instance. Shut down when dropped.
pub struct TestServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    task: Option<JoinHandle<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// Spawn a server with default configuration.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(Config::default()).await
    }

    /// Spawn a server with the given configuration, bound to 127.0.0.1:0.
    pub async fn spawn_with(mut config: Config) -> anyhow::Result<Self> {
        config.listen.address = "127.0.0.1:0".parse()?;
        let gateway = Gateway::bind(config).await?;
        let addr = gateway.local_addr()?;
        let state = gateway.state();
        let task = tokio::spawn(gateway.run());

        Ok(Self {
            addr,
            state,
            task: Some(task),
        })
    }

    /// Get the server address.
    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }

    /// Open a connection without registering.
    pub async fn connect(&self, nick: &str) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::connect(self.addr, nick).await
    }

    /// Open a connection and complete registration.
    pub async fn join(&self, nick: &str) -> anyhow::Result<super::client::TestClient> {
        let mut client = self.connect(nick).await?;
        client.register().await?;
        Ok(client)
    }

    /// Wait until exactly `count` clients are registered.
    pub async fn wait_for_clients(&self, count: usize) -> anyhow::Result<()> {
        for _ in 0..100 {
            if self.state.registry().len() == count {
                return Ok(());
            }
            sleep(Duration::from_millis(20)).await;
        }
        anyhow::bail!(
            "expected {count} clients, registry has {}",
            self.state.registry().len()
        )
    }

    /// Shut down and wait for the accept loop to finish.
    pub async fn stop(mut self) -> anyhow::Result<()> {
        self.state.shutdown();
        if let Some(task) = self.task.take() {
            tokio::time::timeout(Duration::from_secs(5), task).await??;
        }
        Ok(())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.state.shutdown();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

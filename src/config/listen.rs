//! Network listener configuration.

use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};

/// Port the server listens on when none is configured.
pub const DEFAULT_PORT: u16 = 9999;

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "0.0.0.0:9999").
    #[serde(default = "default_address")]
    pub address: SocketAddr,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

fn default_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT))
}

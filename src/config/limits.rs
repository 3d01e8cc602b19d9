//! Per-connection limits configuration.

use super::defaults::{default_max_line_length, default_outbound_queue};
use serde::Deserialize;
use std::time::Duration;

/// Per-connection limits configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Longest accepted input line in bytes (default: 8192).
    /// Longer input is a protocol error and closes the connection.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Outbound queue capacity per connection (default: 256).
    /// A broadcast to a client whose queue is full is dropped for that client.
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
    /// Seconds a client may stay silent before it is disconnected.
    /// Unset means reads block forever.
    #[serde(default)]
    pub idle_timeout_secs: Option<u64>,
}

impl LimitsConfig {
    /// Idle timeout as a [`Duration`], if one is configured.
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            outbound_queue: default_outbound_queue(),
            idle_timeout_secs: None,
        }
    }
}

//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig)
//! - [`listen`]: Network listener configuration (ListenConfig)
//! - [`limits`]: Per-connection limits (LimitsConfig)
//! - [`validation`]: Startup validation

mod defaults;
mod limits;
mod listen;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::{DEFAULT_PORT, ListenConfig};
pub use types::{Config, ConfigError, ServerConfig};
pub use validation::{ValidationError, validate};

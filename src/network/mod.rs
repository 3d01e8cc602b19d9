//! Network module.
//!
//! Contains the Gateway (TCP listener) and the per-client Connection.

pub mod connection;
mod gateway;

pub use connection::{Connection, LineWriter};
pub use gateway::Gateway;

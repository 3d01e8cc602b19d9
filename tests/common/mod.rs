//! Integration test common infrastructure.
//!
//! Provides utilities for running an in-process server, creating test
//! clients, and asserting on line flows.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use server::TestServer;

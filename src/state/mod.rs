//! Shared server state.
//!
//! - [`ServerState`]: process-wide state (registry, done flag, lifecycle phase)
//! - [`Registry`]: the set of live clients, keyed by [`ClientId`]
//! - [`ClientHandle`]: the part of a client other tasks may touch

mod client;
mod dashmap_ext;
mod id;
mod registry;
mod server;

pub use client::{ClientHandle, HandlerState};
pub use id::{ClientId, ClientIdGenerator};
pub use registry::Registry;
pub use server::{ServerPhase, ServerState};

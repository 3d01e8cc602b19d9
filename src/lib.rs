//! linechat - a line-oriented multi-client TCP chat relay.
//!
//! Clients connect, answer a nickname prompt, and from then on every line
//! they send is relayed to all connected clients as `"<nick> : <line>"`.
//! `/nick <name>` renames and `/quit` leaves.
//!
//! The accept loop lives in [`network::Gateway`], the per-client protocol in
//! [`handlers::ConnectionHandler`], and the shared client set in
//! [`state::Registry`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;

pub use config::Config;
pub use error::{CommandError, ConnectionError, ServerError};
pub use network::Gateway;
pub use state::{ServerPhase, ServerState};

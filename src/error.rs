//! Unified error handling for linechat.
//!
//! Errors are split by where they surface: the per-connection transport,
//! command processing inside a handler, and server startup.

use crate::config::{ConfigError, ValidationError};
use std::net::SocketAddr;
use thiserror::Error;
use tokio_util::codec::LinesCodecError;

// ============================================================================
// Connection Errors (transport)
// ============================================================================

/// Errors raised by a single client connection.
///
/// None of these ever propagate past the owning handler: they only drive
/// that one handler into its closing state.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("connection closed")]
    Closed,

    #[error("outbound queue full")]
    QueueFull,

    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConnectionError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::QueueFull => "queue_full",
            Self::LineTooLong { .. } => "line_too_long",
            Self::Io(_) => "io_error",
        }
    }

    /// Map a line codec failure, recording the configured limit.
    pub(crate) fn from_codec(e: LinesCodecError, limit: usize) -> Self {
        match e {
            LinesCodecError::MaxLineLengthExceeded => Self::LineTooLong { limit },
            LinesCodecError::Io(io) => Self::Io(io),
        }
    }
}

// ============================================================================
// Command Errors (protocol misuse)
// ============================================================================

/// Errors caused by malformed client commands.
///
/// These are reported back to the offending client only; the connection
/// stays open.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("No nickname provided")]
    NoNicknameProvided,
}

impl CommandError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoNicknameProvided => "no_nickname_provided",
        }
    }

    /// The unicast line sent to the client that caused the error.
    pub fn to_reply(&self) -> String {
        self.to_string()
    }
}

/// Result type for command handlers.
pub type CommandResult = Result<(), CommandError>;

// ============================================================================
// Server Errors (startup)
// ============================================================================

/// Fatal errors raised while bringing the server up.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

//! Classification of read errors into handler actions.

use crate::error::ConnectionError;

/// What the handler should do after a failed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadErrorAction {
    /// Input exceeded the line limit. Tell the client, then close: the
    /// framed stream does not resume after a codec error.
    InputTooLong { limit: usize },
    /// The transport is broken; close without a reply.
    IoError,
}

/// Classify a read error into an actionable category.
pub(crate) fn classify_read_error(e: &ConnectionError) -> ReadErrorAction {
    match e {
        ConnectionError::LineTooLong { limit } => ReadErrorAction::InputTooLong { limit: *limit },
        ConnectionError::Io(_) | ConnectionError::Closed | ConnectionError::QueueFull => {
            ReadErrorAction::IoError
        }
    }
}

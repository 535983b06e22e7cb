//! Error types for client operations.
//!
//! Strongly-typed per surface: [`SendError`] for outbound submission,
//! [`HistoryError`] for pagination fetches. Transient failures are
//! distinguished from terminal ones so callers can decide between retry,
//! dismissible notice, and permanent notice.

use thiserror::Error;

use crate::connection::ConnectionState;

/// Errors from submitting an outbound message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// Empty or whitespace-only body. Local validation; never reaches the
    /// network and shows no notice.
    #[error("empty message")]
    Empty,

    /// The channel is not open. The state names what the user sees.
    #[error("cannot send while {state}")]
    NotConnected {
        /// Connection state at submission time.
        state: ConnectionState,
    },
}

impl SendError {
    /// Whether this rejection should be surfaced to the user at all.
    /// Validation failures are silent.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Errors from fetching a history page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// Network failure or server 5xx. The cursor does not advance, so the
    /// same page can be retried without gaps or skips.
    #[error("page fetch failed: {0}")]
    Retryable(String),

    /// The room does not exist.
    #[error("room not found")]
    RoomNotFound,

    /// All pages already fetched; further calls are no-ops until the room
    /// changes.
    #[error("history exhausted")]
    Exhausted,
}

impl HistoryError {
    /// Returns true if this error is transient and may succeed on retry.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Retryable(_))
    }
}

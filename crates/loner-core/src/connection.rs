//! Connection lifecycle classification.
//!
//! The live channel's close codes split into three policies: clean closes
//! (no notice, no reconnect), terminal closes (banned / room not found:
//! persistent notice, sends disabled, never reconnect), and everything else
//! (transient: notice plus automatic reconnect).
//!
//! ```text
//! Connecting ──open──> Open ──close──> Closed(reason)
//!     ^                                     │
//!     └──────────── reason == Other ────────┘   (auto-reconnect)
//! ```
//!
//! `Closed(Banned)` and `Closed(NotFound)` are terminal for the session.

use std::fmt;

/// Close code the server uses for a banned user.
pub const CLOSE_CODE_BANNED: u16 = 3401;

/// Close code the server uses for a nonexistent room.
pub const CLOSE_CODE_NOT_FOUND: u16 = 3404;

/// Standard clean-close code (client-initiated, e.g. switching rooms).
pub const CLOSE_CODE_NORMAL: u16 = 1000;

/// Why the live channel closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Clean closure, typically initiated by this client.
    Normal,
    /// This user is banned from the room.
    Banned,
    /// The room does not exist.
    NotFound,
    /// Any other closure: server restart, network drop, abnormal close.
    Other,
}

impl CloseReason {
    /// Classify a close code.
    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            CLOSE_CODE_NORMAL => Self::Normal,
            CLOSE_CODE_BANNED => Self::Banned,
            CLOSE_CODE_NOT_FOUND => Self::NotFound,
            _ => Self::Other,
        }
    }

    /// Terminal for the session: no reconnect, sends disabled.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Banned | Self::NotFound)
    }

    /// Whether the lifecycle manager should attempt a reconnect.
    #[must_use]
    pub fn should_reconnect(&self) -> bool {
        matches!(self, Self::Other)
    }

    /// User-facing explanation for this closure. `None` for clean closes,
    /// which show nothing.
    #[must_use]
    pub fn user_notice(&self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Banned => {
                Some("You have been banned here. You will not receive realtime messages")
            },
            Self::NotFound => Some("This space doesn't exist. But you can always create one :)"),
            Self::Other => Some("Connection to server lost. Attempting to reconnect."),
        }
    }
}

/// Live-channel connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Connection attempt in progress.
    Connecting,
    /// Channel open; sends permitted.
    Open,
    /// Channel closed for the given reason.
    Closed(CloseReason),
}

impl ConnectionState {
    /// Outbound sends are permitted only while open.
    #[must_use]
    pub fn can_send(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Whether this state is terminal for the session.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed(reason) if reason.is_terminal())
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting => f.write_str("connecting"),
            Self::Open => f.write_str("open"),
            Self::Closed(CloseReason::Normal) => f.write_str("closed"),
            Self::Closed(CloseReason::Banned) => f.write_str("closed (banned)"),
            Self::Closed(CloseReason::NotFound) => f.write_str("closed (room not found)"),
            Self::Closed(CloseReason::Other) => f.write_str("closed (connection lost)"),
        }
    }
}

//! Client events and actions.
//!
//! The caller is responsible for:
//! - Receiving live-channel frames and close/error signals
//! - Running page fetches and media uploads, delivering completions
//! - Reporting viewport scroll geometry
//!
//! The client returns [`ClientAction`]s for the caller to execute. All
//! state transitions happen on one logical event-loop turn, so there is a
//! single writer for the timeline with no locking.

use loner_core::{HistoryPage, RoomId};

/// Events the caller feeds into the client.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// Live channel finished connecting.
    SocketOpened,

    /// Live channel closed with the server's close code.
    SocketClosed {
        /// Machine-readable close code (1000 normal, 3401 banned,
        /// 3404 room not found, anything else transient).
        code: u16,
    },

    /// Error event on the channel, distinct from a close. Surfaces a
    /// notice but changes no lifecycle state by itself.
    SocketError {
        /// Error description.
        reason: String,
    },

    /// Raw inbound text frame from the live channel.
    LivePayload {
        /// Payload as received; classified by the client.
        json: String,
    },

    /// A history page fetch completed.
    PageFetched {
        /// Room the fetch was issued for.
        room: RoomId,
        /// Page index that was requested.
        index: u32,
        /// The fetched page.
        page: HistoryPage,
    },

    /// A history page fetch failed (network or 5xx). Retryable.
    PageFetchFailed {
        /// Room the fetch was issued for.
        room: RoomId,
        /// Page index that was requested.
        index: u32,
        /// Failure description.
        reason: String,
    },

    /// A media upload completed. The resulting message arrives via the
    /// live channel like any other push.
    MediaUploaded {
        /// Room the upload was issued for.
        room: RoomId,
    },

    /// A media upload failed.
    MediaUploadFailed {
        /// Room the upload was issued for.
        room: RoomId,
        /// Failure description.
        reason: String,
    },

    /// Viewport scroll geometry changed.
    Scrolled(ScrollMetrics),
}

/// Actions the client produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Open (or reopen) the live channel for a room.
    Connect {
        /// Room to connect to.
        room: RoomId,
    },

    /// Tear down the current live channel (clean close).
    Disconnect,

    /// Send a text frame on the live channel.
    SendPayload {
        /// JSON payload.
        json: String,
    },

    /// Fetch a history page.
    FetchPage {
        /// Room to fetch for.
        room: RoomId,
        /// Page index to request.
        index: u32,
    },

    /// Upload a media message over HTTP.
    UploadMedia {
        /// Target room.
        room: RoomId,
        /// Media bytes.
        media: Vec<u8>,
        /// Original file name, for the multipart part.
        filename: String,
        /// Optional caption.
        text: Option<String>,
    },

    /// Scroll the viewport to the newest message.
    ScrollToNewest,

    /// Show a notice to the user.
    Notice {
        /// Transient notices auto-expire; persistent ones stay.
        kind: NoticeKind,
        /// Notice text.
        text: String,
    },
}

/// How long a notice should live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Dismissible, auto-expiring.
    Transient,
    /// Stays until the room changes (terminal closures).
    Persistent,
}

/// Viewport geometry reported by the embedding UI, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Distance from the top of the content to the top of the viewport.
    pub scroll_top: u32,
    /// Total content height.
    pub scroll_height: u32,
    /// Visible viewport height.
    pub viewport_height: u32,
}

impl ScrollMetrics {
    /// Geometry for a viewport pinned to the bottom of the content.
    #[must_use]
    pub fn at_bottom(scroll_height: u32, viewport_height: u32) -> Self {
        Self {
            scroll_top: scroll_height.saturating_sub(viewport_height),
            scroll_height,
            viewport_height,
        }
    }
}

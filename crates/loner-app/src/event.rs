//! Application input events.
//!
//! Inputs come from two sources: user intents (submit, scroll, navigate)
//! and sync-layer events translated from the transport. Both funnel through
//! [`crate::App::handle`] on one event-loop turn.

use loner_client::ClientEvent;
use loner_core::RoomId;

/// Events processed by the App.
///
/// Generic over `I` (instant type) to support both production time and
/// virtual time in deterministic tests.
#[derive(Debug, Clone)]
pub enum AppEvent<I> {
    /// Periodic tick, used to expire transient notices.
    Tick {
        /// Current time from the driver.
        now: I,
    },

    /// Sync-layer event from the transport (socket lifecycle, live
    /// payloads, fetch completions, scroll geometry).
    Client(ClientEvent),

    /// User submitted a text message.
    SubmitText {
        /// Raw composer contents.
        text: String,
    },

    /// User submitted a media message.
    SubmitMedia {
        /// Media bytes.
        media: Vec<u8>,
        /// Original file name.
        filename: String,
        /// Optional caption.
        text: Option<String>,
    },

    /// User asked for older history explicitly.
    LoadMoreHistory,

    /// User navigated to a different room.
    SwitchRoom {
        /// Destination room.
        room: RoomId,
    },

    /// User asked to cycle the live connection.
    ForceReconnect,

    /// Quit the application.
    Quit,
}

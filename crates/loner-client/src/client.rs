//! Chat client state machine.
//!
//! The `ChatClient` is the top-level state machine for one active room. It
//! owns the timeline (it is the only writer), the connection lifecycle, the
//! pagination cursor, and the scroll pin state, and it reconciles the two
//! message sources - paginated history and the live push stream - into one
//! deduplicated, ordered set.
//!
//! All methods are synchronous and I/O-free. The caller executes the
//! returned actions and feeds completions back in as events, so every state
//! transition happens on one event-loop turn.

use loner_core::{
    CloseReason, ConnectionState, HistoryPage, LiveEvent, OutboundText, RoomId, SendError,
    SessionContext, Timeline,
};

use crate::{
    event::{ClientAction, ClientEvent, NoticeKind},
    history::HistoryCursor,
    scroll::ScrollCoordinator,
};

/// Notice shown on channel error events (original product wording).
const CHANNEL_ERROR_NOTICE: &str = "something went wrong";

/// Synchronization client for one active room.
pub struct ChatClient {
    /// Active room.
    room: RoomId,
    /// Caller identity and moderation flags.
    session: SessionContext,
    /// Unified message set. Only this client mutates it.
    timeline: Timeline,
    /// Live-channel lifecycle state.
    state: ConnectionState,
    /// Backward pagination cursor.
    cursor: HistoryCursor,
    /// Viewport pin and load-trigger state.
    scroll: ScrollCoordinator,
}

impl ChatClient {
    /// Create a client for the given room, ready to connect.
    #[must_use]
    pub fn new(room: RoomId, session: SessionContext) -> Self {
        Self {
            room,
            session,
            timeline: Timeline::new(),
            state: ConnectionState::Connecting,
            cursor: HistoryCursor::new(),
            scroll: ScrollCoordinator::new(),
        }
    }

    /// Initiate the live connection and the first history fetch.
    pub fn connect(&mut self) -> Vec<ClientAction> {
        self.state = ConnectionState::Connecting;

        let mut actions = vec![ClientAction::Connect { room: self.room.clone() }];
        if let Some(index) = self.cursor.begin_fetch() {
            actions.push(ClientAction::FetchPage { room: self.room.clone(), index });
        }
        actions
    }

    /// Process an event and return actions for the caller to execute.
    ///
    /// Infallible: malformed or unexpected payloads are logged and skipped
    /// so they never interrupt later event processing.
    pub fn handle(&mut self, event: ClientEvent) -> Vec<ClientAction> {
        match event {
            ClientEvent::SocketOpened => self.handle_opened(),
            ClientEvent::SocketClosed { code } => self.handle_closed(code),
            ClientEvent::SocketError { reason } => {
                tracing::warn!(%reason, "live channel error");
                vec![notice(NoticeKind::Transient, CHANNEL_ERROR_NOTICE)]
            },
            ClientEvent::LivePayload { json } => self.handle_live_payload(&json),
            ClientEvent::PageFetched { room, index, page } => {
                self.handle_page_fetched(&room, index, page)
            },
            ClientEvent::PageFetchFailed { room, index, reason } => {
                self.handle_page_failed(&room, index, &reason)
            },
            ClientEvent::MediaUploaded { room } => {
                // The message itself arrives as a live push.
                tracing::debug!(%room, "media upload complete");
                vec![]
            },
            ClientEvent::MediaUploadFailed { room, reason } => {
                if room != self.room {
                    return vec![];
                }
                tracing::warn!(%room, %reason, "media upload failed");
                vec![notice(NoticeKind::Transient, "Could not upload your media. Try again.")]
            },
            ClientEvent::Scrolled(metrics) => {
                let near_top = self.scroll.observe(metrics);
                if near_top { self.request_next_page() } else { vec![] }
            },
        }
    }

    fn handle_opened(&mut self) -> Vec<ClientAction> {
        if self.state.is_terminal() {
            // A dying socket can still report events; the terminal state
            // stays latched.
            return vec![];
        }

        tracing::debug!(room = %self.room, "live channel open");
        self.state = ConnectionState::Open;
        vec![]
    }

    fn handle_closed(&mut self, code: u16) -> Vec<ClientAction> {
        if self.state.is_terminal() {
            return vec![];
        }

        let reason = CloseReason::from_code(code);
        tracing::debug!(room = %self.room, code, ?reason, "live channel closed");
        self.state = ConnectionState::Closed(reason);

        if reason == CloseReason::Banned {
            self.session.set_banned(true);
        }

        let mut actions = Vec::new();
        if let Some(text) = reason.user_notice() {
            let kind =
                if reason.is_terminal() { NoticeKind::Persistent } else { NoticeKind::Transient };
            actions.push(notice(kind, text));
        }

        if reason.should_reconnect() {
            // Backoff between attempts is the driver's concern.
            self.state = ConnectionState::Connecting;
            actions.push(ClientAction::Connect { room: self.room.clone() });
        }

        actions
    }

    fn handle_live_payload(&mut self, json: &str) -> Vec<ClientAction> {
        let event = match LiveEvent::parse(json) {
            Ok(event) => event,
            Err(error) => {
                tracing::warn!(%error, "ignoring unrecognized live payload");
                return vec![];
            },
        };

        match event {
            LiveEvent::Message(message) => {
                let inserted = self.timeline.push_live(message);
                if inserted && self.scroll.is_pinned() {
                    vec![ClientAction::ScrollToNewest]
                } else {
                    vec![]
                }
            },
            LiveEvent::Delete { delete } => {
                self.timeline.apply_tombstone(delete);
                vec![]
            },
        }
    }

    fn handle_page_fetched(
        &mut self,
        room: &RoomId,
        index: u32,
        page: HistoryPage,
    ) -> Vec<ClientAction> {
        if *room != self.room {
            // Completion for a vacated room: discard, never merge.
            tracing::debug!(%room, index, "discarding page fetch for old room");
            return vec![];
        }

        if !self.cursor.complete(index, page.pages) {
            tracing::debug!(index, "discarding stale page completion");
            return vec![];
        }

        let inserted = self.timeline.merge_older_page(page.results);
        tracing::debug!(index, inserted, "merged history page");

        if inserted > 0 && self.scroll.is_pinned() {
            vec![ClientAction::ScrollToNewest]
        } else {
            vec![]
        }
    }

    fn handle_page_failed(&mut self, room: &RoomId, index: u32, reason: &str) -> Vec<ClientAction> {
        if *room != self.room {
            return vec![];
        }

        tracing::warn!(%room, index, %reason, "history page fetch failed");
        self.cursor.fail();
        vec![notice(NoticeKind::Transient, "Could not load older messages. Scroll to retry.")]
    }

    fn request_next_page(&mut self) -> Vec<ClientAction> {
        match self.cursor.begin_fetch() {
            Some(index) => vec![ClientAction::FetchPage { room: self.room.clone(), index }],
            None => vec![],
        }
    }

    /// Submit a text message.
    ///
    /// # Errors
    ///
    /// - [`SendError::Empty`] for empty or whitespace-only input (silent
    ///   local validation; nothing reaches the network)
    /// - [`SendError::NotConnected`] unless the channel is open
    pub fn submit_text(&mut self, text: &str) -> Result<Vec<ClientAction>, SendError> {
        let body = text.trim();
        if body.is_empty() {
            return Err(SendError::Empty);
        }

        if !self.state.can_send() {
            return Err(SendError::NotConnected { state: self.state });
        }

        let payload = OutboundText { message: body.to_string() };
        match payload.to_json() {
            Ok(json) => Ok(vec![ClientAction::SendPayload { json }]),
            Err(error) => {
                tracing::error!(%error, "failed to encode outbound message");
                Ok(vec![])
            },
        }
    }

    /// Submit a media message with an optional caption.
    ///
    /// Media rides the HTTP upload endpoint rather than the socket, so only
    /// the terminal closed states gate it.
    ///
    /// # Errors
    ///
    /// - [`SendError::Empty`] if the media payload is empty
    /// - [`SendError::NotConnected`] in the banned / room-not-found states
    pub fn submit_media(
        &mut self,
        media: Vec<u8>,
        filename: String,
        text: Option<String>,
    ) -> Result<Vec<ClientAction>, SendError> {
        if media.is_empty() {
            return Err(SendError::Empty);
        }

        if self.state.is_terminal() {
            return Err(SendError::NotConnected { state: self.state });
        }

        Ok(vec![ClientAction::UploadMedia { room: self.room.clone(), media, filename, text }])
    }

    /// Request the next history page explicitly (for UIs without scroll
    /// reporting). Honors the same single-in-flight discipline as the
    /// scroll trigger; a no-op once history is exhausted.
    pub fn load_more_history(&mut self) -> Vec<ClientAction> {
        self.request_next_page()
    }

    /// Switch to a different room.
    ///
    /// Clears the timeline, resets pagination and pin state, drops
    /// room-scoped moderation flags, and tears down the old channel before
    /// opening the new one. In-flight fetches for the old room are
    /// discarded when their completions arrive.
    pub fn switch_room(&mut self, room: RoomId) -> Vec<ClientAction> {
        tracing::debug!(from = %self.room, to = %room, "switching room");

        self.room = room;
        self.timeline.clear();
        self.cursor.reset();
        self.scroll.reset();
        self.session.set_banned(false);
        self.session.set_moderator(false);
        self.state = ConnectionState::Connecting;

        let mut actions = vec![ClientAction::Disconnect];
        actions.extend(self.connect());
        actions
    }

    /// Explicitly tear down and re-establish the live channel.
    ///
    /// A no-op in the terminal states - banned and room-not-found sessions
    /// never reconnect.
    pub fn force_reconnect(&mut self) -> Vec<ClientAction> {
        if self.state.is_terminal() {
            return vec![];
        }

        self.state = ConnectionState::Connecting;
        vec![ClientAction::Disconnect, ClientAction::Connect { room: self.room.clone() }]
    }

    /// Active room.
    #[must_use]
    pub fn room(&self) -> &RoomId {
        &self.room
    }

    /// Read-only ordered view of the unified message set.
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Current connection state.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Session identity and moderation flags.
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Mutable session access, for moderation signals delivered outside
    /// the close-code path.
    pub fn session_mut(&mut self) -> &mut SessionContext {
        &mut self.session
    }

    /// Whether the viewport is pinned to the newest message.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.scroll.is_pinned()
    }

    /// Whether older history pages may remain.
    #[must_use]
    pub fn has_more_history(&self) -> bool {
        self.cursor.has_more()
    }
}

fn notice(kind: NoticeKind, text: &str) -> ClientAction {
    ClientAction::Notice { kind, text: text.to_string() }
}

//! Application state machine.
//!
//! Owns the [`ChatClient`] and the presentation state the sync core does
//! not: the auto-expiring transient notice, the persistent close
//! explanation, and the messagable flag that enables or disables the send
//! control. Pure state machine - no I/O, fully testable with virtual time.

use std::{ops::Sub, time::Duration};

use loner_client::{ChatClient, ClientAction, ClientEvent, NoticeKind};
use loner_core::{ConnectionState, RoomId, SendError, SessionContext, Timeline};

use crate::{AppAction, AppEvent};

/// How long a transient notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(2);

/// Notice shown when a send is attempted mid-connect.
const CONNECTING_NOTICE: &str = "Connecting please wait..";

/// Notice shown when a send is attempted on a closed channel.
const CLOSED_NOTICE: &str = "connection closed. Try refreshing the page or try again later.";

/// Application state machine for one chat session.
///
/// Generic over `I` (instant type); production uses `std::time::Instant`,
/// tests use virtual time.
pub struct App<I> {
    /// The synchronization core. Sole owner of the timeline.
    client: ChatClient,
    /// Transient notice and the time it was shown.
    notice: Option<(String, I)>,
    /// Persistent explanation after a terminal close.
    close_reason: Option<String>,
    /// Whether the send control is enabled.
    messagable: bool,
}

impl<I> App<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Create an App for the given room and session.
    #[must_use]
    pub fn new(room: RoomId, session: SessionContext) -> Self {
        Self {
            client: ChatClient::new(room, session),
            notice: None,
            close_reason: None,
            messagable: true,
        }
    }

    /// Initiate the live connection and first history fetch.
    pub fn start(&mut self, now: I) -> Vec<AppAction> {
        let actions = self.client.connect();
        self.absorb(actions, now)
    }

    /// Process an event and return actions for the runtime to execute.
    pub fn handle(&mut self, event: AppEvent<I>, now: I) -> Vec<AppAction> {
        match event {
            AppEvent::Tick { now } => self.expire_notice(now),
            AppEvent::Client(client_event) => {
                let actions = self.client.handle(client_event);
                self.absorb(actions, now)
            },
            AppEvent::SubmitText { text } => {
                let result = self.client.submit_text(&text);
                self.submit(result, now)
            },
            AppEvent::SubmitMedia { media, filename, text } => {
                let result = self.client.submit_media(media, filename, text);
                self.submit(result, now)
            },
            AppEvent::LoadMoreHistory => {
                let actions = self.client.load_more_history();
                self.absorb(actions, now)
            },
            AppEvent::SwitchRoom { room } => {
                // New room, fresh presentation state.
                self.notice = None;
                self.close_reason = None;
                self.messagable = true;
                let actions = self.client.switch_room(room);
                self.absorb(actions, now)
            },
            AppEvent::ForceReconnect => {
                let actions = self.client.force_reconnect();
                self.absorb(actions, now)
            },
            AppEvent::Quit => vec![AppAction::Quit],
        }
    }

    fn submit(
        &mut self,
        result: Result<Vec<ClientAction>, SendError>,
        now: I,
    ) -> Vec<AppAction> {
        match result {
            Ok(actions) => self.absorb(actions, now),
            Err(error) => {
                if error.is_silent() {
                    return vec![];
                }
                let text = match self.client.connection_state() {
                    ConnectionState::Connecting => CONNECTING_NOTICE,
                    _ => CLOSED_NOTICE,
                };
                self.notice = Some((text.to_string(), now));
                vec![AppAction::Render]
            },
        }
    }

    /// Consume notice actions into presentation state; pass everything
    /// else through to the runtime. Any handled event ends in a render.
    fn absorb(&mut self, actions: Vec<ClientAction>, now: I) -> Vec<AppAction> {
        let mut out = Vec::with_capacity(actions.len() + 1);

        for action in actions {
            match action {
                ClientAction::Notice { kind: NoticeKind::Transient, text } => {
                    self.notice = Some((text, now));
                },
                ClientAction::Notice { kind: NoticeKind::Persistent, text } => {
                    self.close_reason = Some(text);
                    self.messagable = false;
                },
                other => out.push(AppAction::Client(other)),
            }
        }

        out.push(AppAction::Render);
        out
    }

    fn expire_notice(&mut self, now: I) -> Vec<AppAction> {
        let expired = self
            .notice
            .as_ref()
            .is_some_and(|(_, shown_at)| now - *shown_at >= NOTICE_TTL);

        if expired {
            self.notice = None;
            vec![AppAction::Render]
        } else {
            vec![]
        }
    }

    /// Deliver a sync-layer event directly (convenience for drivers that
    /// hold only the App).
    pub fn handle_client_event(&mut self, event: ClientEvent, now: I) -> Vec<AppAction> {
        self.handle(AppEvent::Client(event), now)
    }

    /// Read-only ordered view of the unified message set.
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        self.client.timeline()
    }

    /// Current connection state, for status text and send-control gating.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.client.connection_state()
    }

    /// Active room.
    #[must_use]
    pub fn room(&self) -> &RoomId {
        self.client.room()
    }

    /// Current transient notice, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|(text, _)| text.as_str())
    }

    /// Persistent close explanation shown in place of the composer.
    #[must_use]
    pub fn close_reason(&self) -> Option<&str> {
        self.close_reason.as_deref()
    }

    /// Whether the send control is enabled.
    #[must_use]
    pub fn messagable(&self) -> bool {
        self.messagable
    }

    /// Session identity and moderation flags.
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        self.client.session()
    }
}

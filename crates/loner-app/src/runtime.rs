//! Generic runtime for application orchestration.
//!
//! The Runtime drives the event loop, coordinating between:
//! - [`App`]: state machine (sync core plus presentation state)
//! - [`Driver`]: platform-specific I/O
//!
//! Actions that fail at the I/O boundary feed back into the App as events
//! (a failed connect becomes a socket error), so policy stays in the state
//! machine and the loop never dies on a transient fault.

use loner_client::{ClientAction, ClientEvent};
use loner_core::{RoomId, SessionContext};

use crate::{App, AppAction, AppEvent, Driver};

/// Generic runtime that orchestrates App and Driver.
pub struct Runtime<D: Driver> {
    driver: D,
    app: App<D::Instant>,
}

impl<D: Driver> Runtime<D> {
    /// Create a runtime for the given room and session.
    pub fn new(driver: D, room: RoomId, session: SessionContext) -> Self {
        Self { driver, app: App::new(room, session) }
    }

    /// Run the main event loop until quit.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or payload sending fails; transient
    /// connect failures are fed back into the App instead.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let now = self.driver.now();
        let actions = self.app.start(now);
        let mut quit = self.process_actions(actions).await?;

        while !quit {
            let Some(event) = self.driver.poll_event().await? else {
                continue;
            };

            let now = self.driver.now();
            let actions = self.app.handle(event, now);
            quit = self.process_actions(actions).await?;
        }

        self.driver.disconnect();
        Ok(())
    }

    /// Execute actions, feeding I/O failures back into the App.
    ///
    /// Returns `true` if the application should quit.
    async fn process_actions(&mut self, initial: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending = initial;

        while !pending.is_empty() {
            let actions = std::mem::take(&mut pending);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Client(client_action) => {
                        if let Some(feedback) = self.execute(client_action).await {
                            let now = self.driver.now();
                            pending.extend(self.app.handle(AppEvent::Client(feedback), now));
                        }
                    },
                }
            }
        }

        Ok(false)
    }

    /// Execute one transport action. Returns a feedback event when the
    /// attempt failed in a way the state machine should know about.
    async fn execute(&mut self, action: ClientAction) -> Option<ClientEvent> {
        match action {
            ClientAction::Connect { room } => {
                if let Err(error) = self.driver.connect(&room).await {
                    tracing::warn!(%room, %error, "connect failed");
                    return Some(ClientEvent::SocketError { reason: error.to_string() });
                }
                None
            },
            ClientAction::Disconnect => {
                self.driver.disconnect();
                None
            },
            ClientAction::SendPayload { json } => {
                if let Err(error) = self.driver.send_payload(json).await {
                    tracing::warn!(%error, "payload send failed");
                    return Some(ClientEvent::SocketError { reason: error.to_string() });
                }
                None
            },
            ClientAction::FetchPage { room, index } => {
                self.driver.fetch_page(room, index);
                None
            },
            ClientAction::UploadMedia { room, media, filename, text } => {
                self.driver.upload_media(room, media, filename, text);
                None
            },
            ClientAction::ScrollToNewest => {
                self.driver.scroll_to_newest();
                None
            },
            ClientAction::Notice { .. } => {
                // Absorbed by the App before actions reach the runtime.
                tracing::warn!("unexpected notice action at runtime level");
                None
            },
        }
    }

    /// The application state.
    pub fn app(&self) -> &App<D::Instant> {
        &self.app
    }
}

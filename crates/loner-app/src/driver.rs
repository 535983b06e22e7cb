//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. A production frontend wires it to the WebSocket and
//! HTTP transports; tests implement it with scripted events and virtual
//! time, so the same orchestration code runs in both.

use std::{future::Future, ops::Sub, time::Duration};

use loner_core::RoomId;

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Fetches and uploads are fire-and-forget: the driver starts the work and
/// later delivers the completion as a
/// [`ClientEvent`](loner_client::ClientEvent) through [`Driver::poll_event`],
/// keeping all state transitions on the runtime's event loop.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Time instant type. Enables virtual time in tests.
    type Instant: Copy + Ord + Send + Sync + Sub<Output = Duration>;

    /// Poll for the next input event.
    ///
    /// Returns an event, or `None` if nothing is ready yet.
    fn poll_event(
        &mut self,
    ) -> impl Future<Output = Result<Option<AppEvent<Self::Instant>>, Self::Error>> + Send;

    /// Open the live channel for a room.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established; the
    /// runtime surfaces it as a socket error event.
    fn connect(&mut self, room: &RoomId) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Tear down the current live channel (clean close).
    fn disconnect(&mut self);

    /// Send a JSON payload on the live channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel send fails.
    fn send_payload(
        &mut self,
        json: String,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Start a history page fetch. Completion arrives as a later event.
    fn fetch_page(&mut self, room: RoomId, index: u32);

    /// Start a media upload. Completion arrives as a later event.
    fn upload_media(
        &mut self,
        room: RoomId,
        media: Vec<u8>,
        filename: String,
        text: Option<String>,
    );

    /// Scroll the viewport to the newest message.
    fn scroll_to_newest(&mut self);

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App<Self::Instant>) -> Result<(), Self::Error>;

    /// Current time instant.
    fn now(&self) -> Self::Instant;
}

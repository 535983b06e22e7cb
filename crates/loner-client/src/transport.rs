//! WebSocket and HTTP transport for the client.
//!
//! Provides [`LiveChannel`] (the room's WebSocket, bridged to channels) and
//! [`HistoryApi`] (paginated history fetches and multipart media uploads).
//! These are thin I/O layers - connection policy and reconciliation stay in
//! the sans-IO [`crate::ChatClient`].

use futures_util::{SinkExt, StreamExt};
use loner_core::{HistoryError, HistoryPage, RoomId};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::event::ClientEvent;

/// Close code reported when the stream ends without a close frame.
/// Classifies as transient, so the lifecycle manager reconnects.
const ABNORMAL_CLOSE_CODE: u16 = 1006;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Channel bridging error.
    #[error("channel error: {0}")]
    Channel(String),

    /// Media upload failed.
    #[error("upload failed: {0}")]
    Upload(String),
}

/// Handle to a connected live channel.
///
/// Outbound payloads go into `outgoing`; lifecycle and message events come
/// out of `events` as [`ClientEvent`]s ready to feed the state machine. An
/// internal task owns the WebSocket I/O.
pub struct LiveChannel {
    /// Send JSON payloads to the server.
    pub outgoing: mpsc::Sender<String>,
    /// Receive client events (opened, payloads, closed, errors).
    pub events: mpsc::Receiver<ClientEvent>,
    /// Abort handle to stop the connection task.
    abort_handle: tokio::task::AbortHandle,
}

impl LiveChannel {
    /// Stop the connection task. Used when switching rooms; the server
    /// sees a clean teardown, so no reconnect is triggered.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Connect the live channel for a room.
///
/// `ws_base` is the socket endpoint root, e.g. `wss://host/ws`; the room
/// URL follows the server convention `{ws_base}/space/{room}/`.
pub async fn connect(ws_base: &str, room: &RoomId) -> Result<LiveChannel, TransportError> {
    let url = format!("{ws_base}/space/{room}/");

    let (stream, _response) = connect_async(&url)
        .await
        .map_err(|e| TransportError::Connection(format!("websocket connect failed: {e}")))?;

    let (outgoing_tx, outgoing_rx) = mpsc::channel::<String>(32);
    let (events_tx, events_rx) = mpsc::channel::<ClientEvent>(128);

    events_tx
        .send(ClientEvent::SocketOpened)
        .await
        .map_err(|e| TransportError::Channel(format!("event channel closed: {e}")))?;

    let handle = tokio::spawn(run_channel(stream, outgoing_rx, events_tx));

    Ok(LiveChannel {
        outgoing: outgoing_tx,
        events: events_rx,
        abort_handle: handle.abort_handle(),
    })
}

/// Bridge between the WebSocket stream and the mpsc channels.
async fn run_channel(
    stream: tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    mut outgoing: mpsc::Receiver<String>,
    events: mpsc::Sender<ClientEvent>,
) {
    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            payload = outgoing.recv() => {
                let Some(json) = payload else {
                    // Caller dropped the handle: clean teardown.
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                };
                if let Err(e) = sink.send(Message::Text(json)).await {
                    let _ = events
                        .send(ClientEvent::SocketError { reason: e.to_string() })
                        .await;
                }
            },

            inbound = source.next() => {
                match inbound {
                    Some(Ok(Message::Text(json))) => {
                        if events.send(ClientEvent::LivePayload { json }).await.is_err() {
                            break;
                        }
                    },
                    Some(Ok(Message::Close(frame))) => {
                        let code = frame
                            .map_or(ABNORMAL_CLOSE_CODE, |f| u16::from(f.code));
                        let _ = events.send(ClientEvent::SocketClosed { code }).await;
                        break;
                    },
                    // Binary, ping, pong: nothing for the state machine.
                    Some(Ok(_)) => {},
                    Some(Err(e)) => {
                        let _ = events
                            .send(ClientEvent::SocketError { reason: e.to_string() })
                            .await;
                        let _ = events
                            .send(ClientEvent::SocketClosed { code: ABNORMAL_CLOSE_CODE })
                            .await;
                        break;
                    },
                    None => {
                        let _ = events
                            .send(ClientEvent::SocketClosed { code: ABNORMAL_CLOSE_CODE })
                            .await;
                        break;
                    },
                }
            },
        }
    }
}

/// Client for the history API and the media upload endpoint.
pub struct HistoryApi {
    http: reqwest::Client,
    base: String,
}

impl HistoryApi {
    /// Create a client against the given API root, e.g. `https://host`.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base: base.into() }
    }

    /// Fetch one history page for a room.
    ///
    /// # Errors
    ///
    /// - [`HistoryError::RoomNotFound`] on a 404
    /// - [`HistoryError::Retryable`] on network failures and server errors
    pub async fn get_page(&self, room: &RoomId, index: u32) -> Result<HistoryPage, HistoryError> {
        let url = format!("{}/api/chat/messages/", self.base);
        let response = self
            .http
            .get(&url)
            .query(&[("space", room.as_str()), ("page", &index.to_string())])
            .send()
            .await
            .map_err(|e| HistoryError::Retryable(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(HistoryError::RoomNotFound);
        }

        let response =
            response.error_for_status().map_err(|e| HistoryError::Retryable(e.to_string()))?;

        response.json::<HistoryPage>().await.map_err(|e| HistoryError::Retryable(e.to_string()))
    }

    /// Upload a media message with an optional caption.
    ///
    /// The resulting message is fanned out by the server over the live
    /// channel; this call only confirms the upload.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Upload`] on network or server failure.
    pub async fn upload_media(
        &self,
        room: &RoomId,
        media: Vec<u8>,
        filename: String,
        text: Option<String>,
    ) -> Result<(), TransportError> {
        let part = reqwest::multipart::Part::bytes(media).file_name(filename);
        let mut form = reqwest::multipart::Form::new()
            .text("space", room.to_string())
            .part("media", part);

        if let Some(caption) = text {
            form = form.text("message", caption);
        }

        let url = format!("{}/api/chat/media/", self.base);
        self.http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Upload(e.to_string()))?
            .error_for_status()
            .map_err(|e| TransportError::Upload(e.to_string()))?;

        Ok(())
    }
}

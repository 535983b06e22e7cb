//! Wire contracts for the history API and the live channel.
//!
//! The server speaks JSON on both surfaces. Inbound live payloads are
//! either a full message object or a `{"delete": id}` tombstone; anything
//! else fails classification and the caller ignores it without interrupting
//! later events.

use serde::{Deserialize, Serialize};

use crate::message::{Message, MessageId};

/// One page of a room's message history.
///
/// `results` is in server order, newest first. Pagination walks backward in
/// time with increasing `current`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryPage {
    /// Messages on this page, newest first.
    pub results: Vec<Message>,
    /// Index of this page (1-based).
    pub current: u32,
    /// Total page count for the room at fetch time.
    pub pages: u32,
}

impl HistoryPage {
    /// Whether older pages remain after this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.current < self.pages
    }
}

/// Inbound live-channel payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LiveEvent {
    /// A message was deleted: remove it from the visible set.
    Delete {
        /// Id of the deleted message.
        delete: MessageId,
    },

    /// A new message was accepted by the server.
    Message(Message),
}

impl LiveEvent {
    /// Classify a raw inbound frame.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error for payload shapes that are
    /// neither a message nor a tombstone. Callers log and skip these.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Outbound text payload for the live channel.
///
/// Media messages do not go over the channel; they use the multipart upload
/// endpoint instead.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundText {
    /// Message body.
    pub message: String,
}

impl OutboundText {
    /// Serialize to the channel's JSON shape.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tombstone_payload_classifies_as_delete() {
        let event = LiveEvent::parse(r#"{"delete": 42}"#).unwrap();
        assert_eq!(event, LiveEvent::Delete { delete: MessageId(42) });
    }

    #[test]
    fn message_payload_classifies_as_message() {
        let event = LiveEvent::parse(r#"{"id": 59, "user": "a", "message": "hi"}"#).unwrap();
        match event {
            LiveEvent::Message(msg) => assert_eq!(msg.id, MessageId(59)),
            LiveEvent::Delete { .. } => panic!("expected message"),
        }
    }

    #[test]
    fn unknown_shape_is_an_error() {
        assert!(LiveEvent::parse(r#"{"typing": true}"#).is_err());
        assert!(LiveEvent::parse("not json").is_err());
    }

    #[test]
    fn outbound_text_matches_channel_shape() {
        let json = OutboundText { message: "hello".into() }.to_json().unwrap();
        assert_eq!(json, r#"{"message":"hello"}"#);
    }

    #[test]
    fn history_page_has_more() {
        let page: HistoryPage =
            serde_json::from_str(r#"{"results": [], "current": 1, "pages": 2}"#).unwrap();
        assert!(page.has_more());

        let last: HistoryPage =
            serde_json::from_str(r#"{"results": [], "current": 2, "pages": 2}"#).unwrap();
        assert!(!last.has_more());
    }
}

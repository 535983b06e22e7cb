//! Message identity and ordering.
//!
//! A message is uniquely identified by its server-assigned [`MessageId`],
//! which is monotonic within a room. Identity decides deduplication and the
//! id order decides chronology, for history pages and live pushes alike.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned message identifier.
///
/// Unique within a room's lifetime and monotonically increasing in the
/// order the server accepted messages, so `Ord` on the id is chronological
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room (space) identifier: the space name as used in API and socket URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Room name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// A chat message, immutable once created.
///
/// Deserialized from the server's JSON shape. `text` and `media` are each
/// optional but at least one is set for any message the server accepts;
/// unknown fields are ignored so payload additions don't break older
/// clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Server-assigned identifier.
    pub id: MessageId,

    /// Screen name of the author.
    #[serde(rename = "user", default)]
    pub sender: String,

    /// Textual body. `None` for media-only messages.
    #[serde(rename = "message", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Media URL. `None` for text-only messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,

    /// Room this message belongs to. Omitted on some live payloads where
    /// the channel itself scopes the room.
    #[serde(rename = "space", default, skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomId>,

    /// Author was banned from the room at fetch time (moderation flag).
    #[serde(rename = "is_banned", default)]
    pub from_banned_user: bool,
}

impl Message {
    /// Create a text-only message. Mostly useful in tests and simulations.
    #[must_use]
    pub fn text(id: u64, sender: &str, body: &str) -> Self {
        Self {
            id: MessageId(id),
            sender: sender.to_string(),
            text: Some(body.to_string()),
            media: None,
            room: None,
            from_banned_user: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_order_is_chronological() {
        assert!(MessageId(53) < MessageId(59));
    }

    #[test]
    fn deserializes_server_shape() {
        let json = r#"{
            "id": 58,
            "user": "quiet-fox",
            "message": "hello loners",
            "media": null,
            "space": "memes",
            "is_banned": false,
            "created": "2023-01-01T00:00:00Z"
        }"#;

        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, MessageId(58));
        assert_eq!(msg.sender, "quiet-fox");
        assert_eq!(msg.text.as_deref(), Some("hello loners"));
        assert_eq!(msg.media, None);
        assert_eq!(msg.room, Some(RoomId::from("memes")));
        assert!(!msg.from_banned_user);
    }

    #[test]
    fn media_only_message_deserializes() {
        let json = r#"{"id": 7, "user": "a", "media": "https://cdn.example/m.png"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.text, None);
        assert_eq!(msg.media.as_deref(), Some("https://cdn.example/m.png"));
    }
}

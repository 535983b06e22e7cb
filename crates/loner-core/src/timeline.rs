//! Unified message set.
//!
//! The [`Timeline`] is the client-visible, deduplicated, chronologically
//! ordered collection of messages for the active room. History pages and
//! live pushes both merge into it through the same discipline: an id already
//! present is never re-inserted, and a tombstoned id can never resurface
//! through a later merge.
//!
//! The timeline has exactly one writer - the chat client state machine.
//! Everything else reads it through [`Timeline::messages`].

use std::collections::HashSet;

use crate::message::{Message, MessageId};

/// Ordered, deduplicated message collection for one room.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    /// Messages ordered oldest to newest.
    messages: Vec<Message>,
    /// Ids currently present in `messages`.
    ids: HashSet<MessageId>,
    /// Ids deleted by tombstone events. Blocks re-insertion from any
    /// later history page that still contains the deleted message.
    tombstones: HashSet<MessageId>,
}

impl Timeline {
    /// Create an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered view, oldest to newest.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether a message with this id is currently present.
    #[must_use]
    pub fn contains(&self, id: MessageId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of messages currently visible.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the timeline holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Newest message id, if any.
    #[must_use]
    pub fn newest_id(&self) -> Option<MessageId> {
        self.messages.last().map(|m| m.id)
    }

    /// Append a live-pushed message.
    ///
    /// The live channel delivers messages in server-accept order, so a new
    /// message is always the newest element. Returns `false` without
    /// mutating anything when the id is already present or tombstoned,
    /// which makes replayed pushes idempotent.
    pub fn push_live(&mut self, message: Message) -> bool {
        if self.ids.contains(&message.id) || self.tombstones.contains(&message.id) {
            return false;
        }

        self.ids.insert(message.id);
        self.messages.push(message);
        true
    }

    /// Merge an older history page into the front of the timeline.
    ///
    /// `page` is in server order (newest first) and is reversed here so the
    /// combined sequence stays oldest to newest. Ids already present or
    /// tombstoned are skipped. Returns how many messages were inserted; a
    /// fully tombstoned page merges as zero, which is not an error.
    pub fn merge_older_page(&mut self, page: Vec<Message>) -> usize {
        let older: Vec<Message> = page
            .into_iter()
            .rev()
            .filter(|m| !self.ids.contains(&m.id) && !self.tombstones.contains(&m.id))
            .collect();

        for message in &older {
            self.ids.insert(message.id);
        }

        let inserted = older.len();
        self.messages.splice(0..0, older);
        inserted
    }

    /// Apply a delete tombstone.
    ///
    /// Removes the matching entry if present (exactly one, by the id
    /// uniqueness invariant) and records the id so it cannot come back via
    /// a later page merge. Returns whether an entry was removed; applying
    /// the same tombstone again is a no-op, not an error.
    pub fn apply_tombstone(&mut self, id: MessageId) -> bool {
        self.tombstones.insert(id);

        if !self.ids.remove(&id) {
            return false;
        }

        self.messages.retain(|m| m.id != id);
        true
    }

    /// Drop all state. Used when switching rooms.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.ids.clear();
        self.tombstones.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: u64) -> Message {
        Message::text(id, "loner", "hi")
    }

    #[test]
    fn push_live_appends_in_receipt_order() {
        let mut tl = Timeline::new();
        assert!(tl.push_live(msg(1)));
        assert!(tl.push_live(msg(2)));
        assert!(tl.push_live(msg(3)));

        let ids: Vec<u64> = tl.messages().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn push_live_is_idempotent() {
        let mut tl = Timeline::new();
        assert!(tl.push_live(msg(1)));
        assert!(!tl.push_live(msg(1)));
        assert_eq!(tl.len(), 1);
    }

    #[test]
    fn page_merge_reverses_server_order() {
        let mut tl = Timeline::new();
        // Server pages are newest-first.
        let inserted = tl.merge_older_page(vec![msg(58), msg(57), msg(56)]);
        assert_eq!(inserted, 3);

        let ids: Vec<u64> = tl.messages().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![56, 57, 58]);
    }

    #[test]
    fn page_merge_skips_duplicates() {
        let mut tl = Timeline::new();
        tl.merge_older_page(vec![msg(58), msg(57), msg(56)]);
        // A live-cache refresh may hand us page 1 again with overlap.
        let inserted = tl.merge_older_page(vec![msg(56), msg(55)]);
        assert_eq!(inserted, 1);

        let ids: Vec<u64> = tl.messages().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![55, 56, 57, 58]);
    }

    #[test]
    fn tombstone_removes_exactly_one() {
        let mut tl = Timeline::new();
        tl.push_live(msg(1));
        tl.push_live(msg(2));

        assert!(tl.apply_tombstone(MessageId(1)));
        assert_eq!(tl.len(), 1);
        assert!(!tl.contains(MessageId(1)));

        // Second application is a safe no-op.
        assert!(!tl.apply_tombstone(MessageId(1)));
        assert_eq!(tl.len(), 1);
    }

    #[test]
    fn tombstone_for_absent_id_is_noop() {
        let mut tl = Timeline::new();
        tl.push_live(msg(1));
        assert!(!tl.apply_tombstone(MessageId(99)));
        assert_eq!(tl.len(), 1);
    }

    #[test]
    fn deleted_id_never_resurfaces_from_pages() {
        let mut tl = Timeline::new();
        tl.push_live(msg(56));
        tl.apply_tombstone(MessageId(56));

        // Page 1 re-delivered later still contains 56.
        let inserted = tl.merge_older_page(vec![msg(58), msg(57), msg(56)]);
        assert_eq!(inserted, 2);
        assert!(!tl.contains(MessageId(56)));
    }

    #[test]
    fn tombstoned_id_blocks_live_replay() {
        let mut tl = Timeline::new();
        tl.push_live(msg(5));
        tl.apply_tombstone(MessageId(5));
        assert!(!tl.push_live(msg(5)));
        assert!(tl.is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut tl = Timeline::new();
        tl.push_live(msg(1));
        tl.apply_tombstone(MessageId(1));
        tl.clear();

        // After a room switch the old tombstones no longer apply.
        assert!(tl.push_live(msg(1)));
    }
}

//! Session context.
//!
//! An explicit value object for the caller's identity and moderation flags,
//! passed to the components that need it. Reads and writes go through
//! accessors so there is exactly one place these flags change.

/// Identity and moderation flags for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Server-assigned user id.
    user_id: u64,
    /// Screen name shown to other loners.
    name: String,
    /// Banned from the active room. Set from moderation signals.
    banned: bool,
    /// Moderator of the active room.
    moderator: bool,
}

impl SessionContext {
    /// Create a session for the given user.
    pub fn new(user_id: u64, name: impl Into<String>) -> Self {
        Self { user_id, name: name.into(), banned: false, moderator: false }
    }

    /// Server-assigned user id.
    #[must_use]
    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    /// Screen name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this session is banned from the active room.
    #[must_use]
    pub fn is_banned(&self) -> bool {
        self.banned
    }

    /// Record a ban signal for the active room.
    pub fn set_banned(&mut self, banned: bool) {
        self.banned = banned;
    }

    /// Whether this session moderates the active room.
    #[must_use]
    pub fn is_moderator(&self) -> bool {
        self.moderator
    }

    /// Record moderator status for the active room.
    pub fn set_moderator(&mut self, moderator: bool) {
        self.moderator = moderator;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default_clear() {
        let session = SessionContext::new(7, "quiet-fox");
        assert_eq!(session.user_id(), 7);
        assert_eq!(session.name(), "quiet-fox");
        assert!(!session.is_banned());
        assert!(!session.is_moderator());
    }

    #[test]
    fn flags_round_trip() {
        let mut session = SessionContext::new(7, "quiet-fox");
        session.set_banned(true);
        session.set_moderator(true);
        assert!(session.is_banned());
        assert!(session.is_moderator());
    }
}

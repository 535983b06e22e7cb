//! Backward pagination cursor.
//!
//! Pages are requested in strictly increasing index order, moving backward
//! in time, with at most one fetch in flight. A failed fetch clears the
//! in-flight mark without advancing, so the same page is retried with no
//! gaps or skips. Once the index passes the server's page count the cursor
//! latches exhausted until the room changes.

/// Pagination state for one room's history.
#[derive(Debug, Clone)]
pub struct HistoryCursor {
    /// Next page index to request (1-based; page 1 is the newest slice).
    next_index: u32,
    /// Total page count, unknown until the first page arrives.
    total_pages: Option<u32>,
    /// Index currently being fetched, if any.
    in_flight: Option<u32>,
}

impl Default for HistoryCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryCursor {
    /// Cursor positioned at the most recent page.
    #[must_use]
    pub fn new() -> Self {
        Self { next_index: 1, total_pages: None, in_flight: None }
    }

    /// Begin a fetch, returning the index to request.
    ///
    /// Returns `None` when a fetch is already in flight or history is
    /// exhausted - at most one in-flight fetch per page, and a fetched
    /// index is never requested again.
    pub fn begin_fetch(&mut self) -> Option<u32> {
        if self.in_flight.is_some() || self.exhausted() {
            return None;
        }

        self.in_flight = Some(self.next_index);
        Some(self.next_index)
    }

    /// Record a completed fetch for `index`.
    ///
    /// Returns `false` for completions that don't match the outstanding
    /// fetch (stale arrivals after a retry or room switch); the caller
    /// must discard those rather than merge them. On a match the cursor
    /// advances exactly once.
    pub fn complete(&mut self, index: u32, total_pages: u32) -> bool {
        if self.in_flight != Some(index) {
            return false;
        }

        self.in_flight = None;
        self.total_pages = Some(total_pages);
        self.next_index = index + 1;
        true
    }

    /// Record a failed fetch. The index does not advance; the next
    /// [`Self::begin_fetch`] retries the same page.
    pub fn fail(&mut self) {
        self.in_flight = None;
    }

    /// Whether every page has been fetched.
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.total_pages.is_some_and(|total| self.next_index > total)
    }

    /// Whether a fetch is currently outstanding.
    #[must_use]
    pub fn in_flight(&self) -> Option<u32> {
        self.in_flight
    }

    /// More pages may remain (unknown counts as yes, matching the
    /// "fetch until told otherwise" behavior of first load).
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.exhausted()
    }

    /// Reset for a new room.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_increase_strictly() {
        let mut cursor = HistoryCursor::new();
        assert_eq!(cursor.begin_fetch(), Some(1));
        assert!(cursor.complete(1, 3));
        assert_eq!(cursor.begin_fetch(), Some(2));
        assert!(cursor.complete(2, 3));
        assert_eq!(cursor.begin_fetch(), Some(3));
        assert!(cursor.complete(3, 3));

        assert!(cursor.exhausted());
        assert_eq!(cursor.begin_fetch(), None);
    }

    #[test]
    fn single_fetch_in_flight() {
        let mut cursor = HistoryCursor::new();
        assert_eq!(cursor.begin_fetch(), Some(1));
        // Concurrent trigger for the same page is suppressed.
        assert_eq!(cursor.begin_fetch(), None);
    }

    #[test]
    fn failure_retries_same_index() {
        let mut cursor = HistoryCursor::new();
        assert_eq!(cursor.begin_fetch(), Some(1));
        cursor.fail();
        assert_eq!(cursor.begin_fetch(), Some(1));
    }

    #[test]
    fn stale_completion_is_rejected() {
        let mut cursor = HistoryCursor::new();
        assert_eq!(cursor.begin_fetch(), Some(1));
        cursor.fail();

        // The original request completes after we already gave up on it.
        assert!(!cursor.complete(1, 3));
        assert_eq!(cursor.begin_fetch(), Some(1));
    }

    #[test]
    fn single_page_room_exhausts_immediately() {
        let mut cursor = HistoryCursor::new();
        assert_eq!(cursor.begin_fetch(), Some(1));
        assert!(cursor.complete(1, 1));
        assert!(cursor.exhausted());
        assert!(!cursor.has_more());
    }

    #[test]
    fn reset_forgets_everything() {
        let mut cursor = HistoryCursor::new();
        cursor.begin_fetch();
        cursor.complete(1, 1);
        assert!(cursor.exhausted());

        cursor.reset();
        assert!(cursor.has_more());
        assert_eq!(cursor.begin_fetch(), Some(1));
    }
}

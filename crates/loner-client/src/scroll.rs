//! Scroll and viewport coordination.
//!
//! Tracks whether the viewport is pinned to the newest message and decides
//! when nearing the top should pull another history page. Timeline
//! mutations while pinned force the position to the newest entry; while
//! unpinned the position is left alone so incoming messages don't disrupt
//! reading.

use crate::event::ScrollMetrics;

/// Distance from the bottom (px) within which the viewport counts as
/// pinned to the newest message.
pub const PIN_THRESHOLD_PX: u32 = 50;

/// Distance from the top (px) within which older history is requested.
pub const TOP_THRESHOLD_PX: u32 = 20;

/// Viewport pin and load-trigger state.
#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    pinned: bool,
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollCoordinator {
    /// New coordinator, pinned to the newest message (initial view).
    #[must_use]
    pub fn new() -> Self {
        Self { pinned: true }
    }

    /// Whether new messages should force the viewport to the newest entry.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Update pin state from the reported geometry and decide whether the
    /// viewport is near enough to the top to want older history.
    ///
    /// Content shorter than the viewport counts as "at the top": there is
    /// no scrollbar yet, so pagination is the only way to fill the view.
    pub fn observe(&mut self, metrics: ScrollMetrics) -> bool {
        let from_bottom = metrics.scroll_height.saturating_sub(metrics.scroll_top);
        self.pinned = from_bottom <= metrics.viewport_height + PIN_THRESHOLD_PX;

        metrics.scroll_top <= TOP_THRESHOLD_PX
            || metrics.scroll_height <= metrics.viewport_height
    }

    /// Reset to the initial pinned state (room switch).
    pub fn reset(&mut self) {
        self.pinned = true;
    }
}

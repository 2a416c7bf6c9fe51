//! Render state tracking for full vs partial frames.
//!
//! The compositor always redraws every widget, but the full background blit
//! is only needed when the panel content is unknown:
//! - First frame after power-on (panel holds whatever was there before)
//! - Explicit refresh (draining frame, or a caller that cleared the panel)
//!
//! # What Gets Drawn
//!
//! | Refresh | Background bitmap | Widgets |
//! |---------|-------------------|---------|
//! | `Full` | yes | all, over their backdrops |
//! | `Partial` | no | all, over their backdrops |
//!
//! Deciding the refresh mode is separate from ending the frame, so the
//! composite step can be repeated without consuming the pending refresh.

use crate::compositor::Refresh;

/// Tracks whether the next frame needs the full background.
#[derive(Debug)]
pub struct RenderState {
    /// Nothing has been flushed yet; the panel content is unknown.
    first_frame: bool,

    /// Whether a full redraw was requested since the last frame.
    refresh_requested: bool,

    /// Frames flushed so far.
    frames: u64,
}

impl RenderState {
    /// State before the first flush.
    pub const fn new() -> Self {
        Self {
            first_frame: true,
            refresh_requested: false,
            frames: 0,
        }
    }

    /// Refresh mode for the frame being built.
    #[inline]
    pub const fn refresh(&self) -> Refresh {
        if self.first_frame || self.refresh_requested { Refresh::Full } else { Refresh::Partial }
    }

    /// Force the next frame to blit the full background.
    #[inline]
    pub const fn request_refresh(&mut self) { self.refresh_requested = true; }

    #[inline]
    pub const fn frames(&self) -> u64 { self.frames }

    /// Mark the frame flushed: clears any refresh request and counts the frame.
    pub const fn end_frame(&mut self) {
        self.first_frame = false;
        self.refresh_requested = false;
        self.frames += 1;
    }
}

impl Default for RenderState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_state_new() {
        let fresh = RenderState::new();
        assert!(fresh.first_frame, "Nothing flushed yet");
        assert_eq!(fresh.refresh(), Refresh::Full, "First frame needs the background");
        assert_eq!(fresh.frames(), 0);
    }

    #[test]
    fn test_default_matches_new() {
        let state = RenderState::default();
        assert!(state.first_frame);
        assert_eq!(state.refresh(), RenderState::new().refresh());
    }

    #[test]
    fn test_partial_after_first_frame() {
        let mut state = RenderState::new();
        state.end_frame();
        assert_eq!(state.refresh(), Refresh::Partial, "Steady state frames skip the background");
        assert_eq!(state.frames(), 1);
    }

    #[test]
    fn test_request_refresh_lasts_one_frame() {
        let mut state = RenderState::new();
        state.end_frame();
        state.request_refresh();
        assert_eq!(state.refresh(), Refresh::Full, "Requested refresh should blit");
        state.end_frame();
        assert_eq!(state.refresh(), Refresh::Partial, "Request is cleared at end of frame");
    }

    #[test]
    fn test_refresh_query_does_not_consume() {
        let state = RenderState::new();
        assert_eq!(state.refresh(), state.refresh(), "Querying twice must not change the mode");
    }
}

//! Color constants for the telemetry dashboard.
//!
//! # Rgb888 Throughout
//!
//! The widget model and the draw commands carry `Rgb888` values. Panels that
//! store pixels as RGB565 (the simulated panel included) convert at the
//! channel boundary with the `From` impls embedded-graphics provides.
//!
//! Built-in `RgbColor` trait constants are used where they exist. The default
//! layout draws pure white text and bars.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0). Fill for the panel when no background image loads.
pub const BLACK: Rgb888 = Rgb888::BLACK;

/// Pure white (255, 255, 255). Default text and gauge bar color.
pub const WHITE: Rgb888 = Rgb888::WHITE;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Dim gray for the unfilled gauge track.
/// Roughly 25% brightness so the filled bar stays the dominant element.
pub const TRACK_GRAY: Rgb888 = Rgb888::new(64, 64, 64);

/// Status dot color when the watched service is running.
pub const STATUS_ON: Rgb888 = Rgb888::new(0, 200, 0);

/// Status dot color when the watched service is stopped or unknown.
pub const STATUS_OFF: Rgb888 = Rgb888::new(200, 0, 0);

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_dimmer_than_bar() {
        assert!(TRACK_GRAY.r() < WHITE.r(), "Track should be dimmer than the default bar");
    }

    #[test]
    fn test_status_palette_distinct() {
        assert_ne!(STATUS_ON, STATUS_OFF, "On and off states must be distinguishable");
    }
}

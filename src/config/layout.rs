//! Default dashboard layout constants.
//!
//! Coordinates are for the 480×320 landscape frame. Positions are `const`
//! so [`Dashboard::build`](crate::dashboard::Dashboard::build) only wires
//! styles and paths at startup.

use embedded_graphics::prelude::{Point, Size};

// =============================================================================
// Header Row
// =============================================================================

/// Clock label, top-left.
pub const CLOCK_POSITION: Point = Point::new(21, 30);

/// strftime pattern for the clock label.
pub const CLOCK_FORMAT: &str = "%Y-%m-%d %I:%M %p";

/// Widest clock string, used to size its backdrop.
pub const CLOCK_TEMPLATE: &str = "0000-00-00 00:00 AM";

/// Address label, top-right.
pub const IP_POSITION: Point = Point::new(260, 30);

/// Widest address string (full IPv4).
pub const IP_TEMPLATE: &str = "IP: 000.000.000.000";

/// Header font size in pixels.
pub const HEADER_FONT_SIZE: u32 = 20;

// =============================================================================
// Captions
// =============================================================================

pub const CPU_CAPTION: &str = "CPU\nUsage:";
pub const CPU_CAPTION_POSITION: Point = Point::new(21, 75);

pub const TEMP_CAPTION: &str = "CPU\nTemp:";
pub const TEMP_CAPTION_POSITION: Point = Point::new(21, 160);

pub const RAM_CAPTION: &str = "RAM\nUsage:";
pub const RAM_CAPTION_POSITION: Point = Point::new(260, 75);

/// Caption and gauge label font size in pixels.
pub const CAPTION_FONT_SIZE: u32 = 25;

// =============================================================================
// Gauges
// =============================================================================

/// Outer radius shared by all three gauges.
pub const GAUGE_RADIUS: u32 = 40;

pub const CPU_GAUGE_CENTER: Point = Point::new(155, 105);
pub const CPU_GAUGE_THICKNESS: u32 = 4;

pub const TEMP_GAUGE_CENTER: Point = Point::new(155, 200);
pub const TEMP_GAUGE_THICKNESS: u32 = 8;

/// Upper bound of the temperature gauge in °C.
pub const TEMP_GAUGE_MAX: f32 = 100.0;

pub const RAM_GAUGE_CENTER: Point = Point::new(395, 105);
pub const RAM_GAUGE_THICKNESS: u32 = 4;

/// Sweep shared by all gauges: open at the bottom.
pub const GAUGE_ANGLE_START: f32 = 135.0;
pub const GAUGE_ANGLE_END: f32 = 405.0;

// =============================================================================
// Service Status
// =============================================================================

/// Status dot box is 30×30 at (21, 255).
pub const STATUS_CENTER: Point = Point::new(36, 270);
pub const STATUS_DIAMETER: u32 = 30;

/// Service logo next to the status dot.
pub const LOGO_POSITION: Point = Point::new(60, 245);
pub const LOGO_SIZE: Size = Size::new(50, 50);

// =============================================================================
// Unit Tests
// =============================================================================

//! On/off status dot for the watched background service.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::{STATUS_OFF, STATUS_ON};

/// A filled dot whose color follows a boolean state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusIndicator {
    pub center: Point,
    /// Box the dot is drawn in. Also the region repainted every tick.
    pub size: Size,
    /// Corner radius of the dot. Half the box side gives a circle.
    pub radius: u32,
    pub on: bool,
    pub on_color: Rgb888,
    pub off_color: Rgb888,
}

impl StatusIndicator {
    /// Circular indicator with the default green/red palette, initially off.
    pub const fn new(
        center: Point,
        diameter: u32,
    ) -> Self {
        Self {
            center,
            size: Size::new_equal(diameter),
            radius: diameter / 2,
            on: false,
            on_color: STATUS_ON,
            off_color: STATUS_OFF,
        }
    }

    /// Fill color for the current state.
    #[inline]
    pub const fn color(&self) -> Rgb888 { if self.on { self.on_color } else { self.off_color } }

    #[inline]
    pub fn bounds(&self) -> Rectangle { dot_box(self.center, self.size) }
}

/// Box of `size` with its top-left corner at `center - size / 2`.
///
/// `Rectangle::with_center` offsets even sizes by `(size - 1) / 2`, one
/// pixel right of and below this corner.
pub fn dot_box(
    center: Point,
    size: Size,
) -> Rectangle {
    let half = Point::new((size.width / 2) as i32, (size.height / 2) as i32);
    Rectangle::new(center - half, size)
}

// =============================================================================
// Unit Tests
// =============================================================================

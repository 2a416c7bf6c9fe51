//! Radial progress gauges.
//!
//! A gauge is a ring segment swept between two angles. The unfilled part of
//! the sweep is drawn in the track color, the filled part in the bar color,
//! and an optional label sits at the center.
//!
//! # Angle Convention
//!
//! Degrees, 0° at 3 o'clock, increasing clockwise on screen (y grows
//! downward). A sweep from 135° to 405° is the familiar speedometer shape:
//! it starts at 7:30, passes over the top and ends at 4:30, open at the
//! bottom. Angles above 360° are allowed so a sweep never has to wrap.
//!
//! The geometry itself lives in [`crate::geometry`]; this module only holds
//! the configuration and the current value.

use core::fmt;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::text::{LabelStyle, LabelText, Truncating, push_truncated};
use crate::colors::{TRACK_GRAY, WHITE};

/// Which end of the sweep the fill grows from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Fill starts at `angle_start` and grows toward `angle_end`.
    #[default]
    Clockwise,
    /// Fill starts at `angle_end` and grows back toward `angle_start`.
    CounterClockwise,
}

/// Gaps cut into the sweep.
///
/// With the default two segments the single gap sits at the sweep midpoint.
/// More segments give a stepped bar with a gap between each pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Separator {
    /// Width of each gap in degrees.
    pub gap: f32,
    /// Number of sub-arcs the sweep is split into (at least 2).
    pub segments: u8,
}

impl Separator {
    /// One gap of `gap` degrees centered at the sweep midpoint.
    pub const fn midpoint(gap: f32) -> Self { Self { gap, segments: 2 } }
}

/// Text drawn at the gauge center.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeLabel {
    pub text: LabelText,
    pub style: LabelStyle,
}

/// A radial gauge widget.
///
/// `value` is deliberately not clamped here. Sensors can spike outside the
/// range and the geometry step clamps when mapping to angles.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGauge {
    pub center: Point,
    /// Outer radius in pixels. The stroke is drawn inward from here.
    pub radius: u32,
    pub thickness: u32,
    pub min: f32,
    pub max: f32,
    pub value: f32,
    pub angle_start: f32,
    pub angle_end: f32,
    pub direction: Direction,
    pub separator: Option<Separator>,
    pub bar_color: Rgb888,
    pub track_color: Rgb888,
    pub label: Option<GaugeLabel>,
}

impl RadialGauge {
    /// A 0–100 gauge with the 135°→405° sweep, white bar and no label.
    pub const fn new(
        center: Point,
        radius: u32,
        thickness: u32,
    ) -> Self {
        Self {
            center,
            radius,
            thickness,
            min: 0.0,
            max: 100.0,
            value: 0.0,
            angle_start: 135.0,
            angle_end: 405.0,
            direction: Direction::Clockwise,
            separator: None,
            bar_color: WHITE,
            track_color: TRACK_GRAY,
            label: None,
        }
    }

    #[must_use]
    pub const fn with_range(
        mut self,
        min: f32,
        max: f32,
    ) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub const fn with_sweep(
        mut self,
        angle_start: f32,
        angle_end: f32,
        direction: Direction,
    ) -> Self {
        self.angle_start = angle_start;
        self.angle_end = angle_end;
        self.direction = direction;
        self
    }

    #[must_use]
    pub const fn with_separator(
        mut self,
        separator: Separator,
    ) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Attach a centered label with initial text.
    #[must_use]
    pub fn with_label(
        mut self,
        style: LabelStyle,
        text: &str,
    ) -> Self {
        let mut label = GaugeLabel {
            text: LabelText::new(),
            style,
        };
        push_truncated(&mut label.text, text);
        self.label = Some(label);
        self
    }

    /// Rewrite the centered label. No-op for gauges without one.
    pub fn set_label_fmt(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        if let Some(label) = self.label.as_mut() {
            label.text.clear();
            let _ = fmt::Write::write_fmt(&mut Truncating(&mut label.text), args);
        }
    }

    /// Square around the ring, repainted from the background every tick.
    #[inline]
    pub fn bounds(&self) -> Rectangle {
        // 1px margin absorbs anti-aliasing spill on real panels
        Rectangle::with_center(self.center, Size::new_equal(self.radius * 2 + 2))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;

    fn label_style() -> LabelStyle {
        LabelStyle::new(Arc::from(PathBuf::from("font.ttf").as_path()), 25, WHITE)
    }

    #[test]
    fn test_new_defaults() {
        let gauge = RadialGauge::new(Point::new(155, 105), 40, 4);
        assert_eq!(gauge.min, 0.0);
        assert_eq!(gauge.max, 100.0);
        assert_eq!(gauge.angle_start, 135.0, "Default sweep should start at 135 degrees");
        assert_eq!(gauge.angle_end, 405.0, "Default sweep should end at 405 degrees");
        assert_eq!(gauge.direction, Direction::Clockwise);
        assert!(gauge.separator.is_none(), "No separator by default");
        assert!(gauge.label.is_none(), "No label by default");
    }

    #[test]
    fn test_value_not_clamped_on_widget() {
        let mut gauge = RadialGauge::new(Point::zero(), 40, 4);
        gauge.value = 150.0;
        assert_eq!(gauge.value, 150.0, "Widget stores raw values; geometry clamps");
    }

    #[test]
    fn test_set_label_fmt() {
        let mut gauge = RadialGauge::new(Point::zero(), 40, 4).with_label(label_style(), "--%");
        gauge.set_label_fmt(format_args!("{:.0}%", 42.4));
        assert_eq!(gauge.label.as_ref().map(|l| l.text.as_str()), Some("42%"));
    }

    #[test]
    fn test_set_label_fmt_without_label() {
        let mut gauge = RadialGauge::new(Point::zero(), 40, 4);
        gauge.set_label_fmt(format_args!("{}", 1));
        assert!(gauge.label.is_none(), "Setting text must not create a label");
    }

    #[test]
    fn test_bounds_centered() {
        let gauge = RadialGauge::new(Point::new(155, 105), 40, 4);
        let bounds = gauge.bounds();
        assert_eq!(bounds.size, Size::new(82, 82));
        assert_eq!(bounds.center(), Point::new(155, 105), "Bounds should be centered on the gauge");
    }

    #[test]
    fn test_separator_midpoint() {
        let sep = Separator::midpoint(6.0);
        assert_eq!(sep.segments, 2, "Midpoint separator splits into two arcs");
    }
}

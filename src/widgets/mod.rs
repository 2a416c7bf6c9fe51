//! Widget data model for the telemetry dashboard.
//!
//! - [`text`]: clock, address line and static captions
//! - [`gauge`]: radial progress gauges
//! - [`status`]: on/off indicator dot
//! - [`image`]: static images (service logos)
//!
//! # Shape vs Value
//!
//! Widgets hold both their layout (position, size, style) and their current
//! value. Layout is fixed when the frame is built; the update loop only
//! rewrites values. Nothing here draws. The compositor turns widgets into
//! [`DrawCommand`](crate::compositor::DrawCommand)s and the device
//! rasterizes them.
//!
//! # Layers
//!
//! Each widget kind belongs to a [`Layer`]. The compositor emits layers in
//! ascending order so the status dot is always drawn last.

mod gauge;
mod image;
mod status;
mod text;

use embedded_graphics::primitives::Rectangle;
pub use gauge::{Direction, GaugeLabel, RadialGauge, Separator};
pub use image::{ImageRef, StaticImage};
pub use status::{StatusIndicator, dot_box};
pub use text::{FontRef, LABEL_CAPACITY, LabelStyle, LabelText, TextLabel, estimate_reserve};

/// Draw order bucket. Later layers occlude earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Image,
    Text,
    Gauge,
    Status,
}

/// Any element of a [`DashboardFrame`](crate::frame::DashboardFrame).
#[derive(Clone, Debug, PartialEq)]
pub enum Widget {
    Image(StaticImage),
    Text(TextLabel),
    Gauge(RadialGauge),
    Status(StatusIndicator),
}

impl Widget {
    #[inline]
    pub const fn layer(&self) -> Layer {
        match self {
            Self::Image(_) => Layer::Image,
            Self::Text(_) => Layer::Text,
            Self::Gauge(_) => Layer::Gauge,
            Self::Status(_) => Layer::Status,
        }
    }

    /// Region repainted from the background before the widget is drawn.
    ///
    /// `None` for images without an explicit size; those are drawn once over
    /// the full background and never need a backdrop.
    pub fn bounds(&self) -> Option<Rectangle> {
        match self {
            Self::Image(image) => image.bounds(),
            Self::Text(label) => Some(label.bounds()),
            Self::Gauge(gauge) => Some(gauge.bounds()),
            Self::Status(dot) => Some(dot.bounds()),
        }
    }
}

impl From<StaticImage> for Widget {
    fn from(image: StaticImage) -> Self { Self::Image(image) }
}

impl From<TextLabel> for Widget {
    fn from(label: TextLabel) -> Self { Self::Text(label) }
}

impl From<RadialGauge> for Widget {
    fn from(gauge: RadialGauge) -> Self { Self::Gauge(gauge) }
}

impl From<StatusIndicator> for Widget {
    fn from(dot: StatusIndicator) -> Self { Self::Status(dot) }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::*;

    use super::*;

    #[test]
    fn test_layer_order() {
        assert!(Layer::Image < Layer::Text);
        assert!(Layer::Text < Layer::Gauge);
        assert!(Layer::Gauge < Layer::Status, "Status must be drawn last");
    }

    #[test]
    fn test_widget_layer_mapping() {
        let gauge: Widget = RadialGauge::new(Point::zero(), 40, 4).into();
        let dot: Widget = StatusIndicator::new(Point::zero(), 30).into();
        assert_eq!(gauge.layer(), Layer::Gauge);
        assert_eq!(dot.layer(), Layer::Status);
    }

    #[test]
    fn test_unsized_image_has_no_bounds() {
        let image: Widget = StaticImage::new("logo.png", Point::new(60, 245), None).into();
        assert!(image.bounds().is_none(), "Native-size images have no known bounds");
    }
}

//! The dashboard frame: background plus the ordered widget set.
//!
//! A frame is built once at startup. Widget positions and styles stay fixed
//! for the rest of the run; only values are rewritten through the typed
//! accessors (`text_mut`, `gauge_mut`, `status_mut`) using the [`WidgetId`]
//! returned by [`DashboardFrame::push`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::widgets::{ImageRef, RadialGauge, StatusIndicator, TextLabel, Widget};

/// Handle to a widget inside a [`DashboardFrame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetId(usize);

/// Read-only base raster shared by every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    pub image: ImageRef,
    /// Display resolution the image was picked for.
    pub size: Size,
}

/// Background region a draw command is composited against.
#[derive(Clone, Debug, PartialEq)]
pub struct Backdrop {
    pub image: ImageRef,
    /// Sub-rectangle of the background, clipped to its bounds.
    pub region: Rectangle,
}

impl Background {
    pub fn new(
        image: impl AsRef<Path>,
        size: Size,
    ) -> Self {
        Self {
            image: Arc::from(image.as_ref()),
            size,
        }
    }

    /// Pick `<dir>/<stem>_<W>x<H>.png` for the given display resolution.
    pub fn for_display(
        dir: &Path,
        stem: &str,
        size: Size,
    ) -> Self {
        let path: PathBuf = dir.join(format!("{stem}_{}x{}.png", size.width, size.height));
        Self::new(path, size)
    }

    #[inline]
    pub fn bounds(&self) -> Rectangle { Rectangle::new(Point::zero(), self.size) }

    /// The part of the background under `region`, or `None` when the region
    /// lies entirely off screen.
    pub fn backdrop(
        &self,
        region: Rectangle,
    ) -> Option<Backdrop> {
        let clipped = self.bounds().intersection(&region);
        if clipped.is_zero_sized() {
            return None;
        }
        Some(Backdrop {
            image: Arc::clone(&self.image),
            region: clipped,
        })
    }
}

/// Background plus widgets in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardFrame {
    background: Background,
    widgets: Vec<Widget>,
}

impl DashboardFrame {
    pub fn new(background: Background) -> Self {
        Self {
            background,
            widgets: Vec::new(),
        }
    }

    /// Append a widget and return its handle.
    pub fn push(
        &mut self,
        widget: impl Into<Widget>,
    ) -> WidgetId {
        self.widgets.push(widget.into());
        WidgetId(self.widgets.len() - 1)
    }

    #[inline]
    pub fn background(&self) -> &Background { &self.background }

    #[inline]
    pub fn widgets(&self) -> &[Widget] { &self.widgets }

    pub fn widget(
        &self,
        id: WidgetId,
    ) -> Option<&Widget> {
        self.widgets.get(id.0)
    }

    pub fn text_mut(
        &mut self,
        id: WidgetId,
    ) -> Option<&mut TextLabel> {
        match self.widgets.get_mut(id.0) {
            Some(Widget::Text(label)) => Some(label),
            _ => None,
        }
    }

    pub fn gauge_mut(
        &mut self,
        id: WidgetId,
    ) -> Option<&mut RadialGauge> {
        match self.widgets.get_mut(id.0) {
            Some(Widget::Gauge(gauge)) => Some(gauge),
            _ => None,
        }
    }

    pub fn status_mut(
        &mut self,
        id: WidgetId,
    ) -> Option<&mut StatusIndicator> {
        match self.widgets.get_mut(id.0) {
            Some(Widget::Status(dot)) => Some(dot),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

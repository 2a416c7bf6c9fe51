//! Text labels: clock, address line and the static captions next to gauges.

use core::fmt::{self, Write};
use std::path::Path;
use std::sync::Arc;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Maximum characters a label can hold. Longer text is truncated.
pub const LABEL_CAPACITY: usize = 40;

/// Fixed-capacity label text. Reformatted every tick without heap churn.
pub type LabelText = heapless::String<LABEL_CAPACITY>;

/// Shared reference to a font file. Rasterization belongs to the device.
pub type FontRef = Arc<Path>;

/// Font, size and color for any piece of text the dashboard draws.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
    pub font: FontRef,
    /// Nominal font size in pixels.
    pub size: u32,
    pub color: Rgb888,
}

impl LabelStyle {
    pub fn new(
        font: FontRef,
        size: u32,
        color: Rgb888,
    ) -> Self {
        Self { font, size, color }
    }
}

/// A text widget anchored at its top-left corner.
///
/// `reserve` is the box the label may occupy. The compositor repaints the
/// background under the whole box every tick, so a shorter string never
/// leaves the tail of a longer one behind.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub position: Point,
    pub reserve: Size,
    pub style: LabelStyle,
    text: LabelText,
}

impl TextLabel {
    pub fn new(
        position: Point,
        reserve: Size,
        style: LabelStyle,
    ) -> Self {
        Self {
            position,
            reserve,
            style,
            text: LabelText::new(),
        }
    }

    /// Builder form of [`set_text`](Self::set_text).
    #[must_use]
    pub fn with_text(
        mut self,
        text: &str,
    ) -> Self {
        self.set_text(text);
        self
    }

    #[inline]
    pub fn text(&self) -> &str { self.text.as_str() }

    /// Replace the content, truncating at [`LABEL_CAPACITY`] characters.
    pub fn set_text(
        &mut self,
        text: &str,
    ) {
        self.text.clear();
        push_truncated(&mut self.text, text);
    }

    /// Replace the content with formatted output, truncating on overflow.
    pub fn set_fmt(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        self.text.clear();
        // Truncating writer never reports an error
        let _ = Truncating(&mut self.text).write_fmt(args);
    }

    /// Region repainted from the background before the text is drawn.
    #[inline]
    pub fn bounds(&self) -> Rectangle { Rectangle::new(self.position, self.reserve) }
}

/// Push as many characters as fit, dropping the rest.
pub(crate) fn push_truncated(
    target: &mut LabelText,
    text: &str,
) {
    for c in text.chars() {
        if target.push(c).is_err() {
            break;
        }
    }
}

/// `fmt::Write` adapter that silently stops at capacity.
///
/// heapless' own `write_str` rejects a whole chunk that does not fit, which
/// would drop the end of a number instead of the overflow.
pub(crate) struct Truncating<'a>(pub(crate) &'a mut LabelText);

impl Write for Truncating<'_> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        push_truncated(self.0, s);
        Ok(())
    }
}

/// Estimate the box a string needs at a given font size.
///
/// Uses a 0.6 em advance and 1.2 em line height, which covers the common
/// sans-serif faces the panels ship with.
pub fn estimate_reserve(
    template: &str,
    size: u32,
) -> Size {
    let lines = template.lines().count().max(1) as u32;
    let columns = template.lines().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
    let advance = (size * 3).div_ceil(5);
    let line_height = (size * 6).div_ceil(5);
    Size::new(columns * advance, lines * line_height)
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Pre-computed text styles and font lookup for the simulated panel.
//!
//! The widget model asks for text by nominal pixel size and a font file.
//! The simulated panel has no TrueType rasterizer, so sizes map onto the
//! closest ProFont bitmap face. Alignment styles are `const` and shared by
//! every draw call.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::{
    PROFONT_7_POINT,
    PROFONT_9_POINT,
    PROFONT_10_POINT,
    PROFONT_12_POINT,
    PROFONT_14_POINT,
    PROFONT_18_POINT,
    PROFONT_24_POINT,
};

// =============================================================================
// Text Alignment Styles (const - zero runtime cost)
// =============================================================================

/// Anchor at the top-left corner. Used for labels and captions.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Anchor at the center. Used for gauge labels.
pub const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

// =============================================================================
// Font Lookup
// =============================================================================

/// Faces ordered by glyph height, paired with the largest nominal size
/// each one serves.
const FACES: [(u32, &MonoFont<'static>); 7] = [
    (9, &PROFONT_7_POINT),
    (11, &PROFONT_9_POINT),
    (12, &PROFONT_10_POINT),
    (15, &PROFONT_12_POINT),
    (18, &PROFONT_14_POINT),
    (22, &PROFONT_18_POINT),
    (u32::MAX, &PROFONT_24_POINT),
];

/// ProFont face closest to a nominal pixel size.
pub fn font_for_size(size: u32) -> &'static MonoFont<'static> {
    let (_, font) = FACES.iter().find(|(max, _)| size <= *max).unwrap_or(&FACES[FACES.len() - 1]);
    font
}

// =============================================================================
// Unit Tests
// =============================================================================

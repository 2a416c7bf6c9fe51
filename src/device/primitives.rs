//! Low-level drawing primitives for the simulated panel.
//!
//! These are intentionally simple and focused on a single responsibility.
//! Draw results are discarded with `.ok()`: the simulator framebuffer is
//! infallible and silently clips out-of-bounds pixels.
//!
//! # Image Alpha
//!
//! [`blit_rgba`] treats alpha as a mask (opaque at 50% and above) instead of
//! blending. Static images are redrawn every tick on top of themselves, and
//! blending would darken soft edges a little more each frame.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Arc,
    PrimitiveStyle,
    PrimitiveStyleBuilder,
    Rectangle,
    RoundedRectangle,
    StrokeAlignment,
};
use embedded_graphics::text::{Text, TextStyle};
use embedded_graphics_simulator::SimulatorDisplay;
use image::RgbaImage;

use crate::widgets::dot_box;

/// Alpha at or above which an image pixel is drawn.
const ALPHA_THRESHOLD: u8 = 128;

/// Fill a rectangle with a solid color.
pub fn fill_rect(
    display: &mut SimulatorDisplay<Rgb565>,
    area: Rectangle,
    color: Rgb888,
) {
    area.into_styled(PrimitiveStyle::with_fill(Rgb565::from(color)))
        .draw(display)
        .ok();
}

/// Copy `source` (in image coordinates) from `image` to `dest` on screen.
///
/// Parts of `source` outside the image are skipped.
pub fn blit_rgba(
    display: &mut SimulatorDisplay<Rgb565>,
    image: &RgbaImage,
    source: Rectangle,
    dest: Point,
) {
    let image_bounds = Rectangle::new(Point::zero(), Size::new(image.width(), image.height()));
    let source = image_bounds.intersection(&source);
    let offset = dest - source.top_left;

    let pixels = source.points().filter_map(|p| {
        // Points come from the clipped rectangle, so they are non-negative and in range
        let rgba = image.get_pixel(p.x as u32, p.y as u32).0;
        (rgba[3] >= ALPHA_THRESHOLD).then(|| Pixel(p + offset, Rgb565::from(Rgb888::new(rgba[0], rgba[1], rgba[2]))))
    });
    display.draw_iter(pixels).ok();
}

/// Stroke one arc of a ring. The stroke grows inward from `radius`.
///
/// Angles are in degrees, 0° at 3 o'clock, clockwise. Zero sweeps draw
/// nothing.
pub fn draw_ring_segment(
    display: &mut SimulatorDisplay<Rgb565>,
    center: Point,
    radius: u32,
    thickness: u32,
    start: f32,
    sweep: f32,
    color: Rgb888,
) {
    if sweep <= 0.0 || radius == 0 || thickness == 0 {
        return;
    }
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(Rgb565::from(color))
        .stroke_width(thickness)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();
    Arc::with_center(center, radius * 2, start.deg(), sweep.deg())
        .into_styled(style)
        .draw(display)
        .ok();
}

/// Filled rounded box. A radius of half the side gives a circle.
pub fn fill_dot(
    display: &mut SimulatorDisplay<Rgb565>,
    center: Point,
    size: Size,
    radius: u32,
    color: Rgb888,
) {
    RoundedRectangle::with_equal_corners(dot_box(center, size), Size::new_equal(radius))
        .into_styled(PrimitiveStyle::with_fill(Rgb565::from(color)))
        .draw(display)
        .ok();
}

/// Draw text with a ProFont face. `\n` starts a new line.
pub fn draw_label(
    display: &mut SimulatorDisplay<Rgb565>,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    color: Rgb888,
    alignment: TextStyle,
) {
    let character_style = MonoTextStyle::new(font, Rgb565::from(color));
    Text::with_text_style(text, position, character_style, alignment)
        .draw(display)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::Rgb565;

    use super::super::styles::TOP_LEFT;
    use super::*;
    use crate::colors::WHITE;

    fn display() -> SimulatorDisplay<Rgb565> { SimulatorDisplay::new(Size::new(64, 64)) }

    #[test]
    fn test_fill_rect() {
        let mut d = display();
        fill_rect(&mut d, Rectangle::new(Point::new(4, 4), Size::new(4, 4)), WHITE);
        assert_eq!(d.get_pixel(Point::new(5, 5)), Rgb565::WHITE);
        assert_eq!(d.get_pixel(Point::new(9, 9)), Rgb565::BLACK, "Outside the rect stays untouched");
    }

    #[test]
    fn test_blit_alpha_mask() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, image::Rgba([255, 255, 255, 255]));
        image.put_pixel(1, 0, image::Rgba([255, 255, 255, 10]));
        let mut d = display();
        blit_rgba(&mut d, &image, Rectangle::new(Point::zero(), Size::new(2, 1)), Point::new(10, 10));
        assert_eq!(d.get_pixel(Point::new(10, 10)), Rgb565::WHITE, "Opaque pixel drawn");
        assert_eq!(d.get_pixel(Point::new(11, 10)), Rgb565::BLACK, "Transparent pixel skipped");
    }

    #[test]
    fn test_blit_source_clipped_to_image() {
        let image = RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 255]));
        let mut d = display();
        blit_rgba(&mut d, &image, Rectangle::new(Point::new(2, 2), Size::new(10, 10)), Point::new(20, 20));
        assert_eq!(d.get_pixel(Point::new(21, 21)), Rgb565::WHITE);
        assert_eq!(d.get_pixel(Point::new(23, 23)), Rgb565::BLACK, "Nothing past the image edge");
    }

    #[test]
    fn test_dot_fills_center() {
        let mut d = display();
        fill_dot(&mut d, Point::new(32, 32), Size::new(30, 30), 15, WHITE);
        assert_eq!(d.get_pixel(Point::new(32, 32)), Rgb565::WHITE);
        assert_eq!(d.get_pixel(Point::new(18, 18)), Rgb565::BLACK, "Rounded corner left empty");
    }

    #[test]
    fn test_even_dot_box_position() {
        let mut d = display();
        fill_dot(&mut d, Point::new(20, 20), Size::new(10, 10), 0, WHITE);
        assert_eq!(d.get_pixel(Point::new(15, 20)), Rgb565::WHITE, "Left edge at center - size/2");
        assert_eq!(d.get_pixel(Point::new(24, 20)), Rgb565::WHITE, "Right edge inside the box");
        assert_eq!(d.get_pixel(Point::new(25, 20)), Rgb565::BLACK, "No pixel past the box");
    }

    #[test]
    fn test_zero_sweep_draws_nothing() {
        let mut d = display();
        draw_ring_segment(&mut d, Point::new(32, 32), 20, 4, 90.0, 0.0, WHITE);
        assert!(d.bounding_box().points().all(|p| d.get_pixel(p) == Rgb565::BLACK));
    }

    #[test]
    fn test_label_draws_pixels() {
        let mut d = display();
        draw_label(&mut d, "8", Point::new(2, 2), &profont::PROFONT_12_POINT, WHITE, TOP_LEFT);
        assert!(d.bounding_box().points().any(|p| d.get_pixel(p) == Rgb565::WHITE), "Glyph should set pixels");
    }
}

//! Off-screen LCD that renders draw commands into a framebuffer.
//!
//! Behaves like a small serial panel: it starts in portrait, swaps its
//! resolution when set to a landscape orientation, and keeps no notion of
//! layers. After each frame [`present`](DeviceChannel::present) writes the
//! framebuffer to a PNG screen capture when one is configured.
//!
//! # Image Cache
//!
//! Decoded images are cached by path and target size. A file that fails to
//! decode is reported once through the draw call's error and then skipped
//! quietly, so a missing logo does not flood the log every tick. Backdrops
//! whose background is missing fall back to a black fill.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{OutputSettings, SimulatorDisplay};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::{debug, warn};

use super::primitives::{blit_rgba, draw_label, draw_ring_segment, fill_dot, fill_rect};
use super::styles::{CENTERED, TOP_LEFT, font_for_size};
use super::{DeviceChannel, DeviceError, Orientation};
use crate::colors::BLACK;
use crate::compositor::{ArcCommand, BitmapCommand, StatusCommand, TextCommand};
use crate::frame::Backdrop;

type ImageKey = (PathBuf, Option<(u32, u32)>);

/// Simulated panel backed by an embedded-graphics framebuffer.
pub struct SimulatedLcd {
    display: SimulatorDisplay<Rgb565>,
    /// Resolution in portrait orientation.
    portrait: Size,
    orientation: Orientation,
    brightness: u8,
    screencap: Option<PathBuf>,
    /// `None` marks a file that already failed to load.
    images: HashMap<ImageKey, Option<Arc<RgbaImage>>>,
    closed: bool,
}

impl SimulatedLcd {
    /// Panel with the given portrait resolution, no screen capture.
    pub fn new(portrait: Size) -> Self {
        Self {
            display: SimulatorDisplay::new(portrait),
            portrait,
            orientation: Orientation::Portrait,
            brightness: 0,
            screencap: None,
            images: HashMap::new(),
            closed: false,
        }
    }

    /// Write a PNG of the framebuffer to `path` after every frame.
    #[must_use]
    pub fn with_screencap(
        mut self,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.screencap = Some(path.into());
        self
    }

    /// Current framebuffer contents.
    #[inline]
    pub fn framebuffer(&self) -> &SimulatorDisplay<Rgb565> { &self.display }

    #[inline]
    pub const fn is_closed(&self) -> bool { self.closed }

    fn ensure_open(&self) -> Result<(), DeviceError> { if self.closed { Err(DeviceError::Closed) } else { Ok(()) } }

    /// Decoded image at `size`, from cache when possible.
    fn image(
        &mut self,
        path: &Path,
        size: Option<Size>,
    ) -> Result<Option<Arc<RgbaImage>>, DeviceError> {
        let key = (path.to_path_buf(), size.map(|s| (s.width, s.height)));
        if let Some(cached) = self.images.get(&key) {
            return Ok(cached.clone());
        }

        let decoded = match image::open(path) {
            Ok(image) => image.to_rgba8(),
            Err(source) => {
                self.images.insert(key, None);
                return Err(DeviceError::Image {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let scaled = match size {
            Some(s) if (s.width, s.height) != decoded.dimensions() => {
                imageops::resize(&decoded, s.width, s.height, FilterType::Triangle)
            }
            _ => decoded,
        };
        debug!(path = %path.display(), width = scaled.width(), height = scaled.height(), "image decoded");

        let image = Arc::new(scaled);
        self.images.insert(key, Some(Arc::clone(&image)));
        Ok(Some(image))
    }

    /// Repaint the background under a widget before drawing it.
    fn paint_backdrop(
        &mut self,
        backdrop: Option<&Backdrop>,
    ) {
        let Some(backdrop) = backdrop else {
            return;
        };
        let screen = self.size();
        match self.image(&backdrop.image, Some(screen)) {
            Ok(Some(image)) => blit_rgba(&mut self.display, &image, backdrop.region, backdrop.region.top_left),
            Ok(None) => fill_rect(&mut self.display, backdrop.region, BLACK),
            Err(e) => {
                warn!(error = %e, "backdrop unavailable, filling black");
                fill_rect(&mut self.display, backdrop.region, BLACK);
            }
        }
    }
}

impl DeviceChannel for SimulatedLcd {
    fn name(&self) -> &str { "simulated" }

    fn reset(&mut self) -> Result<(), DeviceError> {
        self.ensure_open()?;
        self.display.clear(Rgb565::BLACK).ok();
        Ok(())
    }

    fn initialize(&mut self) -> Result<(), DeviceError> {
        self.ensure_open()?;
        debug!(width = self.portrait.width, height = self.portrait.height, "simulated panel initialized");
        Ok(())
    }

    fn set_brightness(
        &mut self,
        level: u8,
    ) -> Result<(), DeviceError> {
        self.ensure_open()?;
        self.brightness = level.min(100);
        Ok(())
    }

    fn set_orientation(
        &mut self,
        orientation: Orientation,
    ) -> Result<(), DeviceError> {
        self.ensure_open()?;
        self.orientation = orientation;
        self.display = SimulatorDisplay::new(self.size());
        Ok(())
    }

    fn size(&self) -> Size {
        if self.orientation.is_landscape() {
            Size::new(self.portrait.height, self.portrait.width)
        } else {
            self.portrait
        }
    }

    fn draw_bitmap(
        &mut self,
        command: &BitmapCommand,
    ) -> Result<(), DeviceError> {
        self.ensure_open()?;
        if let Some(image) = self.image(&command.image, command.size)? {
            let source = Rectangle::new(Point::zero(), Size::new(image.width(), image.height()));
            blit_rgba(&mut self.display, &image, source, command.position);
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        command: &TextCommand,
    ) -> Result<(), DeviceError> {
        self.ensure_open()?;
        self.paint_backdrop(command.backdrop.as_ref());
        let font = font_for_size(command.style.size);
        draw_label(&mut self.display, &command.text, command.position, font, command.style.color, TOP_LEFT);
        Ok(())
    }

    fn draw_arc(
        &mut self,
        command: &ArcCommand,
    ) -> Result<(), DeviceError> {
        self.ensure_open()?;
        self.paint_backdrop(command.backdrop.as_ref());
        draw_ring_segment(
            &mut self.display,
            command.center,
            command.radius,
            command.thickness,
            command.start,
            command.end - command.start,
            command.color,
        );
        if let Some(label) = &command.label {
            let font = font_for_size(label.style.size);
            draw_label(&mut self.display, &label.text, command.center, font, label.style.color, CENTERED);
        }
        Ok(())
    }

    fn draw_status_dot(
        &mut self,
        command: &StatusCommand,
    ) -> Result<(), DeviceError> {
        self.ensure_open()?;
        self.paint_backdrop(command.backdrop.as_ref());
        fill_dot(&mut self.display, command.center, command.size, command.radius, command.color);
        Ok(())
    }

    fn present(&mut self) -> Result<(), DeviceError> {
        self.ensure_open()?;
        let Some(path) = &self.screencap else {
            return Ok(());
        };
        self.display
            .to_rgb_output_image(&OutputSettings::default())
            .save_png(path)
            .map_err(|e| DeviceError::Capture(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), brightness = self.brightness, "screen capture written");
        Ok(())
    }

    fn close(&mut self) -> Result<(), DeviceError> {
        self.ensure_open()?;
        self.closed = true;
        debug!("simulated panel closed");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::Rgb888;

    use super::*;
    use crate::colors::WHITE;
    use crate::compositor::DrawCommand;
    use crate::frame::Background;
    use crate::widgets::{Direction, LabelStyle, LabelText, dot_box};

    const RED: Rgb888 = Rgb888::new(200, 0, 0);

    /// Landscape panel plus a solid red background file of matching size.
    fn panel_with_background() -> (SimulatedLcd, Background, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("temp dir");
        let background = Background::for_display(dir.path(), "solid", Size::new(480, 320));
        RgbaImage::from_pixel(480, 320, image::Rgba([200, 0, 0, 255]))
            .save(&*background.image)
            .expect("write background");
        let mut lcd = SimulatedLcd::new(Size::new(320, 480));
        lcd.set_orientation(Orientation::ReverseLandscape).expect("orientation");
        (lcd, background, dir)
    }

    fn arc(
        end: f32,
        backdrop: Option<Backdrop>,
    ) -> ArcCommand {
        ArcCommand {
            center: Point::new(155, 105),
            radius: 40,
            thickness: 8,
            start: 0.0,
            end,
            color: WHITE,
            direction: Direction::Clockwise,
            backdrop,
            label: None,
        }
    }

    #[test]
    fn test_landscape_swaps_size() {
        let mut lcd = SimulatedLcd::new(Size::new(320, 480));
        assert_eq!(lcd.size(), Size::new(320, 480), "Panels power on in portrait");
        lcd.set_orientation(Orientation::Landscape).expect("orientation");
        assert_eq!(lcd.size(), Size::new(480, 320));
        assert_eq!(lcd.framebuffer().size(), Size::new(480, 320), "Framebuffer follows orientation");
    }

    #[test]
    fn test_brightness_capped() {
        let mut lcd = SimulatedLcd::new(Size::new(320, 480));
        lcd.set_brightness(250).expect("brightness");
        assert_eq!(lcd.brightness, 100, "Brightness is a percentage");
    }

    #[test]
    fn test_full_background_blit() {
        let (mut lcd, background, _dir) = panel_with_background();
        let command = BitmapCommand {
            image: background.image.clone(),
            position: Point::zero(),
            size: Some(background.size),
        };
        lcd.draw_bitmap(&command).expect("blit");
        assert_eq!(lcd.framebuffer().get_pixel(Point::new(479, 319)), Rgb565::from(RED));
    }

    #[test]
    fn test_backdrop_clears_stale_fill() {
        let (mut lcd, background, _dir) = panel_with_background();
        let full = arc(360.0, background.backdrop(Rectangle::with_center(Point::new(155, 105), Size::new_equal(82))));
        lcd.draw_arc(&full).expect("draw full arc");

        // Inside the 8px stroke, straight above the center
        let on_ring = Point::new(155, 105 - 36);
        assert_eq!(lcd.framebuffer().get_pixel(on_ring), Rgb565::WHITE, "Full ring covers the top");

        let empty = arc(0.0, full.backdrop.clone());
        lcd.draw_arc(&empty).expect("draw empty arc");
        assert_eq!(lcd.framebuffer().get_pixel(on_ring), Rgb565::from(RED), "Old fill must not survive");
    }

    #[test]
    fn test_text_draws_over_backdrop() {
        let (mut lcd, background, _dir) = panel_with_background();
        let mut text = LabelText::new();
        text.push_str("88%").expect("fits");
        let command = TextCommand {
            text,
            position: Point::new(21, 30),
            style: LabelStyle::new(Arc::from(Path::new("font.ttf")), 20, WHITE),
            backdrop: background.backdrop(Rectangle::new(Point::new(21, 30), Size::new(60, 24))),
        };
        lcd.draw_text(&command).expect("draw text");
        let region = Rectangle::new(Point::new(21, 30), Size::new(60, 24));
        let fb = lcd.framebuffer();
        assert!(region.points().any(|p| fb.get_pixel(p) == Rgb565::WHITE), "Glyphs drawn");
        assert!(region.points().any(|p| fb.get_pixel(p) == Rgb565::from(RED)), "Backdrop around glyphs");
    }

    #[test]
    fn test_missing_image_reported_once() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut lcd = SimulatedLcd::new(Size::new(320, 480));
        let command = DrawCommand::Bitmap(BitmapCommand {
            image: Arc::from(dir.path().join("missing.png").as_path()),
            position: Point::new(60, 245),
            size: Some(Size::new(50, 50)),
        });
        assert!(matches!(command.send_to(&mut lcd), Err(DeviceError::Image { .. })), "First failure reported");
        assert!(command.send_to(&mut lcd).is_ok(), "Known-missing image is skipped quietly");
    }

    #[test]
    fn test_missing_backdrop_fills_black() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut lcd = SimulatedLcd::new(Size::new(320, 480));
        let background = Background::new(dir.path().join("missing.png"), Size::new(320, 480));
        let command = StatusCommand {
            center: Point::new(36, 270),
            size: Size::new(30, 30),
            radius: 15,
            on: true,
            color: WHITE,
            backdrop: background.backdrop(dot_box(Point::new(36, 270), Size::new(30, 30))),
        };
        assert!(lcd.draw_status_dot(&command).is_ok(), "Missing backdrop is not a draw failure");
        assert_eq!(lcd.framebuffer().get_pixel(Point::new(36, 270)), Rgb565::WHITE);
    }

    #[test]
    fn test_present_writes_screencap() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("screencap.png");
        let mut lcd = SimulatedLcd::new(Size::new(32, 48)).with_screencap(&path);
        lcd.present().expect("present");
        let saved = image::open(&path).expect("capture readable");
        assert_eq!((saved.width(), saved.height()), (32, 48));
    }

    #[test]
    fn test_closed_panel_rejects_calls() {
        let mut lcd = SimulatedLcd::new(Size::new(32, 48));
        lcd.close().expect("close");
        assert!(lcd.is_closed());
        assert!(matches!(lcd.reset(), Err(DeviceError::Closed)));
        assert!(matches!(lcd.close(), Err(DeviceError::Closed)), "Double close is an error");
    }
}

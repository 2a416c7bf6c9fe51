//! Display channel boundary.
//!
//! [`DeviceChannel`] is the only way the core talks to a panel. Every call
//! is an independent write; the core never reads pixels back. Lifecycle
//! calls (`reset`, `initialize`, `set_brightness`, `set_orientation`,
//! `close`) happen at most once per run. Draw calls are fire-and-forget
//! apart from their `Result`.
//!
//! The crate ships one channel, [`SimulatedLcd`], which rasterizes into an
//! off-screen framebuffer and writes a PNG capture after each frame.
//! Hardware channels implement the same trait.

mod primitives;
mod simulated;
mod styles;

use std::path::PathBuf;

use embedded_graphics::prelude::Size;
use serde::Deserialize;
pub use simulated::SimulatedLcd;
pub use styles::font_for_size;
use tracing::{info, warn};

use crate::compositor::{ArcCommand, BitmapCommand, DrawCommand, StatusCommand, TextCommand};

/// Panel orientation. Panels power on in portrait.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
    ReversePortrait,
    ReverseLandscape,
}

impl Orientation {
    /// Landscape orientations swap the portrait width and height.
    #[inline]
    pub const fn is_landscape(self) -> bool { matches!(self, Self::Landscape | Self::ReverseLandscape) }
}

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("cannot load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("screen capture failed: {0}")]
    Capture(String),

    #[error("device channel is closed")]
    Closed,
}

/// Command surface of a display panel.
pub trait DeviceChannel {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Reset the panel to a known state. Clears the screen.
    fn reset(&mut self) -> Result<(), DeviceError>;

    fn initialize(&mut self) -> Result<(), DeviceError>;

    /// Backlight level, 0–100.
    fn set_brightness(
        &mut self,
        level: u8,
    ) -> Result<(), DeviceError>;

    fn set_orientation(
        &mut self,
        orientation: Orientation,
    ) -> Result<(), DeviceError>;

    /// Resolution after orientation is applied.
    fn size(&self) -> Size;

    fn draw_bitmap(
        &mut self,
        command: &BitmapCommand,
    ) -> Result<(), DeviceError>;

    fn draw_text(
        &mut self,
        command: &TextCommand,
    ) -> Result<(), DeviceError>;

    fn draw_arc(
        &mut self,
        command: &ArcCommand,
    ) -> Result<(), DeviceError>;

    fn draw_status_dot(
        &mut self,
        command: &StatusCommand,
    ) -> Result<(), DeviceError>;

    /// End of frame. Channels that buffer flush here.
    fn present(&mut self) -> Result<(), DeviceError> { Ok(()) }

    /// Release the channel. No calls are valid afterwards.
    fn close(&mut self) -> Result<(), DeviceError>;
}

impl<D: DeviceChannel + ?Sized> DeviceChannel for &mut D {
    fn name(&self) -> &str { (**self).name() }

    fn reset(&mut self) -> Result<(), DeviceError> { (**self).reset() }

    fn initialize(&mut self) -> Result<(), DeviceError> { (**self).initialize() }

    fn set_brightness(
        &mut self,
        level: u8,
    ) -> Result<(), DeviceError> {
        (**self).set_brightness(level)
    }

    fn set_orientation(
        &mut self,
        orientation: Orientation,
    ) -> Result<(), DeviceError> {
        (**self).set_orientation(orientation)
    }

    fn size(&self) -> Size { (**self).size() }

    fn draw_bitmap(
        &mut self,
        command: &BitmapCommand,
    ) -> Result<(), DeviceError> {
        (**self).draw_bitmap(command)
    }

    fn draw_text(
        &mut self,
        command: &TextCommand,
    ) -> Result<(), DeviceError> {
        (**self).draw_text(command)
    }

    fn draw_arc(
        &mut self,
        command: &ArcCommand,
    ) -> Result<(), DeviceError> {
        (**self).draw_arc(command)
    }

    fn draw_status_dot(
        &mut self,
        command: &StatusCommand,
    ) -> Result<(), DeviceError> {
        (**self).draw_status_dot(command)
    }

    fn present(&mut self) -> Result<(), DeviceError> { (**self).present() }

    fn close(&mut self) -> Result<(), DeviceError> { (**self).close() }
}

impl DrawCommand {
    /// Dispatch to the matching channel method.
    pub fn send_to<D: DeviceChannel + ?Sized>(
        &self,
        device: &mut D,
    ) -> Result<(), DeviceError> {
        match self {
            Self::Bitmap(command) => device.draw_bitmap(command),
            Self::Text(command) => device.draw_text(command),
            Self::Arc(command) => device.draw_arc(command),
            Self::StatusDot(command) => device.draw_status_dot(command),
        }
    }

    /// Short name for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bitmap(_) => "bitmap",
            Self::Text(_) => "text",
            Self::Arc(_) => "arc",
            Self::StatusDot(_) => "status_dot",
        }
    }
}

/// Startup sequence: reset, initialize, brightness, orientation.
///
/// A failing step is logged and the remaining steps still run, so a panel
/// that rejects one setting still comes up.
pub fn power_on<D: DeviceChannel + ?Sized>(
    device: &mut D,
    brightness: u8,
    orientation: Orientation,
) {
    let steps: [(&str, Result<(), DeviceError>); 4] = [
        ("reset", device.reset()),
        ("initialize", device.initialize()),
        ("set_brightness", device.set_brightness(brightness)),
        ("set_orientation", device.set_orientation(orientation)),
    ];
    for (step, result) in steps {
        if let Err(e) = result {
            warn!(device = device.name(), step, error = %e, "device startup step failed");
        }
    }
    let size = device.size();
    info!(device = device.name(), width = size.width, height = size.height, ?orientation, "device ready");
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Channel that records every call, for loop and dispatch tests.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingDevice {
        pub calls: Vec<String>,
        pub commands: Vec<DrawCommand>,
        pub fail_kind: Option<&'static str>,
        pub closes: usize,
        pub presents: usize,
    }

    impl RecordingDevice {
        fn record(
            &mut self,
            command: DrawCommand,
        ) -> Result<(), DeviceError> {
            if self.closes > 0 {
                return Err(DeviceError::Closed);
            }
            let kind = command.kind();
            self.calls.push(kind.to_string());
            self.commands.push(command);
            if self.fail_kind == Some(kind) {
                return Err(DeviceError::Capture(format!("{kind} rejected")));
            }
            Ok(())
        }
    }

    impl DeviceChannel for RecordingDevice {
        fn name(&self) -> &str { "recording" }

        fn reset(&mut self) -> Result<(), DeviceError> {
            self.calls.push("reset".into());
            Ok(())
        }

        fn initialize(&mut self) -> Result<(), DeviceError> {
            self.calls.push("initialize".into());
            Ok(())
        }

        fn set_brightness(
            &mut self,
            level: u8,
        ) -> Result<(), DeviceError> {
            self.calls.push(format!("brightness {level}"));
            if level > 100 {
                return Err(DeviceError::Capture("out of range".into()));
            }
            Ok(())
        }

        fn set_orientation(
            &mut self,
            orientation: Orientation,
        ) -> Result<(), DeviceError> {
            self.calls.push(format!("orientation {orientation:?}"));
            Ok(())
        }

        fn size(&self) -> Size { Size::new(480, 320) }

        fn draw_bitmap(
            &mut self,
            command: &BitmapCommand,
        ) -> Result<(), DeviceError> {
            self.record(DrawCommand::Bitmap(command.clone()))
        }

        fn draw_text(
            &mut self,
            command: &TextCommand,
        ) -> Result<(), DeviceError> {
            self.record(DrawCommand::Text(command.clone()))
        }

        fn draw_arc(
            &mut self,
            command: &ArcCommand,
        ) -> Result<(), DeviceError> {
            self.record(DrawCommand::Arc(command.clone()))
        }

        fn draw_status_dot(
            &mut self,
            command: &StatusCommand,
        ) -> Result<(), DeviceError> {
            self.record(DrawCommand::StatusDot(command.clone()))
        }

        fn present(&mut self) -> Result<(), DeviceError> {
            self.presents += 1;
            self.calls.push("present".into());
            Ok(())
        }

        fn close(&mut self) -> Result<(), DeviceError> {
            self.closes += 1;
            self.calls.push("close".into());
            Ok(())
        }
    }

    #[test]
    fn test_power_on_sequence() {
        let mut device = RecordingDevice::default();
        power_on(&mut device, 10, Orientation::ReverseLandscape);
        assert_eq!(device.calls, ["reset", "initialize", "brightness 10", "orientation ReverseLandscape"]);
    }

    #[test]
    fn test_power_on_continues_after_failure() {
        let mut device = RecordingDevice::default();
        power_on(&mut device, 200, Orientation::Portrait);
        assert_eq!(device.calls.last().map(String::as_str), Some("orientation Portrait"), "Later steps still run");
    }

    #[test]
    fn test_send_to_dispatches_by_kind() {
        let mut device = RecordingDevice::default();
        let command = DrawCommand::StatusDot(StatusCommand {
            center: embedded_graphics::prelude::Point::new(36, 270),
            size: Size::new(30, 30),
            radius: 15,
            on: true,
            color: crate::colors::STATUS_ON,
            backdrop: None,
        });
        command.send_to(&mut device).expect("draw");
        assert_eq!(device.calls, ["status_dot"]);
        assert_eq!(device.commands, [command]);
    }

    #[test]
    fn test_orientation_landscape() {
        assert!(Orientation::ReverseLandscape.is_landscape());
        assert!(!Orientation::ReversePortrait.is_landscape());
    }
}

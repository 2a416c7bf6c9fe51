//! Frame compositor: widget set in, ordered draw commands out.
//!
//! The display channel is a stateless stream of independent writes with no
//! framebuffer the core can read back. Patching only what changed would
//! leave stale pixels behind whenever a value shrinks (a gauge dropping from
//! 80% to 20% keeps its old fill). Every widget is therefore redrawn on every
//! tick, and each command carries the background region under the widget as
//! its [`Backdrop`] so the channel can repaint it first.
//!
//! # Order
//!
//! | Step | Emitted | When |
//! |------|---------|------|
//! | 1 | Background bitmap | [`Refresh::Full`] only |
//! | 2 | Static images | Every frame |
//! | 3 | Text labels | Every frame |
//! | 4 | Gauge arcs (track, then fill) | Every frame |
//! | 5 | Status indicator | Every frame |
//!
//! Widgets of the same kind keep their insertion order. Later commands
//! occlude earlier ones at the same coordinates.
//!
//! [`render`] is pure: the same frame and refresh mode always produce the
//! same command list.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::frame::{Backdrop, DashboardFrame};
use crate::geometry::compute_arc;
use crate::widgets::{Direction, GaugeLabel, ImageRef, LabelStyle, LabelText, RadialGauge, Widget};

/// Whether the full background is blitted before the widgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
    /// Widgets only, each over its own backdrop.
    Partial,
    /// Background first, then widgets.
    Full,
}

/// Full-image blit, scaled to `size` when given.
#[derive(Clone, Debug, PartialEq)]
pub struct BitmapCommand {
    pub image: ImageRef,
    pub position: Point,
    pub size: Option<Size>,
}

/// Text anchored at its top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct TextCommand {
    pub text: LabelText,
    pub position: Point,
    pub style: LabelStyle,
    pub backdrop: Option<Backdrop>,
}

/// One gauge sub-arc.
///
/// `start < end` always; the channel sweeps clockwise from `start`.
/// `direction` is the gauge's fill direction, for channels that orient
/// their strokes by it.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcCommand {
    pub center: Point,
    pub radius: u32,
    pub thickness: u32,
    pub start: f32,
    pub end: f32,
    pub color: Rgb888,
    pub direction: Direction,
    pub backdrop: Option<Backdrop>,
    pub label: Option<GaugeLabel>,
}

/// Filled status dot inside a `size` box.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusCommand {
    pub center: Point,
    pub size: Size,
    pub radius: u32,
    pub on: bool,
    pub color: Rgb888,
    pub backdrop: Option<Backdrop>,
}

/// A single call on the display channel.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Bitmap(BitmapCommand),
    Text(TextCommand),
    Arc(ArcCommand),
    StatusDot(StatusCommand),
}

/// Compose the frame into draw commands.
pub fn render(
    frame: &DashboardFrame,
    refresh: Refresh,
) -> Vec<DrawCommand> {
    let background = frame.background();
    let mut commands = Vec::with_capacity(frame.widgets().len() * 2 + 1);

    if refresh == Refresh::Full {
        commands.push(DrawCommand::Bitmap(BitmapCommand {
            image: background.image.clone(),
            position: Point::zero(),
            size: Some(background.size),
        }));
    }

    let mut ordered: Vec<&Widget> = frame.widgets().iter().collect();
    // Stable sort keeps insertion order within a layer
    ordered.sort_by_key(|widget| widget.layer());

    for widget in ordered {
        let backdrop = widget.bounds().and_then(|region| background.backdrop(region));
        match widget {
            Widget::Image(image) => commands.push(DrawCommand::Bitmap(BitmapCommand {
                image: image.image.clone(),
                position: image.position,
                size: image.size,
            })),
            Widget::Text(label) => {
                let mut text = LabelText::new();
                // Same capacity on both sides, cannot overflow
                let _ = text.push_str(label.text());
                commands.push(DrawCommand::Text(TextCommand {
                    text,
                    position: label.position,
                    style: label.style.clone(),
                    backdrop,
                }));
            }
            Widget::Gauge(gauge) => push_gauge(&mut commands, gauge, backdrop),
            Widget::Status(dot) => commands.push(DrawCommand::StatusDot(StatusCommand {
                center: dot.center,
                size: dot.size,
                radius: dot.radius,
                on: dot.on,
                color: dot.color(),
                backdrop,
            })),
        }
    }

    commands
}

/// Track arcs, then fill arcs.
///
/// The first arc carries the backdrop so the whole ring area is repainted
/// once before any stroke. The label rides on the last arc so it is drawn
/// over the fill. A gauge with nothing to stroke still emits one zero-sweep
/// arc to carry both.
fn push_gauge(
    commands: &mut Vec<DrawCommand>,
    gauge: &RadialGauge,
    backdrop: Option<Backdrop>,
) {
    let spec = compute_arc(gauge);
    let arc = |start: f32, end: f32, color: Rgb888| ArcCommand {
        center: gauge.center,
        radius: gauge.radius,
        thickness: gauge.thickness,
        start,
        end,
        color,
        direction: gauge.direction,
        backdrop: None,
        label: None,
    };

    let mut arcs: Vec<ArcCommand> = spec
        .track
        .iter()
        .map(|s| arc(s.start, s.end, gauge.track_color))
        .chain(spec.fill.iter().map(|s| arc(s.start, s.end, gauge.bar_color)))
        .collect();

    if arcs.is_empty() {
        arcs.push(arc(gauge.angle_start, gauge.angle_start, gauge.track_color));
    }
    if let Some(first) = arcs.first_mut() {
        first.backdrop = backdrop;
    }
    if let Some(last) = arcs.last_mut() {
        last.label = spec.label;
    }

    commands.extend(arcs.into_iter().map(DrawCommand::Arc));
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Default dashboard: widget layout and the snapshot → widget bindings.
//!
//! [`Dashboard::build`] places every widget once using the constants in
//! [`config::layout`](crate::config::layout). [`Dashboard::apply`] is the
//! only place sensor values turn into widget values; it never touches
//! positions or styles.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDateTime;
use embedded_graphics::prelude::*;

use crate::colors::WHITE;
use crate::config::layout::*;
use crate::frame::{Background, DashboardFrame, WidgetId};
use crate::sensors::SensorSnapshot;
use crate::widgets::{Direction, FontRef, LabelStyle, RadialGauge, StaticImage, StatusIndicator, TextLabel, estimate_reserve};

/// Handles of the widgets that change every tick.
#[derive(Clone, Copy, Debug)]
struct Bindings {
    clock: WidgetId,
    ip: WidgetId,
    cpu: WidgetId,
    temperature: WidgetId,
    memory: WidgetId,
    service: WidgetId,
}

/// The telemetry frame plus its value bindings.
#[derive(Debug)]
pub struct Dashboard {
    frame: DashboardFrame,
    bindings: Bindings,
}

impl Dashboard {
    /// Lay out the stock dashboard with placeholder values.
    pub fn build(
        background: Background,
        font: &Path,
        service_logo: &Path,
    ) -> Self {
        let font: FontRef = Arc::from(font);
        let header = LabelStyle::new(font.clone(), HEADER_FONT_SIZE, WHITE);
        let caption = LabelStyle::new(font, CAPTION_FONT_SIZE, WHITE);
        let mut frame = DashboardFrame::new(background);

        frame.push(StaticImage::new(service_logo, LOGO_POSITION, Some(LOGO_SIZE)));

        let clock = frame.push(
            TextLabel::new(CLOCK_POSITION, estimate_reserve(CLOCK_TEMPLATE, HEADER_FONT_SIZE), header.clone())
                .with_text("--"),
        );
        let ip = frame.push(
            TextLabel::new(IP_POSITION, estimate_reserve(IP_TEMPLATE, HEADER_FONT_SIZE), header)
                .with_text("IP: 0.0.0.0"),
        );
        for (text, position) in [
            (CPU_CAPTION, CPU_CAPTION_POSITION),
            (TEMP_CAPTION, TEMP_CAPTION_POSITION),
            (RAM_CAPTION, RAM_CAPTION_POSITION),
        ] {
            frame.push(TextLabel::new(position, estimate_reserve(text, CAPTION_FONT_SIZE), caption.clone()).with_text(text));
        }

        let gauge = |center: Point, thickness: u32, max: f32, placeholder: &str| {
            RadialGauge::new(center, GAUGE_RADIUS, thickness)
                .with_range(0.0, max)
                .with_sweep(GAUGE_ANGLE_START, GAUGE_ANGLE_END, Direction::Clockwise)
                .with_label(caption.clone(), placeholder)
        };
        let cpu = frame.push(gauge(CPU_GAUGE_CENTER, CPU_GAUGE_THICKNESS, 100.0, "--%"));
        let temperature = frame.push(gauge(TEMP_GAUGE_CENTER, TEMP_GAUGE_THICKNESS, TEMP_GAUGE_MAX, "--°C"));
        let memory = frame.push(gauge(RAM_GAUGE_CENTER, RAM_GAUGE_THICKNESS, 100.0, "--%"));

        let service = frame.push(StatusIndicator::new(STATUS_CENTER, STATUS_DIAMETER));

        Self {
            frame,
            bindings: Bindings {
                clock,
                ip,
                cpu,
                temperature,
                memory,
                service,
            },
        }
    }

    #[inline]
    pub fn frame(&self) -> &DashboardFrame { &self.frame }

    /// Write one snapshot into the widget values.
    pub fn apply(
        &mut self,
        snapshot: &SensorSnapshot,
        now: NaiveDateTime,
    ) {
        let b = self.bindings;
        let frame = &mut self.frame;

        if let Some(label) = frame.text_mut(b.clock) {
            label.set_fmt(format_args!("{}", now.format(CLOCK_FORMAT)));
        }
        if let Some(label) = frame.text_mut(b.ip) {
            match snapshot.local_ip {
                Some(addr) => label.set_fmt(format_args!("IP: {addr}")),
                None => label.set_text("IP: 0.0.0.0"),
            }
        }

        if let Some(gauge) = frame.gauge_mut(b.cpu) {
            gauge.value = snapshot.cpu_percent;
            gauge.set_label_fmt(format_args!("{:.0}%", snapshot.cpu_percent));
        }
        if let Some(gauge) = frame.gauge_mut(b.temperature) {
            match snapshot.cpu_temperature() {
                Some(celsius) => {
                    gauge.value = celsius;
                    gauge.set_label_fmt(format_args!("{celsius:.0}°C"));
                }
                None => {
                    gauge.value = gauge.min;
                    gauge.set_label_fmt(format_args!("--°C"));
                }
            }
        }
        if let Some(gauge) = frame.gauge_mut(b.memory) {
            gauge.value = snapshot.memory_used_percent;
            gauge.set_label_fmt(format_args!("{:.0}%", snapshot.memory_used_percent));
        }

        if let Some(dot) = frame.status_mut(b.service) {
            dot.on = snapshot.service_active;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

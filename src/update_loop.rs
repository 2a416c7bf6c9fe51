//! The update loop: sample, apply, composite, flush, once per interval.
//!
//! # States
//!
//! ```text
//! Initializing ──initialize()──▶ Running ──cancel──▶ Draining ──▶ Closed
//!        └───────────────────drain()──────────────────────┘
//! ```
//!
//! - **Initializing**: the frame holds placeholder values. `initialize`
//!   draws it once with the full background.
//! - **Running**: each `tick` samples the sensors, writes the values into
//!   the dashboard, composites and flushes every command to the device.
//! - **Draining**: one more full frame with the latest values, then the
//!   device is closed. The device is held in an `Option` and taken on close,
//!   so it cannot be closed twice.
//! - **Closed**: every further call returns [`LoopError::Closed`].
//!
//! # Cancellation
//!
//! [`run`](UpdateLoop::run) checks the [`ShutdownToken`] at the top of each
//! iteration. A tick in progress always completes, so shutdown latency is
//! bounded by one tick. Between ticks the loop waits on the token rather
//! than sleeping, so a signal wakes it immediately.
//!
//! # Failures
//!
//! A draw command the device rejects is logged and counted; the remaining
//! commands of the frame are still sent. Sensor failures never reach this
//! module (see [`sensors`](crate::sensors)).

use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::compositor::{DrawCommand, render};
use crate::dashboard::Dashboard;
use crate::device::DeviceChannel;
use crate::profiling::{TickMetrics, TickTiming};
use crate::render::RenderState;
use crate::sensors::SensorSource;
use crate::shutdown::ShutdownToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Initializing,
    Running,
    Draining,
    Closed,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LoopError {
    #[error("update loop is closed")]
    Closed,

    #[error("operation not valid while {0:?}")]
    InvalidState(LoopState),
}

/// Totals reported when the loop finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopSummary {
    pub ticks: u64,
    /// Frames flushed, including the initial and draining frames.
    pub frames: u64,
    pub draw_failures: u64,
    pub uptime: Duration,
}

/// Wall clock used for the clock label.
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime { Local::now().naive_local() }

/// Drives one dashboard on one device until cancelled.
pub struct UpdateLoop<S, D> {
    state: LoopState,
    sensors: S,
    /// `None` once the device has been closed.
    device: Option<D>,
    dashboard: Dashboard,
    render: RenderState,
    metrics: TickMetrics,
    token: ShutdownToken,
    interval: Duration,
    clock: Clock,
}

impl<S: SensorSource, D: DeviceChannel> UpdateLoop<S, D> {
    pub fn new(
        sensors: S,
        device: D,
        dashboard: Dashboard,
        token: ShutdownToken,
        interval: Duration,
    ) -> Self {
        Self {
            state: LoopState::Initializing,
            sensors,
            device: Some(device),
            dashboard,
            render: RenderState::new(),
            metrics: TickMetrics::new(),
            token,
            interval,
            clock: local_now,
        }
    }

    /// Replace the wall clock, for deterministic labels.
    #[must_use]
    pub fn with_clock(
        mut self,
        clock: Clock,
    ) -> Self {
        self.clock = clock;
        self
    }

    #[inline]
    pub const fn state(&self) -> LoopState { self.state }

    #[inline]
    pub fn dashboard(&self) -> &Dashboard { &self.dashboard }

    /// Draw the placeholder frame over the full background.
    pub fn initialize(&mut self) -> Result<(), LoopError> {
        self.expect_state(LoopState::Initializing)?;
        let started = Instant::now();
        let commands = self.composite();
        let failures = self.flush(&commands);
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            commands = commands.len(),
            failures,
            "initial frame drawn"
        );
        self.state = LoopState::Running;
        Ok(())
    }

    /// One sample → apply → composite → flush cycle.
    pub fn tick(&mut self) -> Result<TickTiming, LoopError> {
        self.expect_state(LoopState::Running)?;

        let started = Instant::now();
        let snapshot = self.sensors.sample();
        let sample = started.elapsed();
        self.dashboard.apply(&snapshot, (self.clock)());

        let started = Instant::now();
        let commands = self.composite();
        let render = started.elapsed();

        let started = Instant::now();
        let failures = self.flush(&commands);
        let flush = started.elapsed();

        let timing = TickTiming { sample, render, flush };
        self.metrics.record_tick(timing, failures);
        debug!(
            sample_us = self.metrics.sample_time_us,
            render_us = self.metrics.render_time_us,
            flush_us = self.metrics.flush_time_us,
            commands = commands.len(),
            "tick"
        );
        if self.metrics.should_report() {
            self.report();
        }
        Ok(timing)
    }

    /// Commands for the current widget values. Pure: calling it twice
    /// without a flush in between gives the same list.
    pub fn composite(&self) -> Vec<DrawCommand> { render(self.dashboard.frame(), self.render.refresh()) }

    /// Final full frame, then release the device.
    pub fn drain(&mut self) -> Result<(), LoopError> {
        if self.state == LoopState::Closed {
            return Err(LoopError::Closed);
        }
        self.state = LoopState::Draining;

        self.render.request_refresh();
        let commands = self.composite();
        let failures = self.flush(&commands);
        if failures > 0 {
            warn!(failures, "final frame incomplete");
        }

        if let Some(mut device) = self.device.take() {
            if let Err(e) = device.close() {
                warn!(device = device.name(), error = %e, "device close failed");
            }
        }
        self.state = LoopState::Closed;
        Ok(())
    }

    /// Run until the token is cancelled, then drain.
    pub fn run(mut self) -> Result<LoopSummary, LoopError> {
        if self.state == LoopState::Initializing {
            self.initialize()?;
        }
        info!(interval_ms = self.interval.as_millis() as u64, "update loop running");

        while !self.token.is_cancelled() {
            let started = Instant::now();
            self.tick()?;
            // An overrun starts the next tick immediately, without catch-up
            let remaining = self.interval.saturating_sub(started.elapsed());
            self.token.wait_timeout(remaining);
        }

        info!("draining");
        self.drain()?;
        self.report();
        Ok(self.summary())
    }

    pub fn summary(&self) -> LoopSummary {
        LoopSummary {
            ticks: self.metrics.total_ticks,
            frames: self.render.frames(),
            draw_failures: self.metrics.draw_failures,
            uptime: self.metrics.uptime(),
        }
    }

    fn expect_state(
        &self,
        expected: LoopState,
    ) -> Result<(), LoopError> {
        match self.state {
            LoopState::Closed => Err(LoopError::Closed),
            state if state != expected => Err(LoopError::InvalidState(state)),
            _ => Ok(()),
        }
    }

    /// Send every command in order, then present. Returns the failure count.
    fn flush(
        &mut self,
        commands: &[DrawCommand],
    ) -> u32 {
        let Some(device) = self.device.as_mut() else {
            return 0;
        };

        let mut failures = 0;
        for command in commands {
            if let Err(e) = command.send_to(device) {
                failures += 1;
                warn!(device = device.name(), command = command.kind(), error = %e, "draw failed");
            }
        }
        if let Err(e) = device.present() {
            failures += 1;
            warn!(device = device.name(), error = %e, "present failed");
        }

        self.render.end_frame();
        failures
    }

    fn report(&self) {
        debug!(
            uptime = %self.metrics.uptime_string(),
            ticks = self.metrics.total_ticks,
            avg_us = self.metrics.tick_time_avg_us(),
            min_us = self.metrics.tick_time_min_us,
            max_us = self.metrics.tick_time_max_us,
            draw_failures = self.metrics.draw_failures,
            "tick stats"
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

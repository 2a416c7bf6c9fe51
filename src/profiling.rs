//! Tick timing statistics.
//!
//! Each tick records how long sampling, compositing and flushing took.
//! The update loop logs a one-line summary at `debug` level every
//! [`REPORT_EVERY`] ticks and once more at shutdown.
//!
//! # Usage
//!
//! ```ignore
//! let mut metrics = TickMetrics::new();
//!
//! // In the update loop:
//! let timing = TickTiming { sample, render, flush };
//! metrics.record_tick(timing, failed_draws);
//! if metrics.should_report() {
//!     debug!(uptime = %metrics.uptime_string(), avg_us = metrics.tick_time_avg_us(), "tick stats");
//! }
//! ```

use std::time::{Duration, Instant};

use heapless::String;

/// Ticks between periodic statistics reports.
pub const REPORT_EVERY: u64 = 60;

/// Phase durations of one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickTiming {
    pub sample: Duration,
    pub render: Duration,
    pub flush: Duration,
}

impl TickTiming {
    #[inline]
    pub fn total(&self) -> Duration { self.sample + self.render + self.flush }
}

/// Tick timing and draw failure statistics.
pub struct TickMetrics {
    // Last tick (microseconds for precision)
    pub sample_time_us: u32,
    pub render_time_us: u32,
    pub flush_time_us: u32,
    pub tick_time_us: u32,

    // Statistics (computed over time)
    pub tick_time_min_us: u32,
    pub tick_time_max_us: u32,
    /// Rolling average tick time (simple exponential moving average)
    tick_time_avg_us: f32,

    // Counters
    /// Ticks recorded since startup
    pub total_ticks: u64,
    /// Draw commands the device rejected since startup
    pub draw_failures: u64,

    start_time: Instant,
}

impl TickMetrics {
    /// Create new metrics, starting the uptime timer.
    pub fn new() -> Self {
        Self {
            sample_time_us: 0,
            render_time_us: 0,
            flush_time_us: 0,
            tick_time_us: 0,
            tick_time_min_us: u32::MAX,
            tick_time_max_us: 0,
            tick_time_avg_us: 0.0,
            total_ticks: 0,
            draw_failures: 0,
            start_time: Instant::now(),
        }
    }

    /// Exponential moving average alpha (0.1 for smooth updates).
    const EMA_ALPHA: f32 = 0.1;

    /// Record one tick's phase timings and failed draw count.
    pub fn record_tick(
        &mut self,
        timing: TickTiming,
        failed_draws: u32,
    ) {
        let total_us = micros(timing.total());
        self.sample_time_us = micros(timing.sample);
        self.render_time_us = micros(timing.render);
        self.flush_time_us = micros(timing.flush);
        self.tick_time_us = total_us;

        self.tick_time_min_us = self.tick_time_min_us.min(total_us);
        self.tick_time_max_us = self.tick_time_max_us.max(total_us);

        if self.total_ticks == 0 {
            self.tick_time_avg_us = total_us as f32;
        } else {
            self.tick_time_avg_us =
                Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.tick_time_avg_us);
        }

        self.total_ticks += 1;
        self.draw_failures += u64::from(failed_draws);
    }

    /// Get average tick time in microseconds.
    #[inline]
    pub const fn tick_time_avg_us(&self) -> u32 { self.tick_time_avg_us as u32 }

    /// True on every [`REPORT_EVERY`]th recorded tick.
    #[inline]
    pub const fn should_report(&self) -> bool { self.total_ticks > 0 && self.total_ticks % REPORT_EVERY == 0 }

    /// Get uptime since metrics were created.
    #[inline]
    pub fn uptime(&self) -> Duration { self.start_time.elapsed() }

    /// Format uptime as HH:MM:SS string.
    pub fn uptime_string(&self) -> String<12> { format_hms(self.uptime().as_secs()) }
}

impl Default for TickMetrics {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Saturating microsecond count.
#[inline]
fn micros(d: Duration) -> u32 { u32::try_from(d.as_micros()).unwrap_or(u32::MAX) }

/// HH:MM:SS with hours growing past two digits when needed.
fn format_hms(total_secs: u64) -> String<12> {
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    let mut s = String::new();
    for (i, part) in [hours, mins, secs].into_iter().enumerate() {
        if i > 0 {
            s.push(':').ok();
        }
        if part < 10 {
            s.push('0').ok();
        }
        push_u64(&mut s, part);
    }
    s
}

/// Push an integer to a heapless string (no format! macro).
fn push_u64<const N: usize>(
    s: &mut String<N>,
    mut val: u64,
) {
    if val == 0 {
        s.push('0').ok();
        return;
    }

    // Build digits in reverse
    let mut digits = [0u8; 20];
    let mut i = 0;
    while val > 0 {
        digits[i] = (val % 10) as u8;
        val /= 10;
        i += 1;
    }

    while i > 0 {
        i -= 1;
        s.push((b'0' + digits[i]) as char).ok();
    }
}

// =============================================================================
// Tests
// =============================================================================

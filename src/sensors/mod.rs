//! Host metric sampling.
//!
//! The update loop only sees [`SensorSource::sample`], which always returns a
//! complete [`SensorSnapshot`]. Platform backends implement the narrower
//! [`MetricReader`], where each metric can fail on its own, and are wrapped
//! in a [`DegradingSource`] that turns failures into the [`UNAVAILABLE`]
//! sentinel.
//!
//! # Backends
//!
//! | Platform | CPU / memory | Temperature | Service |
//! |----------|--------------|-------------|---------|
//! | POSIX | sysinfo | thermal zone file, then hwmon components | process probe |
//! | Windows | sysinfo | vendor sensors via sysinfo components | process probe |
//!
//! The backend is chosen once at startup by [`for_host`].
//!
//! # Logging
//!
//! A metric that starts failing logs one `warn!`. Repeats while it stays
//! down are `debug!`, and the first good read after that logs `info!`.

mod host;
mod net;
mod posix;
mod windows;

use std::io;
use std::net::IpAddr;
use std::path::PathBuf;

pub use host::HostMetrics;
pub use net::local_ip;
pub use posix::PosixReader;
use tracing::{debug, info, warn};
pub use windows::WindowsReader;

use crate::config::ServiceSettings;

/// Value substituted for a metric that could not be read.
pub const UNAVAILABLE: f32 = 0.0;

// =============================================================================
// Snapshot and Traits
// =============================================================================

/// One reading of every metric the dashboard shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorSnapshot {
    /// Whole-machine CPU load, 0–100.
    pub cpu_percent: f32,
    /// Package temperature in °C, [`UNAVAILABLE`] when unknown.
    pub cpu_temperature_celsius: f32,
    /// Used physical memory, 0–100.
    pub memory_used_percent: f32,
    /// Whether the watched service is running.
    pub service_active: bool,
    /// Address bound to the default route.
    pub local_ip: Option<IpAddr>,
}

impl SensorSnapshot {
    /// Every field at its sentinel. Used before the first sample.
    pub const fn unavailable() -> Self {
        Self {
            cpu_percent: UNAVAILABLE,
            cpu_temperature_celsius: UNAVAILABLE,
            memory_used_percent: UNAVAILABLE,
            service_active: false,
            local_ip: None,
        }
    }

    /// Temperature, or `None` when the sentinel is set.
    #[inline]
    pub fn cpu_temperature(&self) -> Option<f32> {
        (self.cpu_temperature_celsius != UNAVAILABLE).then_some(self.cpu_temperature_celsius)
    }
}

impl Default for SensorSnapshot {
    fn default() -> Self { Self::unavailable() }
}

/// Something that yields a full snapshot per tick. Never fails.
pub trait SensorSource {
    fn sample(&mut self) -> SensorSnapshot;
}

impl<T: SensorSource + ?Sized> SensorSource for Box<T> {
    fn sample(&mut self) -> SensorSnapshot { (**self).sample() }
}

#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("unsupported platform family '{0}'")]
    UnsupportedPlatform(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse {what} from '{value}'")]
    Parse { what: &'static str, value: String },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{what} reported a non-finite value")]
    NonFinite { what: &'static str },

    #[error("network probe failed: {0}")]
    Network(#[source] io::Error),
}

/// Per-metric reads of one platform backend.
pub trait MetricReader {
    /// Backend name for logs.
    fn name(&self) -> &'static str;

    fn cpu_percent(&mut self) -> Result<f32, SensorError>;

    fn cpu_temperature(&mut self) -> Result<f32, SensorError>;

    fn memory_used_percent(&mut self) -> Result<f32, SensorError>;

    fn service_active(&mut self) -> Result<bool, SensorError>;

    fn local_ip(&mut self) -> Result<IpAddr, SensorError>;
}

// =============================================================================
// Degradation
// =============================================================================

/// Metrics tracked for failure transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    CpuPercent,
    CpuTemperature,
    MemoryUsed,
    Service,
    LocalIp,
}

impl Metric {
    const COUNT: usize = 5;

    pub const fn name(self) -> &'static str {
        match self {
            Self::CpuPercent => "cpu_percent",
            Self::CpuTemperature => "cpu_temperature",
            Self::MemoryUsed => "memory_used_percent",
            Self::Service => "service_active",
            Self::LocalIp => "local_ip",
        }
    }
}

/// Wraps a [`MetricReader`] so every failure becomes a sentinel.
pub struct DegradingSource<R> {
    reader: R,
    failing: [bool; Metric::COUNT],
}

impl<R: MetricReader> DegradingSource<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            failing: [false; Metric::COUNT],
        }
    }

    /// Whether the last read of `metric` failed.
    #[inline]
    pub const fn is_failing(
        &self,
        metric: Metric,
    ) -> bool {
        self.failing[metric as usize]
    }

    /// Log the transition and keep the value on success.
    fn settle<T>(
        &mut self,
        metric: Metric,
        result: Result<T, SensorError>,
    ) -> Option<T> {
        let was_failing = self.failing[metric as usize];
        match result {
            Ok(value) => {
                if was_failing {
                    info!(backend = self.reader.name(), metric = metric.name(), "sensor recovered");
                }
                self.failing[metric as usize] = false;
                Some(value)
            }
            Err(e) => {
                if was_failing {
                    debug!(backend = self.reader.name(), metric = metric.name(), error = %e, "sensor still unavailable");
                } else {
                    warn!(backend = self.reader.name(), metric = metric.name(), error = %e, "sensor unavailable");
                }
                self.failing[metric as usize] = true;
                None
            }
        }
    }

    /// Reject NaN and infinities, then clamp to `[lo, hi]`.
    fn settle_f32(
        &mut self,
        metric: Metric,
        result: Result<f32, SensorError>,
        lo: f32,
        hi: f32,
    ) -> f32 {
        let checked = result.and_then(|value| {
            if value.is_finite() {
                Ok(value.clamp(lo, hi))
            } else {
                Err(SensorError::NonFinite { what: metric.name() })
            }
        });
        self.settle(metric, checked).unwrap_or(UNAVAILABLE)
    }
}

impl<R: MetricReader> SensorSource for DegradingSource<R> {
    fn sample(&mut self) -> SensorSnapshot {
        let cpu = self.reader.cpu_percent();
        let temperature = self.reader.cpu_temperature();
        let memory = self.reader.memory_used_percent();
        let service = self.reader.service_active();
        let ip = self.reader.local_ip();

        SensorSnapshot {
            cpu_percent: self.settle_f32(Metric::CpuPercent, cpu, 0.0, 100.0),
            cpu_temperature_celsius: self.settle_f32(Metric::CpuTemperature, temperature, f32::MIN, f32::MAX),
            memory_used_percent: self.settle_f32(Metric::MemoryUsed, memory, 0.0, 100.0),
            service_active: self.settle(Metric::Service, service).unwrap_or(false),
            local_ip: self.settle(Metric::LocalIp, ip),
        }
    }
}

// =============================================================================
// Platform Selection
// =============================================================================

/// Host families with a sensor backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformFamily {
    Posix,
    Windows,
}

/// Map `std::env::consts::FAMILY` to a backend family.
pub fn detect_platform(family: &str) -> Result<PlatformFamily, SensorError> {
    match family {
        "unix" => Ok(PlatformFamily::Posix),
        "windows" => Ok(PlatformFamily::Windows),
        other => Err(SensorError::UnsupportedPlatform(other.to_string())),
    }
}

/// Sensor source for the running host.
pub fn for_host(service: &ServiceSettings) -> Result<Box<dyn SensorSource>, SensorError> {
    let platform = detect_platform(std::env::consts::FAMILY)?;
    let host = HostMetrics::new(&service.process_names);
    let source: Box<dyn SensorSource> = match platform {
        PlatformFamily::Posix => Box::new(DegradingSource::new(PosixReader::new(host))),
        PlatformFamily::Windows => Box::new(DegradingSource::new(WindowsReader::new(host))),
    };
    info!(?platform, service = %service.label, "sensor backend selected");
    Ok(source)
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Linux, BSD and macOS backend.

use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{HostMetrics, MetricReader, SensorError, local_ip};

/// Kernel thermal zone reporting the SoC or package temperature.
pub const THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";

/// Thermal zone file first, hwmon components as fallback.
pub struct PosixReader {
    host: HostMetrics,
    thermal_zone: PathBuf,
}

impl PosixReader {
    pub fn new(host: HostMetrics) -> Self {
        Self {
            host,
            thermal_zone: PathBuf::from(THERMAL_ZONE),
        }
    }

    /// Read temperature from a different zone file.
    #[must_use]
    pub fn with_thermal_zone(
        mut self,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.thermal_zone = path.into();
        self
    }
}

impl MetricReader for PosixReader {
    fn name(&self) -> &'static str { "posix" }

    fn cpu_percent(&mut self) -> Result<f32, SensorError> { self.host.cpu_percent() }

    fn cpu_temperature(&mut self) -> Result<f32, SensorError> {
        read_thermal_zone(&self.thermal_zone).or_else(|e| {
            debug!(error = %e, "thermal zone unreadable, trying hwmon components");
            self.host.component_temperature()
        })
    }

    fn memory_used_percent(&mut self) -> Result<f32, SensorError> { self.host.memory_used_percent() }

    fn service_active(&mut self) -> Result<bool, SensorError> { self.host.service_running() }

    fn local_ip(&mut self) -> Result<IpAddr, SensorError> { local_ip() }
}

/// Parse a millidegree reading, e.g. `48312\n` → 48.312 °C.
pub fn read_thermal_zone(path: &Path) -> Result<f32, SensorError> {
    let raw = fs::read_to_string(path).map_err(|source| SensorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let millidegrees: f32 = raw.trim().parse().map_err(|_| SensorError::Parse {
        what: "thermal zone temperature",
        value: raw.trim().to_string(),
    })?;
    Ok(millidegrees / 1000.0)
}

// =============================================================================
// Unit Tests
// =============================================================================

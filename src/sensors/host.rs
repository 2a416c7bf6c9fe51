//! sysinfo-backed metrics shared by both platform readers.

use std::ffi::OsString;
use std::thread;
use std::time::Instant;

use sysinfo::{
    Components,
    CpuRefreshKind,
    MINIMUM_CPU_UPDATE_INTERVAL,
    MemoryRefreshKind,
    ProcessRefreshKind,
    ProcessesToUpdate,
    RefreshKind,
    System,
};

use super::SensorError;

/// Component labels that identify a CPU package or core sensor.
///
/// Intel `coretemp` reports "Package id 0" / "Core 0", AMD `k10temp`
/// reports "Tctl" / "Tdie".
const CPU_SENSOR_LABELS: [&str; 5] = ["cpu", "package", "core", "tctl", "tdie"];

/// One `System` and `Components` pair, refreshed per read.
pub struct HostMetrics {
    system: System,
    components: Components,
    last_cpu_refresh: Instant,
    service_names: Vec<OsString>,
}

impl HostMetrics {
    /// Prime the CPU counters so the first [`cpu_percent`](Self::cpu_percent)
    /// has a baseline.
    pub fn new(service_names: &[String]) -> Self {
        let system = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::everything())
                .with_memory(MemoryRefreshKind::everything()),
        );
        Self {
            system,
            components: Components::new_with_refreshed_list(),
            last_cpu_refresh: Instant::now(),
            service_names: service_names.iter().map(OsString::from).collect(),
        }
    }

    /// Whole-machine CPU load since the previous call.
    ///
    /// sysinfo needs two refreshes at least `MINIMUM_CPU_UPDATE_INTERVAL`
    /// apart. Back-to-back calls sleep for the remainder, which the tick
    /// interval is sized to absorb.
    pub fn cpu_percent(&mut self) -> Result<f32, SensorError> {
        let elapsed = self.last_cpu_refresh.elapsed();
        if elapsed < MINIMUM_CPU_UPDATE_INTERVAL {
            thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL - elapsed);
        }
        self.system.refresh_cpu_usage();
        self.last_cpu_refresh = Instant::now();

        if self.system.cpus().is_empty() {
            return Err(SensorError::NotFound("cpu usage counters"));
        }
        Ok(self.system.global_cpu_usage())
    }

    pub fn memory_used_percent(&mut self) -> Result<f32, SensorError> {
        self.system.refresh_memory();
        used_percent(self.system.used_memory(), self.system.total_memory())
    }

    /// Whether any process matches one of the configured service names.
    pub fn service_running(&mut self) -> Result<bool, SensorError> {
        if self.service_names.is_empty() {
            return Err(SensorError::NotFound("service process name"));
        }
        self.system
            .refresh_processes_specifics(ProcessesToUpdate::All, true, ProcessRefreshKind::nothing());
        let system = &self.system;
        Ok(self
            .service_names
            .iter()
            .any(|name| system.processes_by_exact_name(name.as_os_str()).next().is_some()))
    }

    /// First hwmon component whose label looks like a CPU sensor.
    pub fn component_temperature(&mut self) -> Result<f32, SensorError> {
        self.components.refresh(true);
        self.components
            .list()
            .iter()
            .filter(|component| is_cpu_sensor(component.label()))
            .find_map(|component| component.temperature())
            .ok_or(SensorError::NotFound("cpu temperature sensor"))
    }
}

/// Case-insensitive match against the known CPU sensor labels.
fn is_cpu_sensor(label: &str) -> bool {
    let label = label.to_lowercase();
    CPU_SENSOR_LABELS.iter().any(|known| label.contains(known))
}

fn used_percent(
    used: u64,
    total: u64,
) -> Result<f32, SensorError> {
    if total == 0 {
        return Err(SensorError::NotFound("physical memory total"));
    }
    Ok((used as f64 / total as f64 * 100.0) as f32)
}

// =============================================================================
// Unit Tests
// =============================================================================

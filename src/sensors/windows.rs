//! Windows backend.
//!
//! Temperature comes from sysinfo components, which read the vendor
//! sensors exposed through WMI. Many desktop boards expose none, in which
//! case the gauge shows the unavailable state.

use std::net::IpAddr;

use super::{HostMetrics, MetricReader, SensorError, local_ip};

pub struct WindowsReader {
    host: HostMetrics,
}

impl WindowsReader {
    pub const fn new(host: HostMetrics) -> Self { Self { host } }
}

impl MetricReader for WindowsReader {
    fn name(&self) -> &'static str { "windows" }

    fn cpu_percent(&mut self) -> Result<f32, SensorError> { self.host.cpu_percent() }

    fn cpu_temperature(&mut self) -> Result<f32, SensorError> { self.host.component_temperature() }

    fn memory_used_percent(&mut self) -> Result<f32, SensorError> { self.host.memory_used_percent() }

    fn service_active(&mut self) -> Result<bool, SensorError> { self.host.service_running() }

    fn local_ip(&mut self) -> Result<IpAddr, SensorError> { local_ip() }
}

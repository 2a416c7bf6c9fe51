//! Local address discovery.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

use super::SensorError;

/// Public address used only to select a route. Nothing is sent to it.
const ROUTE_PROBE: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 80);

/// Address of the interface that carries the default route.
///
/// Connecting a UDP socket picks a source address without sending a packet.
pub fn local_ip() -> Result<IpAddr, SensorError> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).map_err(SensorError::Network)?;
    socket.connect(ROUTE_PROBE).map_err(SensorError::Network)?;
    let addr = socket.local_addr().map_err(SensorError::Network)?;
    routable(addr.ip())
}

/// An unspecified address means the host has no usable route.
fn routable(addr: IpAddr) -> Result<IpAddr, SensorError> {
    if addr.is_unspecified() { Err(SensorError::NotFound("default route")) } else { Ok(addr) }
}

// =============================================================================
// Unit Tests
// =============================================================================

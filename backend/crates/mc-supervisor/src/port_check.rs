//! Game port availability check run before every launch.

use crate::{Result as SupervisorResult, SupervisorError};

const BIND_HOST: &str = "0.0.0.0";

/// Check if a port is available for binding on all interfaces.
///
/// The probe listener is released as soon as it is dropped.
pub fn is_port_available(port: u16) -> bool {
    std::net::TcpListener::bind((BIND_HOST, port)).is_ok()
}

pub fn ensure_port_available(port: u16) -> SupervisorResult<()> {
    if is_port_available(port) {
        Ok(())
    } else {
        Err(SupervisorError::launch(format!(
            "game port {} is already in use",
            port
        )))
    }
}

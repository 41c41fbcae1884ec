use mc_config::WebSocketConfig;

use std::time::Duration;

/// Per-connection settings derived from `[websocket]`
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Outgoing frames queued before the client counts as too slow
    pub send_buffer_size: usize,
    pub heartbeat_interval: Duration,
    /// Silence from the client longer than this closes the connection
    pub heartbeat_timeout: Duration,
    pub max_message_bytes: usize,
}

impl ConnectionConfig {
    pub fn from_config(config: &WebSocketConfig) -> Self {
        Self {
            send_buffer_size: config.send_buffer_size,
            heartbeat_interval: Duration::from_secs(config.heartbeat_interval_secs),
            heartbeat_timeout: Duration::from_secs(config.heartbeat_timeout_secs),
            max_message_bytes: config.max_message_bytes,
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::from_config(&WebSocketConfig::default())
    }
}

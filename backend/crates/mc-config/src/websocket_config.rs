use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Outgoing frames queued per connection before the client counts as slow
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 256;

pub const MIN_HEARTBEAT_INTERVAL_SECS: u64 = 1;
pub const MAX_HEARTBEAT_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_HEARTBEAT_INTERVAL_SECS: u64 = 30;

pub const MIN_HEARTBEAT_TIMEOUT_SECS: u64 = 2;
pub const MAX_HEARTBEAT_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_HEARTBEAT_TIMEOUT_SECS: u64 = 60;

// Largest client text frame accepted
pub const MIN_MAX_MESSAGE_BYTES: usize = 64;
pub const MAX_MAX_MESSAGE_BYTES: usize = 1024 * 1024;
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 16 * 1024;

/// Console stream connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    pub send_buffer_size: usize,
    pub heartbeat_interval_secs: u64,
    /// Connection is dropped when nothing arrives from the client for this long
    pub heartbeat_timeout_secs: u64,
    pub max_message_bytes: usize,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            heartbeat_interval_secs: DEFAULT_HEARTBEAT_INTERVAL_SECS,
            heartbeat_timeout_secs: DEFAULT_HEARTBEAT_TIMEOUT_SECS,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}

impl WebSocketConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        Self::check_range(
            "send_buffer_size",
            self.send_buffer_size as u64,
            MIN_SEND_BUFFER_SIZE as u64,
            MAX_SEND_BUFFER_SIZE as u64,
        )?;
        Self::check_range(
            "heartbeat_interval_secs",
            self.heartbeat_interval_secs,
            MIN_HEARTBEAT_INTERVAL_SECS,
            MAX_HEARTBEAT_INTERVAL_SECS,
        )?;
        Self::check_range(
            "heartbeat_timeout_secs",
            self.heartbeat_timeout_secs,
            MIN_HEARTBEAT_TIMEOUT_SECS,
            MAX_HEARTBEAT_TIMEOUT_SECS,
        )?;
        Self::check_range(
            "max_message_bytes",
            self.max_message_bytes as u64,
            MIN_MAX_MESSAGE_BYTES as u64,
            MAX_MAX_MESSAGE_BYTES as u64,
        )?;

        if self.heartbeat_timeout_secs <= self.heartbeat_interval_secs {
            return Err(ConfigError::config(format!(
                "websocket.heartbeat_timeout_secs ({}) must be greater than heartbeat_interval_secs ({})",
                self.heartbeat_timeout_secs, self.heartbeat_interval_secs
            )));
        }

        Ok(())
    }

    fn check_range(field: &str, value: u64, min: u64, max: u64) -> ConfigErrorResult<()> {
        if value < min || value > max {
            return Err(ConfigError::config(format!(
                "websocket.{} must be {}-{}, got {}",
                field, min, max, value
            )));
        }
        Ok(())
    }
}

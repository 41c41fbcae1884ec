use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Ring buffer of recent log lines replayed to new subscribers
pub const MIN_LOG_BUFFER_CAPACITY: usize = 1;
pub const MAX_LOG_BUFFER_CAPACITY: usize = 10000;
pub const DEFAULT_LOG_BUFFER_CAPACITY: usize = 100;

// Per-subscriber queue; a full queue drops that subscriber's oldest events
pub const MIN_SUBSCRIBER_BUFFER: usize = 1;
pub const MAX_SUBSCRIBER_BUFFER: usize = 65536;
pub const DEFAULT_SUBSCRIBER_BUFFER: usize = 256;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BroadcastConfig {
    pub log_buffer_capacity: usize,
    pub subscriber_buffer: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            log_buffer_capacity: DEFAULT_LOG_BUFFER_CAPACITY,
            subscriber_buffer: DEFAULT_SUBSCRIBER_BUFFER,
        }
    }
}

impl BroadcastConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.log_buffer_capacity < MIN_LOG_BUFFER_CAPACITY
            || self.log_buffer_capacity > MAX_LOG_BUFFER_CAPACITY
        {
            return Err(ConfigError::config(format!(
                "broadcast.log_buffer_capacity must be {}-{}, got {}",
                MIN_LOG_BUFFER_CAPACITY, MAX_LOG_BUFFER_CAPACITY, self.log_buffer_capacity
            )));
        }

        if self.subscriber_buffer < MIN_SUBSCRIBER_BUFFER
            || self.subscriber_buffer > MAX_SUBSCRIBER_BUFFER
        {
            return Err(ConfigError::config(format!(
                "broadcast.subscriber_buffer must be {}-{}, got {}",
                MIN_SUBSCRIBER_BUFFER, MAX_SUBSCRIBER_BUFFER, self.subscriber_buffer
            )));
        }

        Ok(())
    }
}

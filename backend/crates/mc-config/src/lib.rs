mod broadcast_config;
mod command_config;
mod config;
mod error;
mod instance_config;
mod log_level;
mod logging_config;
mod server_config;
mod stats_config;
mod websocket_config;

pub use broadcast_config::BroadcastConfig;
pub use command_config::CommandConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use instance_config::InstanceConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use stats_config::StatsConfig;
pub use websocket_config::WebSocketConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "MC_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".mc";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const MIN_PORT: u16 = 1024;
const DEFAULT_MAX_CONNECTIONS: usize = 100;
const MIN_MAX_CONNECTIONS: usize = 1;
const MAX_MAX_CONNECTIONS: usize = 10000;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

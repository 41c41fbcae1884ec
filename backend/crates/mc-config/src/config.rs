use crate::{
    BroadcastConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, CommandConfig, ConfigError,
    ConfigErrorResult, DEFAULT_CONFIG_DIR_NAME, InstanceConfig, LoggingConfig, ServerConfig,
    StatsConfig, WebSocketConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub instance: InstanceConfig,
    pub broadcast: BroadcastConfig,
    pub stats: StatsConfig,
    pub commands: CommandConfig,
    pub websocket: WebSocketConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for MC_CONFIG_DIR env var, else use ./.mc/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply MC_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: MC_CONFIG_DIR env var > ./.mc/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.instance.validate()?;
        self.broadcast.validate()?;
        self.stats.validate()?;
        self.commands.validate()?;
        self.websocket.validate()?;

        if self.instance.game_port == self.server.port {
            return Err(ConfigError::config(format!(
                "instance.game_port and server.port must differ, both are {}",
                self.server.port
            )));
        }

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} connections)",
            self.server.host, self.server.port, self.server.max_connections
        );
        info!(
            "  instance: '{}' in {} (game port {}, heap {}-{}MB)",
            self.instance.name,
            self.instance.working_dir,
            self.instance.game_port,
            self.instance.min_memory_mb,
            self.instance.max_memory_mb
        );
        info!("  command line: {}", self.instance.command_line().join(" "));
        info!(
            "  lifecycle: startup={}s, shutdown={}s, kill={}s, stop_command='{}'",
            self.instance.startup_timeout_secs,
            self.instance.shutdown_timeout_secs,
            self.instance.kill_timeout_secs,
            self.instance.stop_command
        );
        info!(
            "  broadcast: log_buffer={}, subscriber_buffer={}",
            self.broadcast.log_buffer_capacity, self.broadcast.subscriber_buffer
        );
        info!(
            "  stats: {} (every {}s)",
            if self.stats.enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.stats.poll_interval_secs
        );
        info!(
            "  commands: allowed=[{}], max_length={}",
            self.commands.allowed.join(", "),
            self.commands.max_length
        );
        info!(
            "  websocket: buffer={}, heartbeat={}s/{}s",
            self.websocket.send_buffer_size,
            self.websocket.heartbeat_interval_secs,
            self.websocket.heartbeat_timeout_secs
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("MC_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("MC_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "MC_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
        );

        // Instance
        Self::apply_env_string("MC_INSTANCE_NAME", &mut self.instance.name);
        Self::apply_env_string("MC_INSTANCE_DIR", &mut self.instance.working_dir);
        Self::apply_env_string("MC_JAVA_PATH", &mut self.instance.java_path);
        Self::apply_env_string("MC_SERVER_JAR", &mut self.instance.jar);
        Self::apply_env_parse("MC_MIN_MEMORY_MB", &mut self.instance.min_memory_mb);
        Self::apply_env_parse("MC_MAX_MEMORY_MB", &mut self.instance.max_memory_mb);
        Self::apply_env_parse("MC_GAME_PORT", &mut self.instance.game_port);
        Self::apply_env_bool("MC_CHECK_PORT", &mut self.instance.check_port);
        Self::apply_env_bool("MC_ACCEPT_EULA", &mut self.instance.accept_eula);
        Self::apply_env_parse(
            "MC_STARTUP_TIMEOUT_SECS",
            &mut self.instance.startup_timeout_secs,
        );
        Self::apply_env_parse(
            "MC_SHUTDOWN_TIMEOUT_SECS",
            &mut self.instance.shutdown_timeout_secs,
        );
        Self::apply_env_parse("MC_KILL_TIMEOUT_SECS", &mut self.instance.kill_timeout_secs);
        Self::apply_env_string("MC_STOP_COMMAND", &mut self.instance.stop_command);

        // Broadcast
        Self::apply_env_parse(
            "MC_LOG_BUFFER_CAPACITY",
            &mut self.broadcast.log_buffer_capacity,
        );
        Self::apply_env_parse(
            "MC_SUBSCRIBER_BUFFER",
            &mut self.broadcast.subscriber_buffer,
        );

        // Stats
        Self::apply_env_bool("MC_STATS_ENABLED", &mut self.stats.enabled);
        Self::apply_env_parse(
            "MC_STATS_POLL_INTERVAL_SECS",
            &mut self.stats.poll_interval_secs,
        );

        // Commands
        Self::apply_env_list("MC_ALLOWED_COMMANDS", &mut self.commands.allowed);
        Self::apply_env_parse("MC_COMMAND_MAX_LENGTH", &mut self.commands.max_length);
        Self::apply_env_string("MC_DEFAULT_USER_ID", &mut self.commands.default_user_id);

        // WebSocket
        Self::apply_env_parse(
            "MC_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );
        Self::apply_env_parse(
            "MC_WS_HEARTBEAT_INTERVAL_SECS",
            &mut self.websocket.heartbeat_interval_secs,
        );
        Self::apply_env_parse(
            "MC_WS_HEARTBEAT_TIMEOUT_SECS",
            &mut self.websocket.heartbeat_timeout_secs,
        );
        Self::apply_env_parse(
            "MC_WS_MAX_MESSAGE_BYTES",
            &mut self.websocket.max_message_bytes,
        );

        // Logging
        Self::apply_env_parse("MC_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("MC_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("MC_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: Apply comma-separated list override, blanks dropped
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect();
        }
    }
}

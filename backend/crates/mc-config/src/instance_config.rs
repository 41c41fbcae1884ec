use crate::{ConfigError, ConfigErrorResult};

use std::path::PathBuf;

use serde::Deserialize;

// Heap constraints (megabytes)
pub const MIN_MEMORY_MB: u32 = 256;
pub const MAX_MEMORY_MB: u32 = 65536;
pub const DEFAULT_MIN_MEMORY_MB: u32 = 1024;
pub const DEFAULT_MAX_MEMORY_MB: u32 = 2048;

// Readiness wait (seconds)
pub const MIN_STARTUP_TIMEOUT_SECS: u64 = 1;
pub const MAX_STARTUP_TIMEOUT_SECS: u64 = 3600;
pub const DEFAULT_STARTUP_TIMEOUT_SECS: u64 = 300;

// Graceful stop wait (seconds)
pub const MIN_SHUTDOWN_TIMEOUT_SECS: u64 = 1;
pub const MAX_SHUTDOWN_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// Wait after each termination signal (seconds)
pub const MIN_KILL_TIMEOUT_SECS: u64 = 1;
pub const MAX_KILL_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_KILL_TIMEOUT_SECS: u64 = 5;

// Stdin write bound (milliseconds)
pub const MIN_COMMAND_WRITE_TIMEOUT_MS: u64 = 10;
pub const MAX_COMMAND_WRITE_TIMEOUT_MS: u64 = 60000;
pub const DEFAULT_COMMAND_WRITE_TIMEOUT_MS: u64 = 2000;

pub const DEFAULT_INSTANCE_NAME: &str = "minecraft";
pub const DEFAULT_WORKING_DIR: &str = "minecraft_server";
pub const DEFAULT_JAVA_PATH: &str = "java";
pub const DEFAULT_SERVER_JAR: &str = "fabric-server-launch.jar";
pub const DEFAULT_GAME_PORT: u16 = 25565;
pub const DEFAULT_STOP_COMMAND: &str = "stop";

/// Launch and lifecycle parameters of the supervised server process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// Display name of the instance
    pub name: String,
    /// Directory the process runs in (world data, eula.txt, server.properties)
    pub working_dir: String,
    pub java_path: String,
    pub jar: String,
    pub min_memory_mb: u32,
    pub max_memory_mb: u32,
    /// Extra JVM flags placed before `-jar`
    pub jvm_args: Vec<String>,
    /// Arguments placed after the jar
    pub server_args: Vec<String>,
    /// Full command line override; replaces the java invocation when set
    pub command: Option<Vec<String>>,
    /// Game port the server binds; checked for availability before launch
    pub game_port: u16,
    pub check_port: bool,
    /// Write `eula=true` into the working directory before launch
    pub accept_eula: bool,
    /// Every marker must appear in one output line for the server to count as ready
    pub ready_markers: Vec<String>,
    pub startup_timeout_secs: u64,
    pub shutdown_timeout_secs: u64,
    pub kill_timeout_secs: u64,
    /// Console command written to stdin for a graceful stop
    pub stop_command: String,
    pub command_write_timeout_ms: u64,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            name: String::from(DEFAULT_INSTANCE_NAME),
            working_dir: String::from(DEFAULT_WORKING_DIR),
            java_path: String::from(DEFAULT_JAVA_PATH),
            jar: String::from(DEFAULT_SERVER_JAR),
            min_memory_mb: DEFAULT_MIN_MEMORY_MB,
            max_memory_mb: DEFAULT_MAX_MEMORY_MB,
            jvm_args: Vec::new(),
            server_args: vec![String::from("nogui")],
            command: None,
            game_port: DEFAULT_GAME_PORT,
            check_port: true,
            accept_eula: false,
            ready_markers: vec![String::from("Done"), String::from("For help, type")],
            startup_timeout_secs: DEFAULT_STARTUP_TIMEOUT_SECS,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            kill_timeout_secs: DEFAULT_KILL_TIMEOUT_SECS,
            stop_command: String::from(DEFAULT_STOP_COMMAND),
            command_write_timeout_ms: DEFAULT_COMMAND_WRITE_TIMEOUT_MS,
        }
    }
}

impl InstanceConfig {
    /// Program followed by its arguments.
    pub fn command_line(&self) -> Vec<String> {
        if let Some(command) = self.command.as_ref().filter(|c| !c.is_empty()) {
            return command.clone();
        }

        let mut line = Vec::with_capacity(5 + self.jvm_args.len() + self.server_args.len());
        line.push(self.java_path.clone());
        line.push(format!("-Xmx{}M", self.max_memory_mb));
        line.push(format!("-Xms{}M", self.min_memory_mb));
        line.extend(self.jvm_args.iter().cloned());
        line.push(String::from("-jar"));
        line.push(self.jar.clone());
        line.extend(self.server_args.iter().cloned());
        line
    }

    pub fn working_dir(&self) -> PathBuf {
        PathBuf::from(&self.working_dir)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::instance("instance.name cannot be empty"));
        }

        if self.working_dir.trim().is_empty() {
            return Err(ConfigError::instance("instance.working_dir cannot be empty"));
        }

        match &self.command {
            Some(command) => {
                if command.first().is_none_or(|program| program.trim().is_empty()) {
                    return Err(ConfigError::instance(
                        "instance.command must name a program when set",
                    ));
                }
            }
            None => {
                if self.java_path.trim().is_empty() || self.jar.trim().is_empty() {
                    return Err(ConfigError::instance(
                        "instance.java_path and instance.jar are required without instance.command",
                    ));
                }
            }
        }

        for (field, value) in [
            ("min_memory_mb", self.min_memory_mb),
            ("max_memory_mb", self.max_memory_mb),
        ] {
            if !(MIN_MEMORY_MB..=MAX_MEMORY_MB).contains(&value) {
                return Err(ConfigError::instance(format!(
                    "instance.{} must be {}-{}, got {}",
                    field, MIN_MEMORY_MB, MAX_MEMORY_MB, value
                )));
            }
        }

        if self.min_memory_mb > self.max_memory_mb {
            return Err(ConfigError::instance(format!(
                "instance.min_memory_mb ({}) cannot exceed max_memory_mb ({})",
                self.min_memory_mb, self.max_memory_mb
            )));
        }

        if self.game_port == 0 {
            return Err(ConfigError::instance("instance.game_port cannot be 0"));
        }

        if self.ready_markers.iter().all(|m| m.trim().is_empty()) {
            return Err(ConfigError::instance(
                "instance.ready_markers needs at least one non-empty marker",
            ));
        }

        if self.stop_command.trim().is_empty() {
            return Err(ConfigError::instance("instance.stop_command cannot be empty"));
        }

        Self::check_range(
            "startup_timeout_secs",
            self.startup_timeout_secs,
            MIN_STARTUP_TIMEOUT_SECS,
            MAX_STARTUP_TIMEOUT_SECS,
        )?;
        Self::check_range(
            "shutdown_timeout_secs",
            self.shutdown_timeout_secs,
            MIN_SHUTDOWN_TIMEOUT_SECS,
            MAX_SHUTDOWN_TIMEOUT_SECS,
        )?;
        Self::check_range(
            "kill_timeout_secs",
            self.kill_timeout_secs,
            MIN_KILL_TIMEOUT_SECS,
            MAX_KILL_TIMEOUT_SECS,
        )?;
        Self::check_range(
            "command_write_timeout_ms",
            self.command_write_timeout_ms,
            MIN_COMMAND_WRITE_TIMEOUT_MS,
            MAX_COMMAND_WRITE_TIMEOUT_MS,
        )?;

        Ok(())
    }

    fn check_range(field: &str, value: u64, min: u64, max: u64) -> ConfigErrorResult<()> {
        if value < min || value > max {
            return Err(ConfigError::instance(format!(
                "instance.{} must be {}-{}, got {}",
                field, min, max, value
            )));
        }
        Ok(())
    }
}

use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_COMMAND_MAX_LENGTH: usize = 1;
pub const MAX_COMMAND_MAX_LENGTH: usize = 4096;
pub const DEFAULT_COMMAND_MAX_LENGTH: usize = 256;

pub const DEFAULT_USER_ID: &str = "web-console";

/// Console commands accepted from users by default.
pub const DEFAULT_ALLOWED_COMMANDS: [&str; 9] = [
    "list", "tps", "help", "say", "tell", "gamemode", "tp", "give", "time",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// First word of every accepted command (case-insensitive)
    pub allowed: Vec<String>,
    pub max_length: usize,
    /// Attributed to requests that carry no user identity
    pub default_user_id: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            allowed: DEFAULT_ALLOWED_COMMANDS
                .iter()
                .map(|c| String::from(*c))
                .collect(),
            max_length: DEFAULT_COMMAND_MAX_LENGTH,
            default_user_id: String::from(DEFAULT_USER_ID),
        }
    }
}

impl CommandConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_length < MIN_COMMAND_MAX_LENGTH || self.max_length > MAX_COMMAND_MAX_LENGTH {
            return Err(ConfigError::commands(format!(
                "commands.max_length must be {}-{}, got {}",
                MIN_COMMAND_MAX_LENGTH, MAX_COMMAND_MAX_LENGTH, self.max_length
            )));
        }

        if let Some(bad) = self
            .allowed
            .iter()
            .find(|c| c.trim().is_empty() || c.contains(char::is_whitespace))
        {
            return Err(ConfigError::commands(format!(
                "commands.allowed entries must be single words, got {:?}",
                bad
            )));
        }

        if self.default_user_id.trim().is_empty() {
            return Err(ConfigError::commands(
                "commands.default_user_id cannot be empty",
            ));
        }

        Ok(())
    }
}

use crate::{CommandValidator, Result as SupervisorResult, SupervisorError};

use mc_config::CommandConfig;
use mc_core::CommandRequest;

use std::collections::HashSet;

/// Accepts a command only when its first word is on the allow-list.
#[derive(Debug, Clone)]
pub struct AllowListValidator {
    allowed: HashSet<String>,
    max_length: usize,
}

impl AllowListValidator {
    pub fn new<I, S>(allowed: I, max_length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: allowed
                .into_iter()
                .map(|c| c.as_ref().trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect(),
            max_length,
        }
    }

    pub fn from_config(config: &CommandConfig) -> Self {
        Self::new(&config.allowed, config.max_length)
    }

    /// Trim whitespace and a leading slash, as typed into the in-game chat.
    pub fn normalize(command: &str) -> &str {
        let trimmed = command.trim();
        trimmed.strip_prefix('/').unwrap_or(trimmed).trim_start()
    }

    pub fn is_allowed(&self, verb: &str) -> bool {
        self.allowed.contains(&verb.to_lowercase())
    }
}

impl CommandValidator for AllowListValidator {
    fn validate(&self, request: &CommandRequest) -> SupervisorResult<()> {
        let command = Self::normalize(&request.command);

        if command.is_empty() {
            return Err(SupervisorError::rejected(&request.command, "command is empty"));
        }

        if command.chars().any(char::is_control) {
            return Err(SupervisorError::rejected(
                &request.command,
                "command contains control characters",
            ));
        }

        if command.chars().count() > self.max_length {
            return Err(SupervisorError::rejected(
                &request.command,
                format!("command exceeds {} characters", self.max_length),
            ));
        }

        let verb = command.split_whitespace().next().unwrap_or_default();
        if !self.is_allowed(verb) {
            return Err(SupervisorError::rejected(
                &request.command,
                format!("'{}' is not an allowed command", verb),
            ));
        }

        Ok(())
    }
}

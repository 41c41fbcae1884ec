use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A console command submitted by a user. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandRequest {
    pub correlation_id: Uuid,
    pub command: String,
    pub user_id: String,
    pub issued_at: DateTime<Utc>,
}

impl CommandRequest {
    pub fn new(command: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            command: command.into(),
            user_id: user_id.into(),
            issued_at: Utc::now(),
        }
    }

    /// Reuse a correlation id chosen by the caller.
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }
}

use crate::CommandRequest;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Confirmation that a command line reached the server's stdin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandAck {
    pub correlation_id: Uuid,
    pub command: String,
    pub user_id: String,
    pub accepted_at: DateTime<Utc>,
}

impl From<&CommandRequest> for CommandAck {
    fn from(request: &CommandRequest) -> Self {
        Self {
            correlation_id: request.correlation_id,
            command: request.command.clone(),
            user_id: request.user_id.clone(),
            accepted_at: Utc::now(),
        }
    }
}

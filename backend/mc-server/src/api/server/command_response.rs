use mc_core::CommandAck;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub success: bool,
    pub message: String,
    pub command: String,
    pub correlation_id: Uuid,
    pub user_id: String,
    pub accepted_at: DateTime<Utc>,
}

impl From<CommandAck> for CommandResponse {
    fn from(ack: CommandAck) -> Self {
        Self {
            success: true,
            message: String::from("Command sent"),
            command: ack.command,
            correlation_id: ack.correlation_id,
            user_id: ack.user_id,
            accepted_at: ack.accepted_at,
        }
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Frames a console client may send.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    RequestLogs {
        #[serde(default)]
        limit: Option<usize>,
    },
    RequestStats,
    RequestStatus,
    SendCommand {
        command: String,
        #[serde(default)]
        correlation_id: Option<Uuid>,
    },
}

impl ClientMessage {
    pub fn message_type(&self) -> &'static str {
        match self {
            Self::RequestLogs { .. } => "request_logs",
            Self::RequestStats => "request_stats",
            Self::RequestStatus => "request_status",
            Self::SendCommand { .. } => "send_command",
        }
    }
}

use mc_core::{InstanceStatus, LogEntry, ServerEvent, ServerState, StatSnapshot};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Frames pushed to console clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    ServerStatus {
        status: InstanceStatus,
    },
    StatusChanged {
        from: ServerState,
        to: ServerState,
        at: DateTime<Utc>,
    },
    ServerLog {
        entry: LogEntry,
    },
    ServerLogs {
        entries: Vec<LogEntry>,
    },
    ServerStats {
        snapshot: Option<StatSnapshot>,
    },
    ServerCrashed {
        exit_code: Option<i32>,
        at: DateTime<Utc>,
    },
    StatsFailed {
        message: String,
        at: DateTime<Utc>,
    },
    CommandResult {
        correlation_id: Uuid,
        success: bool,
        command: String,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
    Lagged {
        missed: u64,
    },
    Error {
        code: String,
        message: String,
    },
}

impl ServerMessage {
    pub fn message_type(&self) -> &'static str {
        match self {
            Self::ServerStatus { .. } => "server_status",
            Self::StatusChanged { .. } => "status_changed",
            Self::ServerLog { .. } => "server_log",
            Self::ServerLogs { .. } => "server_logs",
            Self::ServerStats { .. } => "server_stats",
            Self::ServerCrashed { .. } => "server_crashed",
            Self::StatsFailed { .. } => "stats_failed",
            Self::CommandResult { .. } => "command_result",
            Self::Lagged { .. } => "lagged",
            Self::Error { .. } => "error",
        }
    }
}

impl From<ServerEvent> for ServerMessage {
    fn from(event: ServerEvent) -> Self {
        match event {
            ServerEvent::StatusChanged { from, to, at, .. } => Self::StatusChanged { from, to, at },
            ServerEvent::Log { entry } => Self::ServerLog { entry },
            ServerEvent::Stats { snapshot } => Self::ServerStats {
                snapshot: Some(snapshot),
            },
            ServerEvent::Crashed { exit_code, at, .. } => Self::ServerCrashed { exit_code, at },
            ServerEvent::StatsFailed { message, at } => Self::StatsFailed { message, at },
        }
    }
}

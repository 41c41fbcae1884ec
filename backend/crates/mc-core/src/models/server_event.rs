use crate::{InstanceId, LogEntry, ServerState, StatSnapshot};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit of fan-out delivered to every subscriber.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    StatusChanged {
        instance_id: InstanceId,
        from: ServerState,
        to: ServerState,
        at: DateTime<Utc>,
    },
    Log {
        entry: LogEntry,
    },
    Stats {
        snapshot: StatSnapshot,
    },
    Crashed {
        instance_id: InstanceId,
        exit_code: Option<i32>,
        at: DateTime<Utc>,
    },
    StatsFailed {
        message: String,
        at: DateTime<Utc>,
    },
}

impl ServerEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::StatusChanged { .. } => "status_changed",
            Self::Log { .. } => "log",
            Self::Stats { .. } => "stats",
            Self::Crashed { .. } => "crashed",
            Self::StatsFailed { .. } => "stats_failed",
        }
    }
}

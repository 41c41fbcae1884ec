use crate::{InstanceId, ServerState};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Side-effect free snapshot returned by `status()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstanceStatus {
    pub instance_id: InstanceId,
    pub name: String,
    pub state: ServerState,
    pub pid: Option<u32>,
    /// When the current process was spawned
    pub started_at: Option<DateTime<Utc>>,
    pub uptime_secs: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub last_started: Option<DateTime<Utc>>,
    pub last_stopped: Option<DateTime<Utc>>,
}

impl InstanceStatus {
    pub fn new(instance_id: InstanceId, name: impl Into<String>) -> Self {
        Self {
            instance_id,
            name: name.into(),
            state: ServerState::Stopped,
            pid: None,
            started_at: None,
            uptime_secs: None,
            created_at: Utc::now(),
            last_started: None,
            last_stopped: None,
        }
    }

    /// Copy of `self` with `uptime_secs` computed against `now`.
    pub fn at(&self, now: DateTime<Utc>) -> Self {
        let mut status = self.clone();
        status.uptime_secs = match (self.state.is_live(), self.started_at) {
            (true, Some(started)) => Some((now - started).num_seconds().max(0) as u64),
            _ => None,
        };
        status
    }
}

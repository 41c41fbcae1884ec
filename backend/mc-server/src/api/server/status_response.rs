use mc_core::{InstanceStatus, LogEntry, StatSnapshot};

use serde::Serialize;

/// Lifecycle snapshot plus recent output, for dashboards that poll.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub status: InstanceStatus,
    pub logs: Vec<LogEntry>,
    pub stats: Option<StatSnapshot>,
}

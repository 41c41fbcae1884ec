use mc_core::InstanceId;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Details of an unexpected process exit.
#[derive(Debug, Clone, PartialEq)]
pub struct CrashReport {
    pub instance_id: InstanceId,
    pub instance_name: String,
    pub exit_code: Option<i32>,
    pub uptime_secs: u64,
    pub at: DateTime<Utc>,
}

/// Notified after the supervisor has recorded a crash. Never restarts anything itself.
#[async_trait]
pub trait CrashListener: Send + Sync {
    async fn on_crash(&self, report: &CrashReport);
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a `stop()` call ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopOutcome {
    /// Nothing was running; no events were published
    AlreadyStopped,
    /// A crashed instance was moved back to stopped
    Acknowledged,
    /// The process exited after the stop command
    Graceful,
    /// The process exited after SIGTERM
    Terminated,
    /// The process had to be killed
    Forced,
}

impl StopOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyStopped => "already_stopped",
            Self::Acknowledged => "acknowledged",
            Self::Graceful => "graceful",
            Self::Terminated => "terminated",
            Self::Forced => "forced",
        }
    }
}

impl fmt::Display for StopOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

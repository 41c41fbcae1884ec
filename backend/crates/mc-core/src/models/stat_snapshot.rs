use crate::PlayerInfo;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time view of the running server. Only the latest one is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatSnapshot {
    pub players: Vec<PlayerInfo>,
    /// Last ticks-per-second value the server printed, if any
    pub tps: Option<f64>,
    pub memory_used_mb: f64,
    pub cpu_usage: f64,
    pub uptime_secs: u64,
    pub captured_at: DateTime<Utc>,
}

impl StatSnapshot {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

use mc_core::StatSnapshot;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// `null` until the first sample has been taken
    pub stats: Option<StatSnapshot>,
}

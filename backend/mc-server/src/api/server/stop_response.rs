use mc_core::ServerState;
use mc_supervisor::StopOutcome;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StopResponse {
    pub success: bool,
    pub message: String,
    pub outcome: StopOutcome,
    pub state: ServerState,
}

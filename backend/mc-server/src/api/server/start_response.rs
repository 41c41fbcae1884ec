use mc_core::ServerState;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub success: bool,
    pub message: String,
    pub state: ServerState,
}

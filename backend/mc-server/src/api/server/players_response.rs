use mc_core::PlayerInfo;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PlayersResponse {
    pub players: Vec<PlayerInfo>,
    pub count: usize,
}

impl From<Vec<PlayerInfo>> for PlayersResponse {
    fn from(players: Vec<PlayerInfo>) -> Self {
        Self {
            count: players.len(),
            players,
        }
    }
}

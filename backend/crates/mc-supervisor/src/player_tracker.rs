use mc_core::PlayerInfo;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static JOINED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+) joined the game").expect("valid join pattern"));
static LEFT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+) left the game").expect("valid leave pattern"));
static TPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TPS[^:]*:\s*(\d+(?:\.\d+)?)").expect("valid tps pattern"));

/// Derives the online player list and TPS from console output.
#[derive(Debug, Default, Clone)]
pub struct PlayerTracker {
    players: BTreeMap<String, PlayerInfo>,
    tps: Option<f64>,
}

impl PlayerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one console line; returns true when players or TPS changed.
    pub fn observe(&mut self, line: &str) -> bool {
        if let Some(name) = JOINED.captures(line).and_then(|c| c.get(1)) {
            let name = name.as_str();
            if self.players.contains_key(name) {
                return false;
            }
            self.players
                .insert(name.to_string(), PlayerInfo::new(name));
            return true;
        }

        if let Some(name) = LEFT.captures(line).and_then(|c| c.get(1)) {
            return self.players.remove(name.as_str()).is_some();
        }

        if let Some(tps) = TPS
            .captures(line)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
        {
            let changed = self.tps != Some(tps);
            self.tps = Some(tps);
            return changed;
        }

        false
    }

    /// Online players ordered by name.
    pub fn players(&self) -> Vec<PlayerInfo> {
        self.players.values().cloned().collect()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn tps(&self) -> Option<f64> {
        self.tps
    }
}

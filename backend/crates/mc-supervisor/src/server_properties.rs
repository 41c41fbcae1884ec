use crate::{Result as SupervisorResult, SupervisorError};

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use chrono::Utc;

pub const SERVER_PROPERTIES_FILE: &str = "server.properties";
pub const SERVER_PORT_KEY: &str = "server-port";

// Written when the instance has no server.properties yet
const DEFAULT_PROPERTIES: &[(&str, &str)] = &[
    (SERVER_PORT_KEY, "25565"),
    ("enable-rcon", "false"),
    ("online-mode", "true"),
    ("enable-command-block", "false"),
    ("spawn-protection", "16"),
    ("max-players", "20"),
    ("motd", "A Minecraft Server"),
    ("difficulty", "normal"),
    ("gamemode", "survival"),
    ("pvp", "true"),
    ("spawn-monsters", "true"),
    ("spawn-animals", "true"),
    ("spawn-npcs", "true"),
    ("generate-structures", "true"),
    ("level-type", "minecraft:normal"),
    ("level-name", "world"),
    ("view-distance", "10"),
    ("simulation-distance", "10"),
    ("white-list", "false"),
];

/// The `key=value` pairs of a `server.properties` file, in file order.
///
/// Comments are not kept. Saving writes a fresh header, the same way the
/// game server rewrites the file itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerProperties {
    entries: Vec<(String, String)>,
}

impl ServerProperties {
    /// The template used for a new instance, with `server-port` set.
    pub fn defaults(game_port: u16) -> Self {
        let mut properties = Self {
            entries: DEFAULT_PROPERTIES
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        };
        properties.set(SERVER_PORT_KEY, game_port.to_string());
        properties
    }

    pub fn parse(contents: &str) -> Self {
        let mut properties = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                properties.set(key.trim(), value.trim());
            }
        }

        properties
    }

    /// Read `path`. `None` when the file does not exist.
    pub async fn load(path: &Path) -> std::io::Result<Option<Self>> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => Ok(Some(Self::parse(&contents))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn save(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::write(path, self.render()).await
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "#Minecraft server properties\n#{}\n",
            Utc::now().format("%a %b %d %H:%M:%S UTC %Y")
        );
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    /// Replace an existing key in place, or append a new one.
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries.iter().cloned().collect()
    }

    /// Check one user-supplied entry before it is merged.
    ///
    /// `server-port` belongs to the instance config and may only be set to
    /// `game_port`.
    pub fn check_entry(key: &str, value: &str, game_port: u16) -> SupervisorResult<()> {
        if key.trim().is_empty() {
            return Err(SupervisorError::invalid_property(key, "key is empty"));
        }
        if key != key.trim()
            || key.starts_with('#')
            || key.starts_with('!')
            || key.contains(['=', ':', '\n', '\r'])
        {
            return Err(SupervisorError::invalid_property(
                key,
                "key contains reserved characters",
            ));
        }
        if value.contains(['\n', '\r']) {
            return Err(SupervisorError::invalid_property(
                key,
                "value must be a single line",
            ));
        }
        if key == SERVER_PORT_KEY && value.trim().parse::<u16>().ok() != Some(game_port) {
            return Err(SupervisorError::invalid_property(
                key,
                format!("managed by instance.game_port ({})", game_port),
            ));
        }
        Ok(())
    }
}

use mc_config::ServerConfig;

/// Cap on concurrently open console streams
#[derive(Debug, Clone)]
pub struct ConnectionLimits {
    pub max_total: usize,
}

impl ConnectionLimits {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            max_total: config.max_connections,
        }
    }
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self::from_config(&ServerConfig::default())
    }
}

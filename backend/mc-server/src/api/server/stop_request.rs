use serde::Deserialize;

/// Body of POST /api/server/stop. An empty body means a graceful stop.
#[derive(Debug, Deserialize)]
pub struct StopRequest {
    #[serde(default = "default_graceful")]
    pub graceful: bool,
}

impl Default for StopRequest {
    fn default() -> Self {
        Self { graceful: true }
    }
}

fn default_graceful() -> bool {
    true
}

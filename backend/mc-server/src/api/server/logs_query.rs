use serde::Deserialize;

/// Query parameters for GET /api/server/logs
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<usize>,
}

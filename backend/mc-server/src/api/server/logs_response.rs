use mc_core::LogEntry;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub entries: Vec<LogEntry>,
    pub count: usize,
}

impl From<Vec<LogEntry>> for LogsResponse {
    fn from(entries: Vec<LogEntry>) -> Self {
        Self {
            count: entries.len(),
            entries,
        }
    }
}

use crate::{LogSeverity, LogStream};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of console output captured from the server process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    /// Monotonic across the lifetime of the broadcaster, never reused
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub severity: LogSeverity,
    pub stream: LogStream,
}

impl LogEntry {
    /// Build an entry from a raw line, stripping the trailing line terminator.
    pub fn new(sequence: u64, raw: &str, severity: LogSeverity, stream: LogStream) -> Self {
        Self {
            sequence,
            timestamp: Utc::now(),
            message: raw.trim_end_matches(['\n', '\r']).to_string(),
            severity,
            stream,
        }
    }
}

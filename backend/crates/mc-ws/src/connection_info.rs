use crate::ConnectionId;

use chrono::{DateTime, Utc};

/// An open console stream
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    pub user_id: String,
    pub connected_at: DateTime<Utc>,
}

use mc_core::{LogEntry, ServerEvent, StatSnapshot};

use std::fmt;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

/// Handle returned by `subscribe_callback`, used to stop delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(Uuid);

impl SubscriptionToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live feed plus the state a late joiner needs to catch up.
///
/// `replay` and `receiver` are taken atomically: the first event on
/// `receiver` is the first one published after the last replayed entry.
pub struct Subscription {
    pub replay: Vec<LogEntry>,
    pub latest_stats: Option<StatSnapshot>,
    pub receiver: broadcast::Receiver<ServerEvent>,
}

impl Subscription {
    /// Next live event. `Lagged(n)` means this subscriber lost its `n` oldest queued events.
    pub async fn recv(&mut self) -> Result<ServerEvent, RecvError> {
        self.receiver.recv().await
    }
}

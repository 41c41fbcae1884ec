use crate::{LogRing, Subscription, SubscriptionToken};

use mc_config::BroadcastConfig;
use mc_core::{LogEntry, LogStream, ServerEvent, SeverityRules, StatSnapshot};

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;

/// Fans server events out to every subscriber and keeps the replay state.
///
/// Each subscriber owns a bounded queue of `subscriber_buffer` events. When
/// a subscriber falls behind, only its own oldest events are dropped; the
/// publisher never blocks.
pub struct EventBroadcaster {
    inner: Arc<RwLock<BroadcasterInner>>,
    sender: broadcast::Sender<ServerEvent>,
    rules: Arc<SeverityRules>,
}

struct BroadcasterInner {
    ring: LogRing,
    latest_stats: Option<StatSnapshot>,
    next_sequence: u64,
    callbacks: HashMap<SubscriptionToken, JoinHandle<()>>,
}

impl EventBroadcaster {
    pub fn new(config: &BroadcastConfig) -> Self {
        Self::with_rules(config, SeverityRules::default())
    }

    pub fn with_rules(config: &BroadcastConfig, rules: SeverityRules) -> Self {
        let (sender, _) = broadcast::channel(config.subscriber_buffer.max(1));

        Self {
            inner: Arc::new(RwLock::new(BroadcasterInner {
                ring: LogRing::new(config.log_buffer_capacity),
                latest_stats: None,
                next_sequence: 1,
                callbacks: HashMap::new(),
            })),
            sender,
            rules: Arc::new(rules),
        }
    }

    /// Classify a raw console line, buffer it and publish it.
    pub async fn publish_line(&self, raw: &str, stream: LogStream) -> LogEntry {
        let severity = self.rules.classify(raw);
        let mut inner = self.inner.write().await;

        let entry = LogEntry::new(inner.next_sequence, raw, severity, stream);
        inner.next_sequence += 1;
        inner.ring.push(entry.clone());

        self.send(ServerEvent::Log {
            entry: entry.clone(),
        });

        entry
    }

    /// Publish an event, returning how many subscribers it was queued for.
    ///
    /// Stats events replace the retained snapshot. Log lines should go
    /// through `publish_line` so they get a sequence number.
    pub async fn publish(&self, event: ServerEvent) -> usize {
        let mut inner = self.inner.write().await;

        match &event {
            ServerEvent::Log { entry } => inner.ring.push(entry.clone()),
            ServerEvent::Stats { snapshot } => inner.latest_stats = Some(snapshot.clone()),
            _ => {}
        }

        self.send(event)
    }

    fn send(&self, event: ServerEvent) -> usize {
        let event_type = event.event_type();

        match self.sender.send(event) {
            Ok(receivers) => {
                debug!("Published {} event to {} subscribers", event_type, receivers);
                receivers
            }
            Err(_) => 0,
        }
    }

    /// Subscribe to the live feed, receiving buffered history first.
    pub async fn subscribe(&self) -> Subscription {
        // The write path holds this lock while sending, so nothing published
        // between the snapshot and the receiver can be missed or duplicated.
        let inner = self.inner.read().await;

        let subscription = Subscription {
            replay: inner.ring.snapshot(),
            latest_stats: inner.latest_stats.clone(),
            receiver: self.sender.subscribe(),
        };

        debug!(
            "Subscriber joined ({} replayed entries, {} total subscribers)",
            subscription.replay.len(),
            self.sender.receiver_count()
        );

        subscription
    }

    /// Deliver every event to `callback` on a background task.
    ///
    /// Buffered log entries are delivered first as `Log` events.
    pub async fn subscribe_callback<F>(&self, callback: F) -> SubscriptionToken
    where
        F: Fn(ServerEvent) + Send + Sync + 'static,
    {
        let token = SubscriptionToken::new();
        let Subscription {
            replay,
            mut receiver,
            ..
        } = self.subscribe().await;

        let handle = tokio::spawn(async move {
            for entry in replay {
                callback(ServerEvent::Log { entry });
            }

            loop {
                match receiver.recv().await {
                    Ok(event) => callback(event),
                    Err(RecvError::Lagged(missed)) => {
                        warn!("Callback subscriber {} lagged, missed {} events", token, missed);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        self.inner.write().await.callbacks.insert(token, handle);
        token
    }

    /// Stop a callback subscription. Returns false for unknown tokens.
    pub async fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        match self.inner.write().await.callbacks.remove(&token) {
            Some(handle) => {
                handle.abort();
                debug!("Callback subscriber {} removed", token);
                true
            }
            None => false,
        }
    }

    /// The newest `limit` buffered entries, oldest first.
    pub async fn recent_logs(&self, limit: usize) -> Vec<LogEntry> {
        self.inner.read().await.ring.recent(limit)
    }

    /// Forget the retained snapshot once the process it describes is gone.
    pub async fn clear_stats(&self) {
        self.inner.write().await.latest_stats = None;
    }

    pub async fn latest_stats(&self) -> Option<StatSnapshot> {
        self.inner.read().await.latest_stats.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn severity_rules(&self) -> &SeverityRules {
        &self.rules
    }
}

impl Clone for EventBroadcaster {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            sender: self.sender.clone(),
            rules: Arc::clone(&self.rules),
        }
    }
}

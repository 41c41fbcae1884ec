use crate::{PlayerTracker, ProcessSample};

use mc_core::StatSnapshot;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::Notify;

/// State shared by the tasks attached to one spawned process.
pub(crate) struct RunContext {
    pub run_id: u64,
    pub pid: Option<u32>,
    pub started: Instant,
    pub started_at: DateTime<Utc>,
    tracker: Mutex<PlayerTracker>,
    last_sample: Mutex<Option<ProcessSample>>,
    ready: AtomicBool,
    ready_notify: Notify,
}

impl RunContext {
    pub fn new(run_id: u64, pid: Option<u32>) -> Self {
        Self {
            run_id,
            pid,
            started: Instant::now(),
            started_at: Utc::now(),
            tracker: Mutex::new(PlayerTracker::new()),
            last_sample: Mutex::new(None),
            ready: AtomicBool::new(false),
            ready_notify: Notify::new(),
        }
    }

    /// Feed a console line to the player tracker; true when stats changed.
    pub fn observe_line(&self, line: &str) -> bool {
        lock(&self.tracker).observe(line)
    }

    pub fn record_sample(&self, sample: ProcessSample) {
        *lock(&self.last_sample) = Some(sample);
    }

    pub fn mark_ready(&self) {
        if !self.ready.swap(true, Ordering::SeqCst) {
            self.ready_notify.notify_one();
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Resolves once a readiness marker has been seen.
    pub async fn wait_ready(&self) {
        if self.is_ready() {
            return;
        }
        self.ready_notify.notified().await;
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    pub fn snapshot(&self) -> StatSnapshot {
        let (players, tps) = {
            let tracker = lock(&self.tracker);
            (tracker.players(), tracker.tps())
        };
        let sample = lock(&self.last_sample).unwrap_or_default();

        StatSnapshot {
            players,
            tps,
            memory_used_mb: sample.memory_mb(),
            cpu_usage: sample.cpu_percent,
            uptime_secs: self.uptime_secs(),
            captured_at: Utc::now(),
        }
    }
}

// A panicked tail task must not take stats down with it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

use mc_supervisor::{CrashListener, CrashReport};

use std::time::Duration;

use async_trait::async_trait;
use metrics::{counter, gauge, histogram};

/// Metrics collector for the console stream and supervisor events
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "mc_ws" }
    }

    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    pub fn connection_rejected(&self) {
        counter!(format!("{}.connections.rejected", self.prefix)).increment(1);
    }

    pub fn message_received(&self, message_type: &str) {
        counter!(format!("{}.messages.received", self.prefix)).increment(1);
        counter!(format!(
            "{}.messages.received.{}",
            self.prefix, message_type
        ))
        .increment(1);
    }

    pub fn message_sent(&self, message_type: &str) {
        counter!(format!("{}.messages.sent", self.prefix)).increment(1);
        counter!(format!("{}.messages.sent.{}", self.prefix, message_type)).increment(1);
    }

    /// A subscriber fell behind and lost its oldest events
    pub fn events_dropped(&self, missed: u64) {
        counter!(format!("{}.events.dropped", self.prefix)).increment(missed);
    }

    /// Outcome of a console command: accepted, rejected, not_running or failed
    pub fn command_submitted(&self, outcome: &str) {
        counter!(format!("{}.commands.total", self.prefix)).increment(1);
        counter!(format!("{}.commands.{}", self.prefix, outcome)).increment(1);
    }

    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }

    pub fn message_latency(&self, duration: Duration) {
        histogram!(format!("{}.messages.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }

    pub fn server_crashed(&self, uptime_secs: u64) {
        counter!(format!("{}.server.crashes", self.prefix)).increment(1);
        gauge!(format!("{}.server.last_crash_uptime_secs", self.prefix)).set(uptime_secs as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CrashListener for Metrics {
    async fn on_crash(&self, report: &CrashReport) {
        self.server_crashed(report.uptime_secs);
    }
}

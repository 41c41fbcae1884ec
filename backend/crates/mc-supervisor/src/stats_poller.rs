use crate::{EventBroadcaster, ProcessProbe};
use crate::run_context::RunContext;

use mc_core::ServerEvent;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Periodically sample the process and publish a `Stats` event.
///
/// A failed sample publishes `StatsFailed` and keeps the last good values.
/// Periods below one second are raised to one second.
pub(crate) fn spawn(
    interval: Duration,
    probe: Arc<dyn ProcessProbe>,
    broadcaster: EventBroadcaster,
    run: Arc<RunContext>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let Some(pid) = run.pid else {
            warn!("Stats polling disabled for run {}: no pid", run.run_id);
            return;
        };

        let mut ticker = tokio::time::interval(interval.max(MIN_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match probe.sample(pid) {
                Ok(sample) => {
                    run.record_sample(sample);
                    debug!(
                        "Sampled pid {}: {:.1}MB, {:.1}% cpu",
                        pid,
                        sample.memory_mb(),
                        sample.cpu_percent
                    );
                    broadcaster
                        .publish(ServerEvent::Stats {
                            snapshot: run.snapshot(),
                        })
                        .await;
                }
                Err(e) => {
                    warn!("Stats sampling failed for pid {}: {}", pid, e);
                    broadcaster
                        .publish(ServerEvent::StatsFailed {
                            message: e.to_string(),
                            at: Utc::now(),
                        })
                        .await;
                }
            }
        }
    })
}

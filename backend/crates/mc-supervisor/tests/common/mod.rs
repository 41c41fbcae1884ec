#![allow(dead_code)]

use mc_config::{BroadcastConfig, InstanceConfig, StatsConfig};
use mc_core::{ServerEvent, ServerState};
use mc_supervisor::{
    CrashListener, CrashReport, EventBroadcaster, ProcessProbe, ProcessSample, ProcessSupervisor,
    Subscription, SupervisorError, SupervisorOptions, SupervisorResult,
};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

pub const EVENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Prints the vanilla ready line, then serves a few console commands.
pub const READY_SERVER: &str = r#"
echo "[Server thread/INFO]: Starting minecraft server version 1.21.1"
echo "[Server thread/INFO]: Done (0.412s)! For help, type \"help\""
while IFS= read -r line; do
  case "$line" in
    stop) echo "[Server thread/INFO]: Stopping the server"; exit 0 ;;
    list) echo "[Server thread/INFO]: There are 0 of a max of 20 players online:" ;;
    say*) echo "[Server thread/INFO]: [Server] ${line#say }" ;;
    *) echo "[Server thread/INFO]: Unknown or incomplete command: $line" ;;
  esac
done
"#;

/// Never prints a readiness marker.
pub const SILENT_SERVER: &str = r#"
echo "[Server thread/INFO]: Loading libraries, please wait..."
while IFS= read -r line; do
  [ "$line" = "stop" ] && exit 0
done
"#;

/// Ignores both the stop command and SIGTERM.
pub const STUBBORN_SERVER: &str = r#"
trap '' TERM
echo "[Server thread/INFO]: Done (0.100s)! For help, type \"help\""
while true; do
  IFS= read -r line || sleep 1
done
"#;

/// Becomes ready, reports a player, then dies with exit code 3.
pub const CRASHING_SERVER: &str = r#"
echo "[Server thread/INFO]: Done (0.100s)! For help, type \"help\""
echo "[Server thread/INFO]: Steve joined the game"
sleep 1
echo "[Server thread/ERROR]: Encountered an unexpected exception" >&2
exit 3
"#;

/// Echoes the port it finds in server.properties before becoming ready.
pub const PORT_REPORTING_SERVER: &str = r#"
echo "[Server thread/INFO]: Using $(grep '^server-port=' server.properties)"
echo "[Server thread/INFO]: Done (0.100s)! For help, type \"help\""
while IFS= read -r line; do
  [ "$line" = "stop" ] && exit 0
done
"#;

/// Echoes every console line and keeps reading for two seconds after `stop`.
pub const SLOW_STOP_SERVER: &str = r#"
echo "[Server thread/INFO]: Done (0.100s)! For help, type \"help\""
while IFS= read -r line; do
  echo "[Server thread/INFO]: Received $line"
  if [ "$line" = "stop" ]; then
    ( sleep 2; kill $$ ) &
  fi
done
"#;

pub fn instance_config(dir: &Path, script: &str) -> InstanceConfig {
    InstanceConfig {
        name: String::from("test-server"),
        working_dir: dir.join("server").to_string_lossy().into_owned(),
        command: Some(vec![
            String::from("sh"),
            String::from("-c"),
            String::from(script),
        ]),
        check_port: false,
        startup_timeout_secs: 10,
        shutdown_timeout_secs: 5,
        kill_timeout_secs: 1,
        ..InstanceConfig::default()
    }
}

pub fn stats_disabled() -> StatsConfig {
    StatsConfig {
        enabled: false,
        ..StatsConfig::default()
    }
}

pub fn supervisor(config: InstanceConfig) -> ProcessSupervisor {
    supervisor_with_stats(config, stats_disabled(), Arc::new(FixedProbe::default()))
}

pub fn supervisor_with_stats(
    config: InstanceConfig,
    stats: StatsConfig,
    probe: Arc<dyn ProcessProbe>,
) -> ProcessSupervisor {
    let broadcaster = EventBroadcaster::new(&BroadcastConfig::default());
    let options = SupervisorOptions::from_config(&config, &stats).with_probe(probe);
    ProcessSupervisor::new(config, broadcaster, options)
}

/// Probe reporting a constant sample.
pub struct FixedProbe {
    pub sample: ProcessSample,
}

impl Default for FixedProbe {
    fn default() -> Self {
        Self {
            sample: ProcessSample {
                memory_bytes: 256 * 1024 * 1024,
                cpu_percent: 7.5,
            },
        }
    }
}

impl ProcessProbe for FixedProbe {
    fn sample(&self, _pid: u32) -> SupervisorResult<ProcessSample> {
        Ok(self.sample)
    }
}

/// Probe that always fails.
pub struct FailingProbe;

impl ProcessProbe for FailingProbe {
    fn sample(&self, pid: u32) -> SupervisorResult<ProcessSample> {
        Err(SupervisorError::stats(format!("process {} not found", pid)))
    }
}

/// Forwards crash reports to a channel.
pub struct ChannelCrashListener {
    tx: mpsc::UnboundedSender<CrashReport>,
}

impl ChannelCrashListener {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<CrashReport>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

#[async_trait]
impl CrashListener for ChannelCrashListener {
    async fn on_crash(&self, report: &CrashReport) {
        let _ = self.tx.send(report.clone());
    }
}

/// Next event matching `pick`, skipping everything else.
pub async fn next_matching<T>(
    subscription: &mut Subscription,
    mut pick: impl FnMut(&ServerEvent) -> Option<T>,
) -> T {
    tokio::time::timeout(EVENT_TIMEOUT, async {
        loop {
            match subscription.recv().await {
                Ok(event) => {
                    if let Some(found) = pick(&event) {
                        return found;
                    }
                }
                Err(e) => panic!("subscription failed: {:?}", e),
            }
        }
    })
    .await
    .expect("timed out waiting for event")
}

pub async fn next_transition(subscription: &mut Subscription) -> (ServerState, ServerState) {
    next_matching(subscription, |event| match event {
        ServerEvent::StatusChanged { from, to, .. } => Some((*from, *to)),
        _ => None,
    })
    .await
}

pub async fn next_log_containing(subscription: &mut Subscription, needle: &str) -> String {
    next_matching(subscription, |event| match event {
        ServerEvent::Log { entry } if entry.message.contains(needle) => {
            Some(entry.message.clone())
        }
        _ => None,
    })
    .await
}

pub async fn start_and_wait_running(supervisor: &ProcessSupervisor) {
    supervisor.start().await.expect("start should succeed");
    assert!(
        supervisor
            .wait_for_state(ServerState::Running, EVENT_TIMEOUT)
            .await,
        "server never reached running"
    );
}

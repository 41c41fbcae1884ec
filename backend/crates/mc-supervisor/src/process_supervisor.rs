use crate::process_handle::{ExitInfo, ProcessHandle};
use crate::run_context::RunContext;
use crate::{
    CrashListener, CrashReport, EventBroadcaster, Result as SupervisorResult, SERVER_PORT_KEY,
    SERVER_PROPERTIES_FILE, ServerProperties, StopOutcome, Subscription, SubscriptionToken,
    SupervisorError, SupervisorOptions, output_tail, port_check, stats_poller,
};

use mc_config::InstanceConfig;
use mc_core::{InstanceId, InstanceStatus, LogStream, ServerEvent, ServerState};

use std::collections::BTreeMap;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;
use error_location::ErrorLocation;
use log::{debug, error, info, warn};
use tokio::process::{Child, Command};
use tokio::sync::{Mutex, oneshot, watch};
use tokio::task::JoinHandle;

// Output still buffered in the pipes is drained for at most this long after exit
const TAIL_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Owns the lifecycle of one server process.
///
/// All transitions happen under a single lock, so concurrent `start`/`stop`
/// calls are serialized and every change is published exactly once.
/// Clones share the same instance.
pub struct ProcessSupervisor {
    inner: Arc<SupervisorInner>,
}

struct SupervisorInner {
    instance_id: InstanceId,
    config: InstanceConfig,
    options: SupervisorOptions,
    broadcaster: EventBroadcaster,
    lifecycle: Mutex<Lifecycle>,
    status_tx: watch::Sender<InstanceStatus>,
    run_counter: AtomicU64,
    crash_listeners: RwLock<Vec<Arc<dyn CrashListener>>>,
}

struct Lifecycle {
    status: InstanceStatus,
    process: Option<ProcessHandle>,
}

impl ProcessSupervisor {
    pub fn new(
        config: InstanceConfig,
        broadcaster: EventBroadcaster,
        options: SupervisorOptions,
    ) -> Self {
        let instance_id = InstanceId::new();
        let status = InstanceStatus::new(instance_id, config.name.clone());
        let (status_tx, _) = watch::channel(status.clone());

        Self {
            inner: Arc::new(SupervisorInner {
                instance_id,
                config,
                options,
                broadcaster,
                lifecycle: Mutex::new(Lifecycle {
                    status,
                    process: None,
                }),
                status_tx,
                run_counter: AtomicU64::new(0),
                crash_listeners: RwLock::new(Vec::new()),
            }),
        }
    }

    pub fn instance_id(&self) -> InstanceId {
        self.inner.instance_id
    }

    pub fn config(&self) -> &InstanceConfig {
        &self.inner.config
    }

    pub fn broadcaster(&self) -> &EventBroadcaster {
        &self.inner.broadcaster
    }

    /// Current status. Never blocks on an ongoing start or stop.
    pub fn status(&self) -> InstanceStatus {
        self.inner.status_tx.borrow().at(Utc::now())
    }

    pub fn state(&self) -> ServerState {
        self.inner.status_tx.borrow().state
    }

    /// Wait until the instance reaches `target`. False on timeout.
    pub async fn wait_for_state(&self, target: ServerState, timeout: Duration) -> bool {
        let mut status_rx = self.inner.status_tx.subscribe();
        tokio::time::timeout(timeout, status_rx.wait_for(|status| status.state == target))
            .await
            .is_ok_and(|result| result.is_ok())
    }

    pub async fn subscribe(&self) -> Subscription {
        self.inner.broadcaster.subscribe().await
    }

    pub async fn subscribe_callback<F>(&self, callback: F) -> SubscriptionToken
    where
        F: Fn(ServerEvent) + Send + Sync + 'static,
    {
        self.inner.broadcaster.subscribe_callback(callback).await
    }

    pub async fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        self.inner.broadcaster.unsubscribe(token).await
    }

    pub fn add_crash_listener(&self, listener: Arc<dyn CrashListener>) {
        self.inner
            .crash_listeners
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(listener);
    }

    /// Current `server.properties`. Empty before the first start.
    pub async fn server_properties(&self) -> SupervisorResult<ServerProperties> {
        let path = self.properties_path();
        ServerProperties::load(&path)
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| {
                SupervisorError::properties_io(format!("cannot read {}", path.display()), e)
            })
    }

    /// Template a new instance starts from.
    pub fn default_server_properties(&self) -> ServerProperties {
        ServerProperties::defaults(self.inner.config.game_port)
    }

    /// Merge `updates` into `server.properties`.
    ///
    /// Nothing is written unless every entry is valid. Changes apply on the
    /// next start.
    pub async fn update_server_properties(
        &self,
        updates: BTreeMap<String, String>,
    ) -> SupervisorResult<ServerProperties> {
        let game_port = self.inner.config.game_port;
        for (key, value) in &updates {
            ServerProperties::check_entry(key, value, game_port)?;
        }

        // Launch writes the same file under this lock
        let _lifecycle = self.inner.lifecycle.lock().await;

        let working_dir = self.inner.config.working_dir();
        tokio::fs::create_dir_all(&working_dir).await.map_err(|e| {
            SupervisorError::properties_io(
                format!("cannot create working directory {}", working_dir.display()),
                e,
            )
        })?;

        let path = working_dir.join(SERVER_PROPERTIES_FILE);
        let mut properties = ServerProperties::load(&path)
            .await
            .map_err(|e| {
                SupervisorError::properties_io(format!("cannot read {}", path.display()), e)
            })?
            .unwrap_or_else(|| ServerProperties::defaults(game_port));

        let count = updates.len();
        for (key, value) in updates {
            properties.set(key, value.trim());
        }

        properties.save(&path).await.map_err(|e| {
            SupervisorError::properties_io(format!("cannot write {}", path.display()), e)
        })?;

        info!("Updated {} server properties in {}", count, path.display());
        Ok(properties)
    }

    fn properties_path(&self) -> PathBuf {
        self.inner.config.working_dir().join(SERVER_PROPERTIES_FILE)
    }

    /// Launch the server process.
    ///
    /// Returns once the process is spawned, with the instance in `Starting`.
    /// The move to `Running` happens when a readiness marker appears or the
    /// startup timeout passes.
    pub async fn start(&self) -> SupervisorResult<()> {
        let mut lifecycle = self.inner.lifecycle.lock().await;

        let state = lifecycle.status.state;
        if !state.can_start() {
            return Err(SupervisorError::AlreadyRunning {
                state,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.transition(&mut lifecycle, ServerState::Starting).await?;

        match self.launch().await {
            Ok(process) => {
                info!(
                    "Server '{}' spawned (pid {:?}, run {})",
                    self.inner.config.name,
                    process.pid(),
                    process.run_id()
                );
                lifecycle.status.pid = process.pid();
                lifecycle.status.started_at = Some(process.run.started_at);
                lifecycle.process = Some(process);
                self.inner.status_tx.send_replace(lifecycle.status.clone());
                Ok(())
            }
            Err(e) => {
                error!("Failed to start server '{}': {}", self.inner.config.name, e);
                self.transition(&mut lifecycle, ServerState::Stopped).await?;
                Err(e)
            }
        }
    }

    /// Stop the server.
    ///
    /// With `graceful`, the stop command is written first and the process
    /// gets `shutdown_timeout_secs` to exit. SIGTERM and then a kill follow,
    /// each waiting `kill_timeout_secs`. Stopping a stopped instance is a no-op.
    pub async fn stop(&self, graceful: bool) -> SupervisorResult<StopOutcome> {
        let mut lifecycle = self.inner.lifecycle.lock().await;

        match lifecycle.status.state {
            ServerState::Stopped => {
                debug!("Stop requested while already stopped");
                return Ok(StopOutcome::AlreadyStopped);
            }
            ServerState::Crashed => {
                self.transition(&mut lifecycle, ServerState::Stopped).await?;
                info!("Crash of '{}' acknowledged", self.inner.config.name);
                return Ok(StopOutcome::Acknowledged);
            }
            ServerState::Stopping => {
                return Err(SupervisorError::InvalidTransition {
                    from: ServerState::Stopping,
                    to: ServerState::Stopping,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            ServerState::Starting | ServerState::Running => {}
        }

        let process = lifecycle.process.take();
        self.transition(&mut lifecycle, ServerState::Stopping).await?;

        let (outcome, exit_code) = match process {
            Some(mut process) => {
                process.abort_readiness();
                let outcome = self.shut_down(&mut process, graceful).await;
                process.abort_tasks();
                (outcome, process.exit_info().and_then(|exit| exit.code))
            }
            None => {
                warn!("No process attached while stopping, marking stopped");
                (StopOutcome::Forced, None)
            }
        };

        lifecycle.status.pid = None;
        lifecycle.status.started_at = None;
        lifecycle.status.last_stopped = Some(Utc::now());
        self.transition(&mut lifecycle, ServerState::Stopped).await?;

        info!(
            "Server '{}' stopped ({}, exit code {:?})",
            self.inner.config.name, outcome, exit_code
        );
        Ok(outcome)
    }

    /// Write a console line to a running server.
    pub(crate) async fn write_command(&self, line: &str) -> SupervisorResult<()> {
        let mut lifecycle = self.inner.lifecycle.lock().await;

        let state = lifecycle.status.state;
        if state != ServerState::Running {
            return Err(SupervisorError::not_running(state));
        }

        let timeout = Duration::from_millis(self.inner.config.command_write_timeout_ms);
        match lifecycle.process.as_mut() {
            Some(process) => process.write_line(line, timeout).await,
            None => Err(SupervisorError::not_running(state)),
        }
    }

    async fn transition(
        &self,
        lifecycle: &mut Lifecycle,
        next: ServerState,
    ) -> SupervisorResult<()> {
        let from = lifecycle.status.state;
        from.transition_to(next)
            .map_err(|_| SupervisorError::InvalidTransition {
                from,
                to: next,
                location: ErrorLocation::from(Location::caller()),
            })?;

        if matches!(next, ServerState::Stopped | ServerState::Crashed) {
            self.inner.broadcaster.clear_stats().await;
        }

        lifecycle.status.state = next;
        self.inner.status_tx.send_replace(lifecycle.status.clone());

        self.inner
            .broadcaster
            .publish(ServerEvent::StatusChanged {
                instance_id: self.inner.instance_id,
                from,
                to: next,
                at: Utc::now(),
            })
            .await;

        info!("Server '{}': {} -> {}", self.inner.config.name, from, next);
        Ok(())
    }

    async fn launch(&self) -> SupervisorResult<ProcessHandle> {
        let config = &self.inner.config;

        config
            .validate()
            .map_err(|e| SupervisorError::launch(e.to_string()))?;

        let working_dir = config.working_dir();
        tokio::fs::create_dir_all(&working_dir).await.map_err(|e| {
            SupervisorError::launch_io(
                format!("cannot create working directory {}", working_dir.display()),
                e,
            )
        })?;

        if config.accept_eula {
            tokio::fs::write(working_dir.join("eula.txt"), "eula=true\n")
                .await
                .map_err(|e| SupervisorError::launch_io("cannot write eula.txt", e))?;
        }

        self.write_game_port(&working_dir).await?;

        if config.check_port {
            port_check::ensure_port_available(config.game_port)?;
        }

        let command_line = config.command_line();
        let (program, args) = command_line
            .split_first()
            .ok_or_else(|| SupervisorError::launch("empty command line"))?;

        debug!("Spawning {} in {}", command_line.join(" "), working_dir.display());

        let mut child = Command::new(program)
            .args(args)
            .current_dir(&working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SupervisorError::launch_io(format!("cannot spawn '{}'", program), e))?;

        let (Some(stdin), Some(stdout), Some(stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            return Err(SupervisorError::launch("child process stdio was not captured"));
        };

        let run_id = self.inner.run_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let run = Arc::new(RunContext::new(run_id, child.id()));
        let readiness = self.inner.options.readiness.clone();

        let tails = vec![
            output_tail::spawn(
                stdout,
                LogStream::Stdout,
                self.inner.broadcaster.clone(),
                Arc::clone(&run),
                readiness.clone(),
            ),
            output_tail::spawn(
                stderr,
                LogStream::Stderr,
                self.inner.broadcaster.clone(),
                Arc::clone(&run),
                readiness,
            ),
        ];

        let (kill_tx, kill_rx) = oneshot::channel();
        let (exit_tx, exit_rx) = watch::channel(None);

        tokio::spawn(self.clone().watch_process(child, run_id, kill_rx, exit_tx, tails));

        let mut process = ProcessHandle::new(Arc::clone(&run), Box::new(stdin), kill_tx, exit_rx);
        process.set_readiness_task(tokio::spawn(self.clone().await_readiness(Arc::clone(&run))));

        let stats = &self.inner.options.stats;
        if stats.enabled {
            process.set_stats_task(stats_poller::spawn(
                Duration::from_secs(stats.poll_interval_secs),
                Arc::clone(&self.inner.options.probe),
                self.inner.broadcaster.clone(),
                run,
            ));
        }

        Ok(process)
    }

    /// Point `server-port` in `server.properties` at the configured game port.
    async fn write_game_port(&self, working_dir: &Path) -> SupervisorResult<()> {
        let port = self.inner.config.game_port;
        let path = working_dir.join(SERVER_PROPERTIES_FILE);

        let existing = ServerProperties::load(&path)
            .await
            .map_err(|e| SupervisorError::launch_io("cannot read server.properties", e))?;

        let mut properties = existing
            .clone()
            .unwrap_or_else(|| ServerProperties::defaults(port));
        properties.set(SERVER_PORT_KEY, port.to_string());
        if existing.as_ref() == Some(&properties) {
            return Ok(());
        }

        properties
            .save(&path)
            .await
            .map_err(|e| SupervisorError::launch_io("cannot write server.properties", e))?;

        debug!("Wrote {} with server-port={}", path.display(), port);
        Ok(())
    }

    async fn await_readiness(self, run: Arc<RunContext>) {
        let timeout = Duration::from_secs(self.inner.config.startup_timeout_secs);

        if tokio::time::timeout(timeout, run.wait_ready()).await.is_err() {
            warn!(
                "No readiness marker from '{}' within {}s, assuming it is running",
                self.inner.config.name, self.inner.config.startup_timeout_secs
            );
        }

        let mut lifecycle = self.inner.lifecycle.lock().await;

        let current = lifecycle
            .process
            .as_ref()
            .is_some_and(|process| process.run_id() == run.run_id);
        if !current || lifecycle.status.state != ServerState::Starting {
            return;
        }

        lifecycle.status.last_started = Some(Utc::now());
        if let Err(e) = self.transition(&mut lifecycle, ServerState::Running).await {
            error!("Failed to mark server running: {}", e);
        }
    }

    async fn watch_process(
        self,
        mut child: Child,
        run_id: u64,
        kill_rx: oneshot::Receiver<()>,
        exit_tx: watch::Sender<Option<ExitInfo>>,
        tails: Vec<JoinHandle<()>>,
    ) {
        let status = tokio::select! {
            status = child.wait() => status,
            _ = kill_rx => {
                if let Err(e) = child.start_kill() {
                    warn!("Failed to kill server process: {}", e);
                }
                child.wait().await
            }
        };

        let code = match status {
            Ok(status) => status.code(),
            Err(e) => {
                warn!("Failed to wait for server process: {}", e);
                None
            }
        };

        debug!("Run {} exited with code {:?}", run_id, code);
        exit_tx.send_replace(Some(ExitInfo { code }));

        // Let the last lines land in the buffer before a crash is reported
        for tail in tails {
            if tokio::time::timeout(TAIL_DRAIN_TIMEOUT, tail).await.is_err() {
                debug!("Output of run {} still open after exit", run_id);
            }
        }

        self.handle_exit(run_id, code).await;
    }

    async fn handle_exit(&self, run_id: u64, exit_code: Option<i32>) {
        let report = {
            let mut lifecycle = self.inner.lifecycle.lock().await;

            let current = lifecycle
                .process
                .as_ref()
                .is_some_and(|process| process.run_id() == run_id);
            let state = lifecycle.status.state;
            if !current || !matches!(state, ServerState::Starting | ServerState::Running) {
                // Exit requested through stop()
                return;
            }

            let uptime_secs = match lifecycle.process.take() {
                Some(mut process) => {
                    process.abort_tasks();
                    process.run.uptime_secs()
                }
                None => 0,
            };

            let at = Utc::now();
            lifecycle.status.pid = None;
            lifecycle.status.started_at = None;
            lifecycle.status.last_stopped = Some(at);

            if let Err(e) = self.transition(&mut lifecycle, ServerState::Crashed).await {
                error!("Failed to record crash: {}", e);
                return;
            }

            error!(
                "Server '{}' exited unexpectedly (exit code {:?}, up {}s)",
                self.inner.config.name, exit_code, uptime_secs
            );

            self.inner
                .broadcaster
                .publish(ServerEvent::Crashed {
                    instance_id: self.inner.instance_id,
                    exit_code,
                    at,
                })
                .await;

            CrashReport {
                instance_id: self.inner.instance_id,
                instance_name: self.inner.config.name.clone(),
                exit_code,
                uptime_secs,
                at,
            }
        };

        let listeners: Vec<Arc<dyn CrashListener>> = self
            .inner
            .crash_listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        for listener in listeners {
            listener.on_crash(&report).await;
        }
    }

    async fn shut_down(&self, process: &mut ProcessHandle, graceful: bool) -> StopOutcome {
        let config = &self.inner.config;

        if process.has_exited() {
            debug!("Process already exited before stop");
            return StopOutcome::Graceful;
        }

        if graceful {
            let write_timeout = Duration::from_millis(config.command_write_timeout_ms);
            match process.write_line(&config.stop_command, write_timeout).await {
                Ok(()) => {
                    info!("Sent '{}' to server, waiting for exit", config.stop_command);
                    if process
                        .wait_exit(Duration::from_secs(config.shutdown_timeout_secs))
                        .await
                    {
                        return StopOutcome::Graceful;
                    }
                    warn!(
                        "Server did not exit within {}s of '{}'",
                        config.shutdown_timeout_secs, config.stop_command
                    );
                }
                Err(e) => warn!("Could not send stop command: {}", e),
            }
        }

        let kill_timeout = Duration::from_secs(config.kill_timeout_secs);

        if process.terminate() {
            info!("Sent SIGTERM to pid {:?}", process.pid());
            if process.wait_exit(kill_timeout).await {
                return StopOutcome::Terminated;
            }
        }

        info!("Force killing server process (pid {:?})", process.pid());
        process.kill();
        if !process.wait_exit(kill_timeout).await {
            error!(
                "Server process {:?} still alive {}s after kill",
                process.pid(),
                config.kill_timeout_secs
            );
        }

        StopOutcome::Forced
    }
}

impl Clone for ProcessSupervisor {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

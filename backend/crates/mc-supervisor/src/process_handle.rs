use crate::{Result as SupervisorResult, SupervisorError};
use crate::run_context::RunContext;

use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

/// Exit of the supervised process as seen by its watcher task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExitInfo {
    pub code: Option<i32>,
}

/// Owning handle to one spawned server process and its helper tasks.
pub(crate) struct ProcessHandle {
    pub run: Arc<RunContext>,
    stdin: Box<dyn AsyncWrite + Send + Unpin>,
    kill_tx: Option<oneshot::Sender<()>>,
    exit_rx: watch::Receiver<Option<ExitInfo>>,
    readiness_task: Option<JoinHandle<()>>,
    stats_task: Option<JoinHandle<()>>,
}

impl ProcessHandle {
    pub fn new(
        run: Arc<RunContext>,
        stdin: Box<dyn AsyncWrite + Send + Unpin>,
        kill_tx: oneshot::Sender<()>,
        exit_rx: watch::Receiver<Option<ExitInfo>>,
    ) -> Self {
        Self {
            run,
            stdin,
            kill_tx: Some(kill_tx),
            exit_rx,
            readiness_task: None,
            stats_task: None,
        }
    }

    pub fn run_id(&self) -> u64 {
        self.run.run_id
    }

    pub fn pid(&self) -> Option<u32> {
        self.run.pid
    }

    pub fn set_readiness_task(&mut self, task: JoinHandle<()>) {
        self.readiness_task = Some(task);
    }

    pub fn set_stats_task(&mut self, task: JoinHandle<()>) {
        self.stats_task = Some(task);
    }

    /// Write one console line to stdin, bounded by `timeout`.
    pub async fn write_line(&mut self, line: &str, timeout: Duration) -> SupervisorResult<()> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');

        let stdin = &mut self.stdin;
        let write = async move {
            stdin.write_all(&bytes).await?;
            stdin.flush().await
        };

        match tokio::time::timeout(timeout, write).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(SupervisorError::command_write(e.to_string())),
            Err(_) => Err(SupervisorError::command_write(format!(
                "stdin write timed out after {}ms",
                timeout.as_millis()
            ))),
        }
    }

    pub fn has_exited(&self) -> bool {
        self.exit_rx.borrow().is_some()
    }

    pub fn exit_info(&self) -> Option<ExitInfo> {
        *self.exit_rx.borrow()
    }

    /// Wait up to `timeout` for the process to exit. True once it has.
    pub async fn wait_exit(&mut self, timeout: Duration) -> bool {
        let exited = tokio::time::timeout(timeout, self.exit_rx.wait_for(|exit| exit.is_some()))
            .await
            .is_ok_and(|result| result.is_ok());

        exited || self.has_exited()
    }

    /// Ask the process to terminate. False when no signal could be sent.
    #[cfg(unix)]
    pub fn terminate(&self) -> bool {
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        let Some(pid) = self.pid() else {
            return false;
        };

        match kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to send SIGTERM to pid {}: {}", pid, e);
                false
            }
        }
    }

    #[cfg(not(unix))]
    pub fn terminate(&self) -> bool {
        false
    }

    /// Have the watcher task kill the process.
    pub fn kill(&mut self) {
        if let Some(kill_tx) = self.kill_tx.take() {
            // Err means the watcher already saw the exit.
            let _ = kill_tx.send(());
        }
    }

    pub fn abort_readiness(&mut self) {
        if let Some(task) = self.readiness_task.take() {
            task.abort();
        }
    }

    pub fn abort_tasks(&mut self) {
        self.abort_readiness();
        if let Some(task) = self.stats_task.take() {
            task.abort();
        }
    }
}

use crate::{EventBroadcaster, ReadinessProbe};
use crate::run_context::RunContext;

use mc_core::{LogStream, ServerEvent};

use std::sync::Arc;

use log::{debug, warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;

/// Forward every line of one output stream into the broadcaster.
///
/// The task ends at EOF, which the process closes on exit.
pub(crate) fn spawn<R>(
    reader: R,
    stream: LogStream,
    broadcaster: EventBroadcaster,
    run: Arc<RunContext>,
    readiness: ReadinessProbe,
) -> JoinHandle<()>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    broadcaster.publish_line(&line, stream).await;

                    if run.observe_line(&line) {
                        broadcaster
                            .publish(ServerEvent::Stats {
                                snapshot: run.snapshot(),
                            })
                            .await;
                    }

                    if stream == LogStream::Stdout && !run.is_ready() && readiness.is_ready(&line)
                    {
                        debug!("Readiness marker seen on run {}", run.run_id);
                        run.mark_ready();
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read server {}: {}", stream, e);
                    break;
                }
            }
        }

        debug!("Server {} closed for run {}", stream, run.run_id);
    })
}

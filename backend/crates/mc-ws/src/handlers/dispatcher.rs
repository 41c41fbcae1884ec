use crate::{ClientMessage, HandlerContext, ServerMessage, create_request_span};

use mc_core::CommandRequest;

use std::time::{Duration, Instant};

use log::{info, warn};
use tracing::Instrument;
use uuid::Uuid;

/// Log entries returned when a request does not name a limit
pub const DEFAULT_LOG_LIMIT: usize = 50;

const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Answer one client frame.
pub async fn dispatch(msg: ClientMessage, ctx: HandlerContext) -> ServerMessage {
    let operation = msg.message_type();
    let started = Instant::now();
    let span = create_request_span(&ctx.connection_id.to_string(), &ctx.user_id, operation);

    let response = tokio::time::timeout(DISPATCH_TIMEOUT, dispatch_inner(msg, ctx.clone()))
        .instrument(span)
        .await;

    let response = match response {
        Ok(response) => response,
        Err(_elapsed) => {
            warn!(
                "{} {} timed out after {}s",
                ctx.log_prefix(),
                operation,
                DISPATCH_TIMEOUT.as_secs()
            );
            ServerMessage::Error {
                code: String::from("TIMEOUT"),
                message: String::from("Request timed out. Please try again."),
            }
        }
    };

    ctx.metrics.message_latency(started.elapsed());
    response
}

async fn dispatch_inner(msg: ClientMessage, ctx: HandlerContext) -> ServerMessage {
    match msg {
        ClientMessage::RequestLogs { limit } => {
            let limit = limit.unwrap_or(DEFAULT_LOG_LIMIT);
            ServerMessage::ServerLogs {
                entries: ctx.supervisor.broadcaster().recent_logs(limit).await,
            }
        }
        ClientMessage::RequestStats => ServerMessage::ServerStats {
            snapshot: ctx.supervisor.broadcaster().latest_stats().await,
        },
        ClientMessage::RequestStatus => ServerMessage::ServerStatus {
            status: ctx.supervisor.status(),
        },
        ClientMessage::SendCommand {
            command,
            correlation_id,
        } => send_command(command, correlation_id, &ctx).await,
    }
}

async fn send_command(
    command: String,
    correlation_id: Option<Uuid>,
    ctx: &HandlerContext,
) -> ServerMessage {
    let mut request = CommandRequest::new(command, ctx.user_id.clone());
    if let Some(correlation_id) = correlation_id {
        request = request.with_correlation_id(correlation_id);
    }
    let correlation_id = request.correlation_id;
    let command = request.command.clone();

    match ctx.gateway.submit_request(request).await {
        Ok(ack) => {
            ctx.metrics.command_submitted("accepted");
            info!("{} command '{}' accepted", ctx.log_prefix(), ack.command);
            ServerMessage::CommandResult {
                correlation_id,
                success: true,
                command,
                message: String::from("Command sent"),
                code: None,
            }
        }
        Err(e) => {
            let code = e.error_code();
            ctx.metrics.command_submitted(&code.to_lowercase());
            warn!("{} command '{}' failed: {}", ctx.log_prefix(), command, e);
            ServerMessage::CommandResult {
                correlation_id,
                success: false,
                command,
                message: e.to_string(),
                code: Some(code.to_string()),
            }
        }
    }
}

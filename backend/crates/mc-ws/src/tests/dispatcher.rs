use crate::{
    ClientMessage, ConnectionId, DEFAULT_LOG_LIMIT, HandlerContext, Metrics, ServerMessage,
    dispatch,
};

use mc_config::{BroadcastConfig, CommandConfig, InstanceConfig, StatsConfig};
use mc_core::{LogStream, ServerState};
use mc_supervisor::{
    AllowListValidator, CommandGateway, EventBroadcaster, ProcessSupervisor, SupervisorOptions,
};

use std::sync::Arc;

use googletest::prelude::*;
use uuid::Uuid;

fn stopped_context() -> HandlerContext {
    let config = InstanceConfig::default();
    let stats = StatsConfig {
        enabled: false,
        ..StatsConfig::default()
    };
    let options = SupervisorOptions::from_config(&config, &stats);
    let supervisor =
        ProcessSupervisor::new(config, EventBroadcaster::new(&BroadcastConfig::default()), options);
    let validator = Arc::new(AllowListValidator::from_config(&CommandConfig::default()));
    let gateway = CommandGateway::new(supervisor.clone(), validator);

    HandlerContext {
        connection_id: ConnectionId::new(),
        user_id: String::from("alice"),
        supervisor,
        gateway,
        metrics: Metrics::new(),
    }
}

#[tokio::test]
async fn given_stopped_server_when_status_requested_then_stopped_reported() {
    let ctx = stopped_context();

    let response = dispatch(ClientMessage::RequestStatus, ctx).await;

    match response {
        ServerMessage::ServerStatus { status } => {
            assert_eq!(status.state, ServerState::Stopped);
            assert_that!(status.pid, none());
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[tokio::test]
async fn given_stopped_server_when_command_sent_then_not_running_result() {
    // Given
    let ctx = stopped_context();
    let correlation_id = Uuid::new_v4();

    // When
    let response = dispatch(
        ClientMessage::SendCommand {
            command: String::from("list"),
            correlation_id: Some(correlation_id),
        },
        ctx,
    )
    .await;

    // Then
    match response {
        ServerMessage::CommandResult {
            correlation_id: echoed,
            success,
            code,
            command,
            ..
        } => {
            assert_eq!(echoed, correlation_id);
            assert!(!success);
            assert_that!(code.as_deref(), some(eq("NOT_RUNNING")));
            assert_that!(command, eq("list"));
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[tokio::test]
async fn given_buffered_lines_when_logs_requested_then_newest_returned_in_order() {
    // Given
    let ctx = stopped_context();
    let broadcaster = ctx.supervisor.broadcaster().clone();
    for i in 0..(DEFAULT_LOG_LIMIT + 5) {
        broadcaster
            .publish_line(&format!("line {}", i), LogStream::Stdout)
            .await;
    }

    // When
    let response = dispatch(ClientMessage::RequestLogs { limit: None }, ctx).await;

    // Then
    match response {
        ServerMessage::ServerLogs { entries } => {
            assert_that!(entries.len(), eq(DEFAULT_LOG_LIMIT));
            assert_that!(entries[0].message, eq("line 5"));
            assert!(entries.windows(2).all(|w| w[0].sequence < w[1].sequence));
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[tokio::test]
async fn given_no_stats_yet_when_stats_requested_then_snapshot_absent() {
    let ctx = stopped_context();

    let response = dispatch(ClientMessage::RequestStats, ctx).await;

    assert_eq!(response, ServerMessage::ServerStats { snapshot: None });
}

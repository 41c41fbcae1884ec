//! Server lifecycle REST handlers

use crate::{
    ApiError, ApiResult, CommandResponse, LogsQuery, LogsResponse, PlayersResponse,
    SendCommandRequest, ServerConfigResponse, StartResponse, StatsResponse, StatusResponse,
    StopRequest, StopResponse, UpdateConfigRequest, UpdateConfigResponse, UserId,
};

use mc_core::CommandRequest;
use mc_supervisor::StopOutcome;
use mc_ws::{AppState, DEFAULT_LOG_LIMIT};

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
};
use log::info;

/// GET /api/server/status
pub async fn get_status(State(state): State<AppState>) -> ApiResult<Json<StatusResponse>> {
    let broadcaster = state.supervisor.broadcaster();

    Ok(Json(StatusResponse {
        status: state.supervisor.status(),
        logs: broadcaster.recent_logs(DEFAULT_LOG_LIMIT).await,
        stats: broadcaster.latest_stats().await,
    }))
}

/// GET /api/server/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    Ok(Json(StatsResponse {
        stats: state.supervisor.broadcaster().latest_stats().await,
    }))
}

/// GET /api/server/players
///
/// Players from the latest snapshot; empty while the server is not live.
pub async fn get_players(State(state): State<AppState>) -> ApiResult<Json<PlayersResponse>> {
    let players = if state.supervisor.state().is_live() {
        state
            .supervisor
            .broadcaster()
            .latest_stats()
            .await
            .map(|snapshot| snapshot.players)
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    Ok(Json(PlayersResponse::from(players)))
}

/// GET /api/server/logs?limit=N
pub async fn get_logs(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> ApiResult<Json<LogsResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_LOG_LIMIT);
    let entries = state.supervisor.broadcaster().recent_logs(limit).await;

    Ok(Json(LogsResponse::from(entries)))
}

/// POST /api/server/start
///
/// Returns once the process is spawned; readiness is reported through
/// `status_changed` events.
pub async fn start_server(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> ApiResult<Json<StartResponse>> {
    info!("Start requested by {}", user_id);
    state.supervisor.start().await?;

    Ok(Json(StartResponse {
        success: true,
        message: String::from("Server starting"),
        state: state.supervisor.state(),
    }))
}

/// POST /api/server/stop
pub async fn stop_server(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    body: Bytes,
) -> ApiResult<Json<StopResponse>> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        StopRequest::default()
    } else {
        serde_json::from_slice::<StopRequest>(&body)
            .map_err(|e| ApiError::bad_request(format!("Invalid stop request: {}", e)))?
    };

    info!(
        "Stop requested by {} (graceful: {})",
        user_id, request.graceful
    );
    let outcome = state.supervisor.stop(request.graceful).await?;

    let message = match outcome {
        StopOutcome::AlreadyStopped => "Server was not running",
        StopOutcome::Acknowledged => "Crash acknowledged",
        StopOutcome::Graceful => "Server stopped",
        StopOutcome::Terminated => "Server terminated",
        StopOutcome::Forced => "Server killed",
    };

    Ok(Json(StopResponse {
        success: true,
        message: String::from(message),
        outcome,
        state: state.supervisor.state(),
    }))
}

/// POST /api/server/command
pub async fn send_command(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(body): Json<SendCommandRequest>,
) -> ApiResult<Json<CommandResponse>> {
    let mut request = CommandRequest::new(body.command, user_id);
    if let Some(correlation_id) = body.correlation_id {
        request = request.with_correlation_id(correlation_id);
    }

    let ack = state
        .gateway
        .submit_request(request)
        .await
        .inspect_err(|e| {
            state
                .metrics
                .command_submitted(&e.error_code().to_lowercase())
        })?;
    state.metrics.command_submitted("accepted");

    Ok(Json(CommandResponse::from(ack)))
}

/// GET /api/server/config
pub async fn get_server_config(
    State(state): State<AppState>,
) -> ApiResult<Json<ServerConfigResponse>> {
    let config = state.supervisor.server_properties().await?;

    Ok(Json(ServerConfigResponse {
        config: config.to_map(),
        default_config: state.supervisor.default_server_properties().to_map(),
    }))
}

/// POST /api/server/config
///
/// Merges the given keys into `server.properties`. The server picks them up
/// on its next start.
pub async fn update_server_config(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(body): Json<UpdateConfigRequest>,
) -> ApiResult<Json<UpdateConfigResponse>> {
    let updates = body.into_properties()?;
    if updates.is_empty() {
        return Err(ApiError::bad_request("No configuration provided"));
    }

    info!(
        "Server config update by {}: {}",
        user_id,
        updates.keys().cloned().collect::<Vec<_>>().join(", ")
    );
    let properties = state.supervisor.update_server_properties(updates).await?;

    Ok(Json(UpdateConfigResponse {
        success: true,
        message: String::from("Server configuration updated, applies on next start"),
        config: properties.to_map(),
    }))
}

use crate::{
    ConnectionConfig, ConnectionId, ConnectionRegistry, Metrics, ShutdownCoordinator,
    WebSocketConnection, extract_user_id,
};

use mc_supervisor::{CommandGateway, ProcessSupervisor};

use std::collections::HashMap;

use axum::{
    extract::{
        Query, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode},
    response::Response,
};
use log::{debug, error, info, warn};
use metrics_exporter_prometheus::PrometheusHandle;

/// Shared application state for the console stream and REST handlers
#[derive(Clone)]
pub struct AppState {
    pub supervisor: ProcessSupervisor,
    pub gateway: CommandGateway,
    pub registry: ConnectionRegistry,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
    /// Attribution for clients that do not identify themselves
    pub default_user_id: String,
    /// Renders `/metrics`; absent when no recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

/// WebSocket upgrade handler
pub async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let user_id = extract_user_id(&headers, &params, &state.default_user_id).map_err(|e| {
        warn!("Rejected console upgrade: {}", e);
        StatusCode::BAD_REQUEST
    })?;
    debug!("WebSocket upgrade request from user {}", user_id);

    // Register connection (enforces connection limits)
    let connection_id = state
        .registry
        .register(user_id.clone())
        .await
        .map_err(|e| {
            error!("Failed to register connection: {}", e);
            state.metrics.connection_rejected();
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    let max_message_bytes = state.config.max_message_bytes;

    Ok(ws
        .max_message_size(max_message_bytes)
        .on_upgrade(move |socket| handle_socket(socket, connection_id, user_id, state)))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(
    socket: WebSocket,
    connection_id: ConnectionId,
    user_id: String,
    state: AppState,
) {
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(
        connection_id,
        user_id,
        state.config.clone(),
        state.metrics.clone(),
        state.supervisor.clone(),
        state.gateway.clone(),
    );

    let result = connection.handle(socket, shutdown_guard).await;

    // Unregister on disconnect
    state.registry.unregister(connection_id).await;

    match result {
        Ok(()) => info!("Connection {connection_id} finished"),
        Err(e) => error!("Connection {connection_id} error: {e}"),
    }
}

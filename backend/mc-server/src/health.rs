use mc_ws::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - controller health with the supervised instance's state
pub async fn health_check(State(state): State<AppState>) -> Response {
    let status = state.supervisor.status();

    let health = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "instance": {
            "name": status.name,
            "state": status.state,
            "uptime_secs": status.uptime_secs,
        },
        "components": {
            "websocket": {
                "connections": state.registry.total_count().await,
            },
            "broadcaster": {
                "subscribers": state.supervisor.broadcaster().subscriber_count(),
            },
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - liveness probe (is the process alive?)
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - readiness probe
///
/// The controller accepts traffic whether or not the game server runs.
pub async fn readiness_check() -> Response {
    (StatusCode::OK, "Ready").into_response()
}

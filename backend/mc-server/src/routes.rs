use crate::{
    admin, get_logs, get_players, get_server_config, get_stats, get_status, health, prometheus,
    send_command, start_server, stop_server, update_server_config,
};

use mc_ws::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Console stream
        .route("/ws", get(mc_ws::handler))
        // Server lifecycle
        .route("/api/server/status", get(get_status))
        .route("/api/server/stats", get(get_stats))
        .route("/api/server/players", get(get_players))
        .route("/api/server/logs", get(get_logs))
        .route("/api/server/start", post(start_server))
        .route("/api/server/stop", post(stop_server))
        .route("/api/server/command", post(send_command))
        .route(
            "/api/server/config",
            get(get_server_config).post(update_server_config),
        )
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(prometheus::metrics_handler))
        // Admin endpoints
        .route("/admin/shutdown", post(admin::shutdown_handler))
        .with_state(state)
        // CORS middleware (the web console may be served from another origin)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

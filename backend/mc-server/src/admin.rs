//! Administrative endpoints for server management.

use mc_ws::AppState;

use axum::{extract::State, http::StatusCode};
use log::info;

/// POST /admin/shutdown
///
/// Signals the controller to shut down. Open console streams are closed and
/// the game server is stopped once the HTTP listener drains.
pub async fn shutdown_handler(State(state): State<AppState>) -> StatusCode {
    info!("Graceful shutdown requested via HTTP");
    state.shutdown.shutdown();

    StatusCode::ACCEPTED
}

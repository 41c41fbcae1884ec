pub mod app_state;
pub mod client_message;
pub mod connection_config;
pub mod connection_id;
pub mod connection_info;
pub mod connection_limits;
pub mod connection_registry;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod server_message;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod web_socket_connection;

pub use app_state::{AppState, handler};
pub use client_message::ClientMessage;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_info::ConnectionInfo;
pub use connection_limits::ConnectionLimits;
pub use connection_registry::ConnectionRegistry;
pub use error::{Result, WsError};
pub use handlers::connection::{
    MAX_USER_ID_LEN, USER_ID_HEADER, USER_ID_PARAM, extract_user_id, validate_user_id,
};
pub use handlers::context::HandlerContext;
pub use handlers::dispatcher::{DEFAULT_LOG_LIMIT, dispatch};
pub use metrics::Metrics;
pub use server_message::ServerMessage;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;

use tracing::info_span;

/// Create a tracing span for a console request.
/// All log entries within the handler will include these fields.
pub fn create_request_span(connection_id: &str, user_id: &str, operation: &str) -> tracing::Span {
    info_span!(
        "ws_request",
        connection_id = %connection_id,
        user_id = %user_id,
        operation = %operation,
    )
}

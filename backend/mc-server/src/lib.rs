pub mod admin;
pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod prometheus;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::user_id::UserId,
    server::{
        command_response::CommandResponse,
        logs_query::LogsQuery,
        logs_response::LogsResponse,
        players_response::PlayersResponse,
        send_command_request::SendCommandRequest,
        server::{
            get_logs, get_players, get_server_config, get_stats, get_status, send_command,
            start_server, stop_server, update_server_config,
        },
        server_config_response::ServerConfigResponse,
        start_response::StartResponse,
        stats_response::StatsResponse,
        status_response::StatusResponse,
        stop_request::StopRequest,
        stop_response::StopResponse,
        update_config_request::UpdateConfigRequest,
        update_config_response::UpdateConfigResponse,
    },
};

pub use crate::routes::build_router;

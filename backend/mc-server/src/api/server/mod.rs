pub mod command_response;
pub mod logs_query;
pub mod logs_response;
pub mod players_response;
pub mod send_command_request;
pub mod server;
pub mod server_config_response;
pub mod start_response;
pub mod stats_response;
pub mod status_response;
pub mod stop_request;
pub mod stop_response;
pub mod update_config_request;
pub mod update_config_response;

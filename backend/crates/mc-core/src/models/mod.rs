pub mod command_ack;
pub mod command_request;
pub mod instance_id;
pub mod instance_status;
pub mod log_entry;
pub mod log_severity;
pub mod log_stream;
pub mod player_info;
pub mod server_event;
pub mod server_state;
pub mod severity_rules;
pub mod stat_snapshot;

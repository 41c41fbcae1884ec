pub mod error;
pub mod models;

pub use error::{CoreError, Result as CoreResult};
pub use models::command_ack::CommandAck;
pub use models::command_request::CommandRequest;
pub use models::instance_id::InstanceId;
pub use models::instance_status::InstanceStatus;
pub use models::log_entry::LogEntry;
pub use models::log_severity::LogSeverity;
pub use models::log_stream::LogStream;
pub use models::player_info::PlayerInfo;
pub use models::server_event::ServerEvent;
pub use models::server_state::ServerState;
pub use models::severity_rules::SeverityRules;
pub use models::stat_snapshot::StatSnapshot;

#[cfg(test)]
mod tests;

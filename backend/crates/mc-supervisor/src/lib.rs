//! Process supervision, event fan-out and console command entry for a
//! single Minecraft server instance.

mod allow_list_validator;
mod command_gateway;
mod command_validator;
mod crash_listener;
mod error;
mod event_broadcaster;
mod log_ring;
mod output_tail;
mod player_tracker;
mod port_check;
mod process_handle;
mod process_probe;
mod process_supervisor;
mod readiness_probe;
mod run_context;
mod server_properties;
mod stats_poller;
mod stop_outcome;
mod subscription;
mod supervisor_options;
mod sysinfo_probe;

pub use allow_list_validator::AllowListValidator;
pub use command_gateway::CommandGateway;
pub use command_validator::CommandValidator;
pub use crash_listener::{CrashListener, CrashReport};
pub use error::{Result, SupervisorError};
pub use event_broadcaster::EventBroadcaster;
pub use log_ring::LogRing;
pub use player_tracker::PlayerTracker;
pub use port_check::{ensure_port_available, is_port_available};
pub use process_probe::{ProcessProbe, ProcessSample};
pub use process_supervisor::ProcessSupervisor;
pub use readiness_probe::ReadinessProbe;
pub use server_properties::{SERVER_PORT_KEY, SERVER_PROPERTIES_FILE, ServerProperties};
pub use stop_outcome::StopOutcome;
pub use subscription::{Subscription, SubscriptionToken};
pub use supervisor_options::SupervisorOptions;
pub use sysinfo_probe::SysinfoProbe;

pub use error::Result as SupervisorResult;

#[cfg(test)]
mod tests;

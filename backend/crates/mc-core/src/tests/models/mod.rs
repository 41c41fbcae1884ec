mod instance_status;
mod log_entry;
mod server_event;
mod server_state;
mod severity_rules;

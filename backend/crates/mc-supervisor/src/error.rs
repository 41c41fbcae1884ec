use mc_core::ServerState;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Failed to launch server: {message} {location}")]
    Launch {
        message: String,
        #[source]
        source: Option<std::io::Error>,
        location: ErrorLocation,
    },

    #[error("Server is already {state} {location}")]
    AlreadyRunning {
        state: ServerState,
        location: ErrorLocation,
    },

    #[error("Server is not running (state: {state}) {location}")]
    NotRunning {
        state: ServerState,
        location: ErrorLocation,
    },

    #[error("Command rejected: {reason} {location}")]
    Rejected {
        command: String,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Failed to write to server console: {message} {location}")]
    CommandWrite {
        message: String,
        location: ErrorLocation,
    },

    #[error("Illegal state transition {from} -> {to} {location}")]
    InvalidTransition {
        from: ServerState,
        to: ServerState,
        location: ErrorLocation,
    },

    #[error("Stats sampling failed: {message} {location}")]
    Stats {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid server property '{key}': {reason} {location}")]
    InvalidProperty {
        key: String,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Failed to access server.properties: {message} {location}")]
    Properties {
        message: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl SupervisorError {
    /// Create a launch error without an underlying IO cause
    #[track_caller]
    pub fn launch<S: Into<String>>(message: S) -> Self {
        Self::Launch {
            message: message.into(),
            source: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a launch error wrapping an IO failure
    #[track_caller]
    pub fn launch_io<S: Into<String>>(message: S, source: std::io::Error) -> Self {
        Self::Launch {
            message: format!("{}: {}", message.into(), source),
            source: Some(source),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_running(state: ServerState) -> Self {
        Self::NotRunning {
            state,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn rejected<C: Into<String>, R: Into<String>>(command: C, reason: R) -> Self {
        Self::Rejected {
            command: command.into(),
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn command_write<S: Into<String>>(message: S) -> Self {
        Self::CommandWrite {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn stats<S: Into<String>>(message: S) -> Self {
        Self::Stats {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_property<K: Into<String>, R: Into<String>>(key: K, reason: R) -> Self {
        Self::InvalidProperty {
            key: key.into(),
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn properties_io<S: Into<String>>(message: S, source: std::io::Error) -> Self {
        Self::Properties {
            message: format!("{}: {}", message.into(), source),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Machine-readable code for API clients
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Launch { .. } => "LAUNCH_ERROR",
            Self::AlreadyRunning { .. } => "ALREADY_RUNNING",
            Self::NotRunning { .. } => "NOT_RUNNING",
            Self::Rejected { .. } => "REJECTED",
            Self::CommandWrite { .. } => "COMMAND_WRITE_FAILED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Stats { .. } => "STATS_UNAVAILABLE",
            Self::InvalidProperty { .. } => "INVALID_PROPERTY",
            Self::Properties { .. } => "PROPERTIES_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, SupervisorError>;

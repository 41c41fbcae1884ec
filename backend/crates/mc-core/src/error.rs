use crate::ServerState;

use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid server state: {value} {location}")]
    InvalidServerState {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid log severity: {value} {location}")]
    InvalidLogSeverity {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid log stream: {value} {location}")]
    InvalidLogStream {
        value: String,
        location: ErrorLocation,
    },

    #[error("Illegal state transition {from} -> {to} {location}")]
    InvalidTransition {
        from: ServerState,
        to: ServerState,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;

//! REST API error types
//!
//! Every error renders as `{ "error": { "code", "message" } }` with a
//! status code chosen by variant.

use mc_supervisor::SupervisorError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_RUNNING", "REJECTED")
    pub code: String,
    pub message: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request is well-formed but not allowed (400)
    #[error("Bad request [{code}]: {message} {location}")]
    BadRequest {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// Operation conflicts with the current server state (409)
    #[error("Conflict [{code}]: {message} {location}")]
    Conflict {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error [{code}]: {message} {location}")]
    Internal {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest {
            code: "BAD_REQUEST",
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest { code, .. }
            | Self::Conflict { code, .. }
            | Self::Internal { code, .. } => code,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the error with location for debugging
        log::error!("{}", self);

        let status = self.status_code();
        let body = match self {
            Self::BadRequest { code, message, .. }
            | Self::Conflict { code, message, .. }
            | Self::Internal { code, message, .. } => ApiErrorBody {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Map supervisor failures onto HTTP semantics
impl From<SupervisorError> for ApiError {
    #[track_caller]
    fn from(e: SupervisorError) -> Self {
        let code = e.error_code();
        let location = ErrorLocation::from(Location::caller());
        let message = client_message(&e);

        match e {
            SupervisorError::AlreadyRunning { .. }
            | SupervisorError::NotRunning { .. }
            | SupervisorError::InvalidTransition { .. } => Self::Conflict {
                code,
                message,
                location,
            },
            SupervisorError::Rejected { .. } | SupervisorError::InvalidProperty { .. } => {
                Self::BadRequest {
                    code,
                    message,
                    location,
                }
            }
            SupervisorError::Launch { .. }
            | SupervisorError::CommandWrite { .. }
            | SupervisorError::Stats { .. }
            | SupervisorError::Properties { .. } => Self::Internal {
                code,
                message,
                location,
            },
        }
    }
}

/// Error text without the source location suffix
fn client_message(e: &SupervisorError) -> String {
    match e {
        SupervisorError::Launch { message, .. } => format!("Failed to start server: {}", message),
        SupervisorError::AlreadyRunning { state, .. } => {
            format!("Server is already {}", state)
        }
        SupervisorError::NotRunning { state, .. } => {
            format!("Server is not running (state: {})", state)
        }
        SupervisorError::Rejected {
            command, reason, ..
        } => format!("Command '{}' rejected: {}", command, reason),
        SupervisorError::CommandWrite { message, .. } => {
            format!("Failed to send command: {}", message)
        }
        SupervisorError::InvalidTransition { from, to, .. } => {
            format!("Cannot go from {} to {}", from, to)
        }
        SupervisorError::Stats { message, .. } => format!("Stats unavailable: {}", message),
        SupervisorError::InvalidProperty { key, reason, .. } => {
            format!("Invalid server property '{}': {}", key, reason)
        }
        SupervisorError::Properties { message, .. } => {
            format!("Server configuration unavailable: {}", message)
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

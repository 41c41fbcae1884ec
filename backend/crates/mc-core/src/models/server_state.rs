use crate::{CoreError, CoreResult};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a supervised server instance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ServerState {
    Stopped,
    Starting,
    Running,
    Stopping,
    Crashed,
}

impl ServerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Crashed => "crashed",
        }
    }

    /// True while an OS process is (or may still be) attached to the instance.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Starting | Self::Running | Self::Stopping)
    }

    /// True when `start()` is permitted from this state.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Stopped | Self::Crashed)
    }

    /// Whether the state machine allows moving from `self` to `next`.
    ///
    /// `Starting -> Stopped` covers a launch that failed after the state was
    /// published; `Crashed -> Stopped` is the user acknowledging a crash.
    pub fn can_transition_to(&self, next: ServerState) -> bool {
        use ServerState::*;

        matches!(
            (self, next),
            (Stopped, Starting)
                | (Crashed, Starting)
                | (Crashed, Stopped)
                | (Starting, Running)
                | (Starting, Stopping)
                | (Starting, Stopped)
                | (Starting, Crashed)
                | (Running, Stopping)
                | (Running, Crashed)
                | (Stopping, Stopped)
                | (Stopping, Crashed)
        )
    }

    /// Validate a transition, returning an error naming both ends.
    #[track_caller]
    pub fn transition_to(&self, next: ServerState) -> CoreResult<ServerState> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                from: *self,
                to: next,
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerState {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "stopped" => Ok(Self::Stopped),
            "starting" => Ok(Self::Starting),
            "running" => Ok(Self::Running),
            "stopping" => Ok(Self::Stopping),
            "crashed" => Ok(Self::Crashed),
            _ => Err(CoreError::InvalidServerState {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

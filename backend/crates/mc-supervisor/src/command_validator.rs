use crate::Result as SupervisorResult;

use mc_core::CommandRequest;

/// Policy deciding which console commands a user may run.
///
/// Implementations return `SupervisorError::Rejected` for refused commands.
pub trait CommandValidator: Send + Sync {
    fn validate(&self, request: &CommandRequest) -> SupervisorResult<()>;
}

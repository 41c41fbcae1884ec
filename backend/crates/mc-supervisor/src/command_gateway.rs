use crate::{
    AllowListValidator, CommandValidator, ProcessSupervisor, Result as SupervisorResult,
    SupervisorError,
};

use mc_core::{CommandAck, CommandRequest, ServerState};

use std::sync::Arc;

use log::{info, warn};

/// Single entry point for user console commands.
///
/// A command is checked against the instance state first, then the
/// validator, and is written to stdin immediately. Nothing is queued.
#[derive(Clone)]
pub struct CommandGateway {
    supervisor: ProcessSupervisor,
    validator: Arc<dyn CommandValidator>,
}

impl CommandGateway {
    pub fn new(supervisor: ProcessSupervisor, validator: Arc<dyn CommandValidator>) -> Self {
        Self {
            supervisor,
            validator,
        }
    }

    pub async fn submit(&self, command: &str, user_id: &str) -> SupervisorResult<CommandAck> {
        self.submit_request(CommandRequest::new(command, user_id))
            .await
    }

    pub async fn submit_request(&self, request: CommandRequest) -> SupervisorResult<CommandAck> {
        let state = self.supervisor.state();
        if state != ServerState::Running {
            warn!(
                "Command '{}' from {} refused: server is {}",
                request.command, request.user_id, state
            );
            return Err(SupervisorError::not_running(state));
        }

        if let Err(e) = self.validator.validate(&request) {
            warn!(
                "Command '{}' from {} rejected: {}",
                request.command, request.user_id, e
            );
            return Err(e);
        }

        let line = AllowListValidator::normalize(&request.command);
        self.supervisor.write_command(line).await?;

        info!(
            "Command '{}' sent by {} [{}]",
            line, request.user_id, request.correlation_id
        );
        Ok(CommandAck::from(&request))
    }

    pub fn supervisor(&self) -> &ProcessSupervisor {
        &self.supervisor
    }
}

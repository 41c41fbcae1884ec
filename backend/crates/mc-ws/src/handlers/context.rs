use crate::{ConnectionId, Metrics};

use mc_supervisor::{CommandGateway, ProcessSupervisor};

use std::fmt;

/// Everything a handler needs to answer one client frame.
#[derive(Clone)]
pub struct HandlerContext {
    pub connection_id: ConnectionId,
    /// Identity commands are attributed to
    pub user_id: String,
    pub supervisor: ProcessSupervisor,
    pub gateway: CommandGateway,
    pub metrics: Metrics,
}

impl HandlerContext {
    pub fn log_prefix(&self) -> String {
        format!("[conn={} user={}]", self.connection_id, self.user_id)
    }
}

impl fmt::Debug for HandlerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerContext")
            .field("connection_id", &self.connection_id)
            .field("user_id", &self.user_id)
            .finish()
    }
}

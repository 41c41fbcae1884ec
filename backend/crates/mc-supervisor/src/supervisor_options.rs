use crate::{ProcessProbe, ReadinessProbe, SysinfoProbe};

use mc_config::{InstanceConfig, StatsConfig};

use std::sync::Arc;

/// Pluggable parts of a `ProcessSupervisor`.
#[derive(Clone)]
pub struct SupervisorOptions {
    pub readiness: ReadinessProbe,
    pub probe: Arc<dyn ProcessProbe>,
    pub stats: StatsConfig,
}

impl SupervisorOptions {
    /// Marker-based readiness and OS process sampling.
    pub fn from_config(instance: &InstanceConfig, stats: &StatsConfig) -> Self {
        Self {
            readiness: ReadinessProbe::from_markers(instance.ready_markers.iter().cloned()),
            probe: Arc::new(SysinfoProbe::new()),
            stats: stats.clone(),
        }
    }

    pub fn with_readiness(mut self, readiness: ReadinessProbe) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn with_probe(mut self, probe: Arc<dyn ProcessProbe>) -> Self {
        self.probe = probe;
        self
    }
}

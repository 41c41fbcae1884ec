use crate::Result as SupervisorResult;

/// Resource usage of one process at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProcessSample {
    pub memory_bytes: u64,
    pub cpu_percent: f64,
}

impl ProcessSample {
    pub fn memory_mb(&self) -> f64 {
        self.memory_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Source of per-process resource samples.
pub trait ProcessProbe: Send + Sync {
    fn sample(&self, pid: u32) -> SupervisorResult<ProcessSample>;
}

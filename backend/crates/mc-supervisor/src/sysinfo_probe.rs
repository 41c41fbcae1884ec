use crate::{ProcessProbe, ProcessSample, Result as SupervisorResult, SupervisorError};

use std::sync::Mutex;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Samples memory and CPU through the OS process table.
///
/// The `System` is kept between samples because CPU usage is computed from
/// the difference between two consecutive refreshes.
pub struct SysinfoProbe {
    system: Mutex<System>,
}

impl SysinfoProbe {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProbe for SysinfoProbe {
    fn sample(&self, pid: u32) -> SupervisorResult<ProcessSample> {
        let mut system = self
            .system
            .lock()
            .map_err(|_| SupervisorError::stats("process table lock poisoned"))?;

        let pid = Pid::from_u32(pid);
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );

        let process = system
            .process(pid)
            .ok_or_else(|| SupervisorError::stats(format!("process {} not found", pid)))?;

        Ok(ProcessSample {
            memory_bytes: process.memory(),
            cpu_percent: f64::from(process.cpu_usage()),
        })
    }
}

//! Per-phase timing and memory instrumentation.

use std::time::{Duration, Instant};

use sysinfo::System;

/// Timing and memory state captured at the end of one lifecycle phase.
#[derive(Debug, Clone)]
pub struct PhaseSnapshot {
    /// Resident set size in bytes
    pub rss_bytes: u64,
    /// Elapsed time since the probe was created
    pub elapsed: Duration,
    /// Name of the phase (e.g., "setup", "solve")
    pub phase: String,
}

/// Errors produced by phase instrumentation.
#[derive(Debug, Clone)]
pub enum ProbeError {
    ProcessNotFound { pid: u32 },
}

impl std::fmt::Display for ProbeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeError::ProcessNotFound { pid } => {
                write!(f, "failed to locate process {}", pid)
            }
        }
    }
}

impl std::error::Error for ProbeError {}

fn current_rss() -> Result<u64, ProbeError> {
    let pid = sysinfo::Pid::from(std::process::id() as usize);

    // Only refresh the current process, not the entire system.
    let mut sys = System::new();
    sys.refresh_processes_specifics(
        sysinfo::ProcessesToUpdate::Some(&[pid]),
        true,
        sysinfo::ProcessRefreshKind::nothing().with_memory(),
    );

    let process = sys.process(pid).ok_or(ProbeError::ProcessNotFound {
        pid: std::process::id(),
    })?;

    // sysinfo 0.33+ returns memory in bytes directly.
    Ok(process.memory())
}

/// Tracks wall-clock time and resident memory across named phases.
#[derive(Debug)]
pub struct PhaseProbe {
    start: Instant,
    snapshots: Vec<PhaseSnapshot>,
}

impl PhaseProbe {
    pub fn new() -> Self {
        PhaseProbe {
            start: Instant::now(),
            snapshots: Vec::new(),
        }
    }

    /// Record a snapshot marking the end of a phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the current process cannot be located.
    pub fn record(&mut self, phase: &str) -> Result<(), ProbeError> {
        let snapshot = PhaseSnapshot {
            rss_bytes: current_rss()?,
            elapsed: self.start.elapsed(),
            phase: phase.to_string(),
        };
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// All recorded snapshots, in recording order.
    pub fn snapshots(&self) -> &[PhaseSnapshot] {
        &self.snapshots
    }

    /// Duration of the most recently recorded phase: the gap between the
    /// last two snapshots, or since probe creation for the first.
    pub fn last_phase_duration(&self) -> Option<Duration> {
        let last = self.snapshots.last()?;
        match self.snapshots.len() {
            1 => Some(last.elapsed),
            n => Some(last.elapsed - self.snapshots[n - 2].elapsed),
        }
    }

    /// Memory growth across the most recently recorded phase, in bytes.
    pub fn last_memory_growth(&self) -> Option<i64> {
        if self.snapshots.len() < 2 {
            return None;
        }
        let last = &self.snapshots[self.snapshots.len() - 1];
        let prev = &self.snapshots[self.snapshots.len() - 2];
        Some(last.rss_bytes as i64 - prev.rss_bytes as i64)
    }
}

impl Default for PhaseProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::probe::{PhaseProbe, PhaseSnapshot};
    use std::time::Duration;

    #[test]
    fn test_record_captures_phase_name_and_memory() {
        let mut probe = PhaseProbe::new();
        probe.record("setup").unwrap_or_else(|err| panic!("{}", err));
        assert_eq!(probe.snapshots().len(), 1);
        assert_eq!(probe.snapshots()[0].phase, "setup");
        assert!(probe.snapshots()[0].rss_bytes > 0);
    }

    #[test]
    fn test_phase_duration_and_growth() {
        let mut probe = PhaseProbe::new();
        probe.record("setup").unwrap_or_else(|err| panic!("{}", err));
        probe.record("solve").unwrap_or_else(|err| panic!("{}", err));
        assert!(probe.last_phase_duration().is_some());
        assert!(probe.last_memory_growth().is_some());
    }

    #[test]
    fn test_growth_is_difference_of_snapshots() {
        let mut probe = PhaseProbe::new();
        probe.snapshots = vec![
            PhaseSnapshot {
                rss_bytes: 1000,
                elapsed: Duration::from_millis(5),
                phase: "setup".to_string(),
            },
            PhaseSnapshot {
                rss_bytes: 1500,
                elapsed: Duration::from_millis(9),
                phase: "solve".to_string(),
            },
        ];
        assert_eq!(probe.last_memory_growth(), Some(500));
        assert_eq!(
            probe.last_phase_duration(),
            Some(Duration::from_millis(4))
        );
    }
}

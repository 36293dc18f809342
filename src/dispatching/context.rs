//! Scheduling context for a single run.

use serde::{Deserialize, Serialize};

use crate::models::{ProcessRecord, Ticks};

/// Mutable per-run scheduler state.
///
/// Owned by exactly one tick engine for the lifetime of a run. Strategies
/// receive it read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulingContext {
    /// Current simulated tick. Starts at 0, +1 per finished tick.
    pub(crate) current_time: Ticks,
    /// Record occupying the CPU, if any.
    pub(crate) current_process: Option<ProcessRecord>,
    /// Ticks left in the running process's slice (Round Robin only).
    pub(crate) time_slice_remaining: u32,
    /// Ticks in which no process ran.
    pub(crate) total_idle_time: Ticks,
    /// Finished records in completion order.
    pub(crate) completed: Vec<ProcessRecord>,
}

impl SchedulingContext {
    /// Creates a context at tick 0 with an idle CPU.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated tick.
    pub fn current_time(&self) -> Ticks {
        self.current_time
    }

    /// Record occupying the CPU, if any.
    pub fn current_process(&self) -> Option<&ProcessRecord> {
        self.current_process.as_ref()
    }

    /// Ticks left in the current Round Robin slice.
    pub fn time_slice_remaining(&self) -> u32 {
        self.time_slice_remaining
    }

    /// Cumulative idle ticks.
    pub fn total_idle_time(&self) -> Ticks {
        self.total_idle_time
    }

    /// Completed records, in completion order.
    pub fn completed(&self) -> &[ProcessRecord] {
        &self.completed
    }

    /// Whether no process holds the CPU.
    pub fn cpu_is_idle(&self) -> bool {
        self.current_process.is_none()
    }
}

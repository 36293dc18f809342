//! Process model.
//!
//! A [`ProcessSpec`] is the immutable tuple a generator hands to the engine;
//! a [`ProcessRecord`] is the engine's mutable view of the same process while
//! it moves through the ready queue, the CPU, and the completed set.
//!
//! # Time Representation
//! All times are in simulated ticks relative to the start of the run (t=0).

use serde::{Deserialize, Serialize};

/// Simulated time unit.
pub type Ticks = u64;

/// Process identifier (generator-assigned, unique within a run).
pub type Pid = u32;

/// A process as produced by a generator, before a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique process identifier.
    pub pid: Pid,
    /// Tick at which the process becomes ready.
    pub arrival_time: Ticks,
    /// Total work units required.
    pub burst_time: Ticks,
    /// Scheduling priority (lower = more urgent).
    pub priority: i32,
}

impl ProcessSpec {
    /// Creates a spec arriving at tick 0 with priority 0.
    pub fn new(pid: Pid, burst_time: Ticks) -> Self {
        Self {
            pid,
            arrival_time: 0,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the arrival tick.
    pub fn with_arrival(mut self, arrival_time: Ticks) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// A process being scheduled.
///
/// Only the tick engine mutates a record; once it enters the completed set
/// it is never touched again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Unique process identifier.
    pub pid: Pid,
    /// Tick at which the process becomes ready.
    pub arrival_time: Ticks,
    /// Total work units required. Never changes.
    pub burst_time: Ticks,
    /// Work units still to execute (`0..=burst_time`).
    pub remaining_burst: Ticks,
    /// Scheduling priority (lower = more urgent).
    pub priority: i32,
    /// Ticks spent in the ready queue at wait-accounting time.
    pub wait_time: Ticks,
    /// Tick of the first dispatch. `None` until dispatched.
    pub start_time: Option<Ticks>,
    /// Tick after the last unit of work. `None` until complete.
    pub completion_time: Option<Ticks>,
}

impl ProcessRecord {
    /// Builds a fresh record from a generator spec.
    pub fn from_spec(spec: &ProcessSpec) -> Self {
        Self {
            pid: spec.pid,
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            remaining_burst: spec.burst_time,
            priority: spec.priority,
            wait_time: 0,
            start_time: None,
            completion_time: None,
        }
    }

    /// Fraction of the burst already executed (0.0..=1.0).
    pub fn completion_fraction(&self) -> f64 {
        if self.burst_time == 0 {
            return 1.0;
        }
        1.0 - self.remaining_burst as f64 / self.burst_time as f64
    }

    /// Whether all work has been executed.
    pub fn is_complete(&self) -> bool {
        self.remaining_burst == 0
    }

    /// Whether the process has been dispatched at least once.
    pub fn has_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// Completion minus arrival. `None` until complete.
    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.completion_time.map(|c| c - self.arrival_time)
    }

    /// Turnaround minus burst. `None` until complete.
    ///
    /// Signed so that a broken invariant shows up as a negative value
    /// instead of wrapping.
    pub fn waiting_time(&self) -> Option<i64> {
        self.turnaround_time()
            .map(|t| t as i64 - self.burst_time as i64)
    }

    /// First dispatch minus arrival. `None` until dispatched.
    pub fn response_time(&self) -> Option<Ticks> {
        self.start_time.map(|s| s - self.arrival_time)
    }

    /// Executes one unit of work.
    pub(crate) fn execute_tick(&mut self) {
        debug_assert!(self.remaining_burst > 0, "process {} already complete", self.pid);
        self.remaining_burst = self.remaining_burst.saturating_sub(1);
    }

    /// Records the first dispatch; later dispatches leave `start_time` alone.
    pub(crate) fn mark_dispatched(&mut self, now: Ticks) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }
}

impl From<ProcessSpec> for ProcessRecord {
    fn from(spec: ProcessSpec) -> Self {
        Self::from_spec(&spec)
    }
}

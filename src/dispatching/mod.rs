//! Scheduling strategies.
//!
//! A strategy decides the order of the ready queue, which record is
//! dispatched when the CPU is free, and whether the running record is
//! preempted at the end of a tick.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{Algorithm, Policy, SchedulingPolicy};
//!
//! let policy = Policy::from_algorithm(Algorithm::RoundRobin, Some(2)).unwrap();
//! assert_eq!(policy.time_quantum(), Some(2));
//! assert_eq!(policy.name(), "RoundRobin");
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod context;
mod policy;

pub use context::SchedulingContext;
pub use policy::{Algorithm, Policy};

use crate::error::SimulationError;
use crate::models::{ProcessRecord, ReadyQueue};
use std::fmt::Debug;

/// Ordering and selection policy plugged into the tick engine.
///
/// All hooks run synchronously inside a tick. The engine calls `reorder`
/// every tick, `select_next` only when the CPU is free, and
/// `preempts_on_tick` after the running record has executed.
pub trait SchedulingPolicy: Debug {
    /// Policy name (e.g., "FCFS", "SJF").
    fn name(&self) -> &'static str;

    /// Reorders the ready queue in place. Must be stable.
    fn reorder(&self, _queue: &mut ReadyQueue) {}

    /// Removes the record to dispatch next.
    fn select_next(
        &self,
        queue: &mut ReadyQueue,
        _context: &SchedulingContext,
    ) -> Option<ProcessRecord> {
        queue.pop_front()
    }

    /// Whether the running record must give up the CPU at the end of this tick.
    fn preempts_on_tick(&self, _context: &SchedulingContext) -> bool {
        false
    }

    /// Slice granted on dispatch. `None` = run to completion.
    fn time_quantum(&self) -> Option<u32> {
        None
    }

    /// Checks the policy's own configuration before a run starts.
    fn validate(&self) -> Result<(), SimulationError> {
        Ok(())
    }
}

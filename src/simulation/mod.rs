//! Tick-based execution engine, events, and run statistics.
//!
//! Provides the discrete-time engine that drives a scheduling policy over a
//! process set, the event stream it emits, and the metrics computed when the
//! run ends.
//!
//! # Flow
//!
//! generator → [`TickEngine::new`] → [`TickEngine::advance`] (one tick per
//! call, one event per tick) → [`RunSummary`] event → [`RunStatistics`]
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Banks et al. (2010), "Discrete-Event System Simulation", Ch. 3

mod driver;
mod engine;
mod event;
mod kpi;

pub use driver::{CancelHandle, Driver, RunOutcome};
pub use engine::{EngineState, TickEngine, TickOutcome};
pub use event::{EventSink, LogSink, RunSummary, SimulationEvent, Timeline, TimelineSegment};
pub use kpi::{ProcessReport, RunStatistics};

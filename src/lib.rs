//! Tick-based CPU scheduling simulator for the U-Engine ecosystem.
//!
//! Simulates a single CPU scheduling a fixed process set one tick at a time
//! and reports a deterministic run/idle timeline plus waiting, turnaround,
//! and idle metrics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessSpec`, `ProcessRecord`, `ReadyQueue`
//! - **`dispatching`**: Scheduling policies (FCFS, SJF, Priority, Round Robin)
//!   and the `SchedulingContext` they read
//! - **`simulation`**: `TickEngine`, events and sinks, `RunStatistics`, `Driver`
//! - **`generator`**: Process set generators and arrival modes
//! - **`config`**: `SimulationConfig` (serde-deserializable run settings)
//! - **`validation`**: Run-start input checks
//!
//! # Example
//!
//! ```
//! use u_cpusched::config::SimulationConfig;
//! use u_cpusched::dispatching::Algorithm;
//! use u_cpusched::generator::{ArrivalMode, ProcessGenerator};
//! use u_cpusched::simulation::{Timeline, TickEngine};
//!
//! let config = SimulationConfig::new(Algorithm::RoundRobin)
//!     .with_time_quantum(2)
//!     .with_arrival_mode(ArrivalMode::Simultaneous);
//! let processes = config
//!     .fixed_workload()
//!     .with_process(3, 0)
//!     .with_process(3, 0)
//!     .generate();
//!
//! let mut engine = TickEngine::new(processes, config.policy()?)?;
//! let mut timeline = Timeline::new();
//! let summary = engine.run_to_completion(&mut timeline)?;
//!
//! assert_eq!(timeline.segments().len(), 4);
//! assert_eq!(summary.total_idle_time, 0);
//! # Ok::<(), u_cpusched::error::SimulationError>(())
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod dispatching;
pub mod error;
pub mod generator;
pub mod models;
pub mod simulation;
pub mod validation;

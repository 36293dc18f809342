//! Simulation domain models.
//!
//! Provides the process types the engine schedules and the ready queue that
//! holds them between arrival and dispatch.
//!
//! # Lifecycle
//!
//! | Stage | Holder |
//! |-------|--------|
//! | Not yet arrived | engine's pending list |
//! | Ready | [`ReadyQueue`] |
//! | Running | `SchedulingContext::current_process` |
//! | Complete | `SchedulingContext::completed` |

mod process;
mod queue;

pub use process::{Pid, ProcessRecord, ProcessSpec, Ticks};
pub use queue::ReadyQueue;

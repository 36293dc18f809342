//! Error types for simulation runs.
//!
//! Configuration and input errors are detected before tick 0 and abort the
//! run without constructing an engine. Once a run is in progress the only
//! failure path is the event sink; everything else is a caller contract
//! violation (advancing a finished or cancelled engine).

use thiserror::Error;

use crate::models::{Pid, Ticks};

/// Error reported by an [`EventSink`](crate::simulation::EventSink).
pub type SinkError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the simulator.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Round Robin selected without a positive time quantum.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A process was supplied with a non-positive burst time.
    #[error("process {pid} has non-positive burst time")]
    InvalidProcess {
        /// Offending process.
        pid: Pid,
    },

    /// The process set was empty.
    #[error("refusing to start a run with no processes")]
    EmptyRun,

    /// `advance` was called after the run finished.
    #[error("engine already finished; no further ticks can be executed")]
    AlreadyFinished,

    /// `advance` was called after the run was cancelled or failed.
    #[error("engine was cancelled or failed; no further ticks can be executed")]
    Halted,

    /// The event sink rejected an event. Fatal for the run.
    #[error("event sink failed at tick {time}")]
    Sink {
        /// Tick whose event could not be delivered.
        time: Ticks,
        /// Underlying sink error.
        #[source]
        source: SinkError,
    },
}

impl SimulationError {
    pub(crate) fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            SimulationError::InvalidProcess { pid: 7 }.to_string(),
            "process 7 has non-positive burst time"
        );
        assert!(SimulationError::invalid_configuration("quantum must be positive")
            .to_string()
            .contains("quantum must be positive"));
    }

    #[test]
    fn test_sink_error_keeps_source() {
        let err = SimulationError::Sink {
            time: 3,
            source: "disk full".into(),
        };
        assert_eq!(err.to_string(), "event sink failed at tick 3");
        assert_eq!(err.source().map(|s| s.to_string()), Some("disk full".into()));
    }
}

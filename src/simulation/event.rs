//! Per-tick events and event sinks.
//!
//! Every tick produces exactly one [`SimulationEvent::Execution`] or
//! [`SimulationEvent::Idle`]; the final tick is followed by exactly one
//! [`SimulationEvent::RunSummary`]. Sinks are called synchronously and a
//! sink error ends the run.

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::SinkError;
use crate::models::{Pid, Ticks};

/// Aggregate metrics delivered when a run finishes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Mean of (turnaround - burst) over completed processes.
    pub avg_waiting_time: f64,
    /// Mean of (completion - arrival) over completed processes.
    pub avg_turnaround_time: f64,
    /// Ticks in which the CPU had nothing to run.
    pub total_idle_time: Ticks,
}

/// An engine notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SimulationEvent {
    /// A process executed during `time`.
    Execution {
        /// Tick index.
        time: Ticks,
        /// Process that ran.
        pid: Pid,
        /// `1 - remaining/burst` after this tick's work.
        completion_fraction: f64,
    },
    /// No process was ready during `time`.
    Idle {
        /// Tick index.
        time: Ticks,
    },
    /// The run finished.
    RunSummary(RunSummary),
}

impl SimulationEvent {
    /// Tick index for per-tick events; `None` for the summary.
    pub fn time(&self) -> Option<Ticks> {
        match self {
            SimulationEvent::Execution { time, .. } | SimulationEvent::Idle { time } => Some(*time),
            SimulationEvent::RunSummary(_) => None,
        }
    }

    /// Process that ran, for execution events.
    pub fn pid(&self) -> Option<Pid> {
        match self {
            SimulationEvent::Execution { pid, .. } => Some(*pid),
            _ => None,
        }
    }
}

/// Consumer of engine events (renderer, recorder, logger).
pub trait EventSink {
    /// Handles one event. An error is fatal for the run.
    fn emit(&mut self, event: &SimulationEvent) -> Result<(), SinkError>;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &SimulationEvent) -> Result<(), SinkError> {
        (**self).emit(event)
    }
}

/// Records every event in order.
impl EventSink for Vec<SimulationEvent> {
    fn emit(&mut self, event: &SimulationEvent) -> Result<(), SinkError> {
        self.push(event.clone());
        Ok(())
    }
}

/// Writes events through the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: &SimulationEvent) -> Result<(), SinkError> {
        match event {
            SimulationEvent::Execution {
                time,
                pid,
                completion_fraction,
            } => info!(
                "t={time} run pid={pid} progress={:.0}%",
                completion_fraction * 100.0
            ),
            SimulationEvent::Idle { time } => info!("t={time} idle"),
            SimulationEvent::RunSummary(s) => info!(
                "run complete: avg_wait={:.2} avg_turnaround={:.2} idle={}",
                s.avg_waiting_time, s.avg_turnaround_time, s.total_idle_time
            ),
        }
        Ok(())
    }
}

/// A maximal run of consecutive ticks with the same occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSegment {
    /// First tick (inclusive).
    pub start: Ticks,
    /// Last tick + 1 (exclusive).
    pub end: Ticks,
    /// Process that ran, `None` for idle.
    pub pid: Option<Pid>,
}

impl TimelineSegment {
    /// Number of ticks covered.
    pub fn len(&self) -> Ticks {
        self.end - self.start
    }

    /// Whether the segment covers no ticks.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Collapses per-tick events into run/idle segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    segments: Vec<TimelineSegment>,
    summary: Option<RunSummary>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments in time order.
    pub fn segments(&self) -> &[TimelineSegment] {
        &self.segments
    }

    /// Summary, once the run has finished.
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// Occupant of each tick, `None` for idle ticks.
    pub fn occupants(&self) -> Vec<Option<Pid>> {
        self.segments
            .iter()
            .flat_map(|s| (s.start..s.end).map(move |_| s.pid))
            .collect()
    }

    fn record(&mut self, time: Ticks, pid: Option<Pid>) {
        if let Some(last) = self.segments.last_mut() {
            if last.pid == pid && last.end == time {
                last.end = time + 1;
                return;
            }
        }
        self.segments.push(TimelineSegment {
            start: time,
            end: time + 1,
            pid,
        });
    }
}

impl EventSink for Timeline {
    fn emit(&mut self, event: &SimulationEvent) -> Result<(), SinkError> {
        match *event {
            SimulationEvent::Execution { time, pid, .. } => self.record(time, Some(pid)),
            SimulationEvent::Idle { time } => self.record(time, None),
            SimulationEvent::RunSummary(summary) => self.summary = Some(summary),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec(time: Ticks, pid: Pid) -> SimulationEvent {
        SimulationEvent::Execution {
            time,
            pid,
            completion_fraction: 0.5,
        }
    }

    #[test]
    fn test_event_accessors() {
        assert_eq!(exec(4, 2).time(), Some(4));
        assert_eq!(exec(4, 2).pid(), Some(2));
        assert_eq!(SimulationEvent::Idle { time: 1 }.pid(), None);
        let summary = SimulationEvent::RunSummary(RunSummary {
            avg_waiting_time: 0.0,
            avg_turnaround_time: 0.0,
            total_idle_time: 0,
        });
        assert_eq!(summary.time(), None);
    }

    #[test]
    fn test_timeline_merges_consecutive_ticks() {
        let mut timeline = Timeline::new();
        for event in [
            SimulationEvent::Idle { time: 0 },
            SimulationEvent::Idle { time: 1 },
            exec(2, 1),
            exec(3, 1),
            exec(4, 2),
            exec(5, 1),
        ] {
            timeline.emit(&event).unwrap();
        }

        let segments = timeline.segments();
        assert_eq!(segments.len(), 4);
        assert_eq!(
            segments[0],
            TimelineSegment {
                start: 0,
                end: 2,
                pid: None
            }
        );
        assert_eq!(segments[1].pid, Some(1));
        assert_eq!(segments[1].len(), 2);
        assert_eq!(
            timeline.occupants(),
            vec![None, None, Some(1), Some(1), Some(2), Some(1)]
        );
        assert!(timeline.summary().is_none());
    }

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut events: Vec<SimulationEvent> = Vec::new();
        events.emit(&exec(0, 1)).unwrap();
        events.emit(&SimulationEvent::Idle { time: 1 }).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], SimulationEvent::Idle { time: 1 });
    }

    #[test]
    fn test_log_sink_accepts_all_events() {
        let mut sink = LogSink;
        assert!(sink.emit(&exec(0, 1)).is_ok());
        assert!(sink.emit(&SimulationEvent::Idle { time: 1 }).is_ok());
        assert!(sink
            .emit(&SimulationEvent::RunSummary(RunSummary {
                avg_waiting_time: 1.5,
                avg_turnaround_time: 4.5,
                total_idle_time: 0,
            }))
            .is_ok());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&SimulationEvent::Idle { time: 3 }).unwrap();
        assert_eq!(json, r#"{"kind":"Idle","time":3}"#);
    }
}

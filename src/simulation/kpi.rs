//! Run statistics.
//!
//! Computed once, after the engine finishes, over the completed set.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first dispatch - arrival |
//! | Makespan | latest completion time |
//! | CPU Utilization | busy ticks / makespan |
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5.2

use serde::{Deserialize, Serialize};

use super::RunSummary;
use crate::models::{Pid, ProcessRecord, Ticks};

/// Per-process outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Process identifier.
    pub pid: Pid,
    /// Arrival tick.
    pub arrival_time: Ticks,
    /// Original burst.
    pub burst_time: Ticks,
    /// First dispatch tick.
    pub start_time: Ticks,
    /// Completion tick.
    pub completion_time: Ticks,
    /// completion - arrival.
    pub turnaround_time: i64,
    /// turnaround - burst.
    pub waiting_time: i64,
    /// start - arrival.
    pub response_time: i64,
}

impl ProcessReport {
    fn from_record(record: &ProcessRecord) -> Self {
        let completion = record.completion_time.unwrap_or(record.arrival_time);
        let start = record.start_time.unwrap_or(record.arrival_time);
        let turnaround = completion as i64 - record.arrival_time as i64;
        Self {
            pid: record.pid,
            arrival_time: record.arrival_time,
            burst_time: record.burst_time,
            start_time: start,
            completion_time: completion,
            turnaround_time: turnaround,
            waiting_time: turnaround - record.burst_time as i64,
            response_time: start as i64 - record.arrival_time as i64,
        }
    }
}

/// Aggregate performance of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Per-process reports, sorted by pid.
    pub processes: Vec<ProcessReport>,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Ticks with no running process.
    pub total_idle_time: Ticks,
    /// Latest completion time.
    pub makespan: Ticks,
    /// Busy ticks / makespan (0.0..1.0).
    pub cpu_utilization: f64,
}

impl RunStatistics {
    /// Computes statistics from the completed records.
    ///
    /// An empty set yields zero means instead of dividing by zero.
    pub fn calculate(completed: &[ProcessRecord], total_idle_time: Ticks) -> Self {
        let mut processes: Vec<ProcessReport> =
            completed.iter().map(ProcessReport::from_record).collect();
        processes.sort_by_key(|p| p.pid);

        let n = processes.len();
        let mean = |sum: i64| if n == 0 { 0.0 } else { sum as f64 / n as f64 };

        let total_wait: i64 = processes.iter().map(|p| p.waiting_time).sum();
        let total_tat: i64 = processes.iter().map(|p| p.turnaround_time).sum();
        let total_resp: i64 = processes.iter().map(|p| p.response_time).sum();

        let makespan = processes
            .iter()
            .map(|p| p.completion_time)
            .max()
            .unwrap_or(0);
        let busy: Ticks = processes.iter().map(|p| p.burst_time).sum();
        let cpu_utilization = if makespan == 0 {
            0.0
        } else {
            busy as f64 / makespan as f64
        };

        Self {
            avg_waiting_time: mean(total_wait),
            avg_turnaround_time: mean(total_tat),
            avg_response_time: mean(total_resp),
            processes,
            total_idle_time,
            makespan,
            cpu_utilization,
        }
    }

    /// The three-field summary carried by the final event.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            avg_waiting_time: self.avg_waiting_time,
            avg_turnaround_time: self.avg_turnaround_time,
            total_idle_time: self.total_idle_time,
        }
    }

    /// Report for a single process.
    pub fn process(&self, pid: Pid) -> Option<&ProcessReport> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

//! Built-in scheduling policies.
//!
//! | Policy | Queue order | Preemption |
//! |--------|-------------|------------|
//! | FCFS | insertion (FIFO) | never |
//! | SJF | ascending remaining burst | never |
//! | Priority | ascending priority value | never |
//! | Round Robin | insertion (FIFO) | slice expiry |
//!
//! SJF and Priority re-sort the queue every tick but never interrupt the
//! running process; a shorter or more urgent arrival waits for the CPU.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{SchedulingContext, SchedulingPolicy};
use crate::error::SimulationError;
use crate::models::ReadyQueue;

/// Algorithm selector as it appears in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come, First-Served.
    #[default]
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest Job First (non-preemptive).
    #[serde(rename = "SJF")]
    Sjf,
    /// Lowest priority value first (non-preemptive).
    Priority,
    /// Round Robin with a fixed quantum.
    #[serde(alias = "Round Robin", alias = "RR")]
    RoundRobin,
}

impl Algorithm {
    /// All selectable algorithms.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Priority,
        Algorithm::RoundRobin,
    ];

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Priority => "Priority",
            Algorithm::RoundRobin => "RoundRobin",
        }
    }

    /// Whether the algorithm needs a time quantum.
    pub fn requires_quantum(&self) -> bool {
        matches!(self, Algorithm::RoundRobin)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::Sjf),
            "priority" => Ok(Algorithm::Priority),
            "roundrobin" | "round robin" | "rr" => Ok(Algorithm::RoundRobin),
            other => Err(SimulationError::invalid_configuration(format!(
                "unknown algorithm '{other}'"
            ))),
        }
    }
}

/// A configured scheduling policy.
///
/// Selected once per run; the engine never re-inspects the algorithm name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Policy {
    /// First-Come, First-Served.
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Lowest priority value first (non-preemptive).
    Priority,
    /// Round Robin.
    RoundRobin {
        /// Maximum consecutive ticks per dispatch.
        quantum: u32,
    },
}

impl Policy {
    /// Builds a policy from a selector and an optional quantum.
    ///
    /// The quantum is only read for Round Robin, where it must be present
    /// and positive.
    pub fn from_algorithm(
        algorithm: Algorithm,
        time_quantum: Option<i64>,
    ) -> Result<Self, SimulationError> {
        let policy = match algorithm {
            Algorithm::Fcfs => Policy::Fcfs,
            Algorithm::Sjf => Policy::Sjf,
            Algorithm::Priority => Policy::Priority,
            Algorithm::RoundRobin => {
                let raw = time_quantum.ok_or_else(|| {
                    SimulationError::invalid_configuration(
                        "time_quantum is required for Round Robin",
                    )
                })?;
                let quantum = u32::try_from(raw)
                    .ok()
                    .filter(|&q| q > 0)
                    .ok_or_else(|| {
                        SimulationError::invalid_configuration(format!(
                            "time_quantum must be a positive integer, got {raw}"
                        ))
                    })?;
                Policy::RoundRobin { quantum }
            }
        };
        Ok(policy)
    }

    /// Round Robin with the given quantum.
    pub fn round_robin(quantum: u32) -> Self {
        Policy::RoundRobin { quantum }
    }

    /// The selector this policy was built from.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Policy::Fcfs => Algorithm::Fcfs,
            Policy::Sjf => Algorithm::Sjf,
            Policy::Priority => Algorithm::Priority,
            Policy::RoundRobin { .. } => Algorithm::RoundRobin,
        }
    }
}

impl SchedulingPolicy for Policy {
    fn name(&self) -> &'static str {
        self.algorithm().name()
    }

    fn reorder(&self, queue: &mut ReadyQueue) {
        match self {
            Policy::Sjf => queue.sort_by_key(|r| r.remaining_burst),
            Policy::Priority => queue.sort_by_key(|r| r.priority),
            Policy::Fcfs | Policy::RoundRobin { .. } => {}
        }
    }

    fn preempts_on_tick(&self, context: &SchedulingContext) -> bool {
        match self {
            Policy::RoundRobin { .. } => {
                context.time_slice_remaining() == 0
                    && context
                        .current_process()
                        .is_some_and(|p| p.remaining_burst > 0)
            }
            _ => false,
        }
    }

    fn time_quantum(&self) -> Option<u32> {
        match self {
            Policy::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), SimulationError> {
        match self {
            Policy::RoundRobin { quantum: 0 } => Err(SimulationError::invalid_configuration(
                "time_quantum must be a positive integer, got 0",
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProcessRecord, ProcessSpec};

    fn queue(specs: &[(u32, u64, i32)]) -> ReadyQueue {
        let mut q = ReadyQueue::new();
        for &(pid, burst, priority) in specs {
            q.push_back(ProcessSpec::new(pid, burst).with_priority(priority).into());
        }
        q
    }

    fn running(remaining: u64, slice: u32) -> SchedulingContext {
        let mut rec = ProcessRecord::from(ProcessSpec::new(1, 5));
        rec.remaining_burst = remaining;
        SchedulingContext {
            current_process: Some(rec),
            time_slice_remaining: slice,
            ..SchedulingContext::default()
        }
    }

    #[test]
    fn test_fcfs_keeps_fifo() {
        let mut q = queue(&[(1, 9, 3), (2, 1, 0)]);
        Policy::Fcfs.reorder(&mut q);
        assert_eq!(q.pids(), vec![1, 2]);
        let ctx = SchedulingContext::new();
        assert_eq!(Policy::Fcfs.select_next(&mut q, &ctx).map(|r| r.pid), Some(1));
    }

    #[test]
    fn test_sjf_orders_by_remaining_burst() {
        let mut q = queue(&[(1, 5, 0), (2, 2, 0), (3, 5, 0), (4, 1, 0)]);
        Policy::Sjf.reorder(&mut q);
        assert_eq!(q.pids(), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_priority_orders_by_value() {
        let mut q = queue(&[(1, 1, 4), (2, 1, -2), (3, 1, 4), (4, 1, 0)]);
        Policy::Priority.reorder(&mut q);
        assert_eq!(q.pids(), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_round_robin_preemption() {
        let rr = Policy::round_robin(2);
        assert!(rr.preempts_on_tick(&running(3, 0)));
        assert!(!rr.preempts_on_tick(&running(3, 1)));
        // Finished processes complete rather than being preempted.
        assert!(!rr.preempts_on_tick(&running(0, 0)));
        assert!(!rr.preempts_on_tick(&SchedulingContext::new()));
    }

    #[test]
    fn test_non_preemptive_policies() {
        for policy in [Policy::Fcfs, Policy::Sjf, Policy::Priority] {
            assert!(!policy.preempts_on_tick(&running(3, 0)));
            assert_eq!(policy.time_quantum(), None);
        }
    }

    #[test]
    fn test_from_algorithm_quantum_rules() {
        assert_eq!(
            Policy::from_algorithm(Algorithm::Fcfs, None).unwrap(),
            Policy::Fcfs
        );
        // Quantum is ignored unless Round Robin is selected.
        assert_eq!(
            Policy::from_algorithm(Algorithm::Sjf, Some(-3)).unwrap(),
            Policy::Sjf
        );
        assert_eq!(
            Policy::from_algorithm(Algorithm::RoundRobin, Some(4)).unwrap(),
            Policy::round_robin(4)
        );
        for bad in [None, Some(0), Some(-1), Some(i64::MAX)] {
            assert!(matches!(
                Policy::from_algorithm(Algorithm::RoundRobin, bad),
                Err(SimulationError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_validate_zero_quantum() {
        assert!(Policy::round_robin(0).validate().is_err());
        assert!(Policy::round_robin(1).validate().is_ok());
        assert!(Policy::Priority.validate().is_ok());
    }

    #[test]
    fn test_algorithm_parse_and_display() {
        assert_eq!("FCFS".parse::<Algorithm>().unwrap(), Algorithm::Fcfs);
        assert_eq!("sjf".parse::<Algorithm>().unwrap(), Algorithm::Sjf);
        assert_eq!(
            "Round Robin".parse::<Algorithm>().unwrap(),
            Algorithm::RoundRobin
        );
        assert!("lottery".parse::<Algorithm>().is_err());
        for alg in Algorithm::ALL {
            assert_eq!(alg.to_string().parse::<Algorithm>().unwrap(), alg);
        }
    }

    #[test]
    fn test_algorithm_serde_names() {
        let alg: Algorithm = serde_json::from_str("\"Round Robin\"").unwrap();
        assert_eq!(alg, Algorithm::RoundRobin);
        assert_eq!(serde_json::to_string(&Algorithm::Sjf).unwrap(), "\"SJF\"");
    }
}

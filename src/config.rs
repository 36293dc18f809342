//! Simulation configuration.
//!
//! Mirrors the settings a front end exposes: algorithm, Round Robin
//! quantum, arrival mode, pacing delay, and RNG seed. Deserializable from any
//! serde format; missing fields take the defaults below.
//!
//! | Field | Default |
//! |-------|---------|
//! | `algorithm` | FCFS |
//! | `time_quantum` | 4 |
//! | `arrival_mode` | Staggered |
//! | `tick_delay_ms` | 0 |
//! | `seed` | 0 |

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::dispatching::{Algorithm, Policy};
use crate::error::SimulationError;
use crate::generator::{ArrivalMode, FixedWorkload, RandomWorkload};
use crate::simulation::Driver;

/// Default Round Robin quantum.
pub const DEFAULT_TIME_QUANTUM: i64 = 4;

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Scheduling algorithm.
    pub algorithm: Algorithm,
    /// Round Robin quantum. Ignored by other algorithms.
    pub time_quantum: Option<i64>,
    /// Arrival-time assignment used by generators.
    pub arrival_mode: ArrivalMode,
    /// Wall-clock delay after each tick (ms).
    pub tick_delay_ms: u64,
    /// Seed for generators.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            time_quantum: Some(DEFAULT_TIME_QUANTUM),
            arrival_mode: ArrivalMode::default(),
            tick_delay_ms: 0,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    /// Creates a config for the given algorithm with default settings.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Sets the Round Robin quantum.
    pub fn with_time_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = Some(quantum);
        self
    }

    /// Sets the arrival mode.
    pub fn with_arrival_mode(mut self, mode: ArrivalMode) -> Self {
        self.arrival_mode = mode;
        self
    }

    /// Sets the per-tick delay in milliseconds.
    pub fn with_tick_delay_ms(mut self, delay_ms: u64) -> Self {
        self.tick_delay_ms = delay_ms;
        self
    }

    /// Sets the generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the configuration without building anything.
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.policy().map(|_| ())
    }

    /// Builds the scheduling policy, validating the quantum for Round Robin.
    pub fn policy(&self) -> Result<Policy, SimulationError> {
        Policy::from_algorithm(self.algorithm, self.time_quantum)
    }

    /// Builds a driver with the configured pacing.
    pub fn driver(&self) -> Driver {
        Driver::new().with_tick_delay(Duration::from_millis(self.tick_delay_ms))
    }

    /// Empty fixed workload using the configured arrival mode and seed.
    pub fn fixed_workload(&self) -> FixedWorkload {
        FixedWorkload::new()
            .with_arrival_mode(self.arrival_mode)
            .with_seed(self.seed)
    }

    /// Random workload of `count` processes using the configured arrival mode and seed.
    pub fn random_workload(&self, count: usize) -> RandomWorkload {
        RandomWorkload::new(count, self.seed).with_arrival_mode(self.arrival_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::SchedulingPolicy;
    use crate::generator::ProcessGenerator;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.algorithm, Algorithm::Fcfs);
        assert_eq!(config.time_quantum, Some(4));
        assert_eq!(config.arrival_mode, ArrivalMode::Staggered);
        assert_eq!(config.policy().unwrap(), Policy::Fcfs);
        assert!(config.driver().tick_delay().is_zero());
    }

    #[test]
    fn test_from_json() {
        let config: SimulationConfig = serde_json::from_str(
            r#"{"algorithm": "Round Robin", "time_quantum": 2, "arrival_mode": "Simultaneous", "tick_delay_ms": 5}"#,
        )
        .unwrap();

        assert_eq!(config.algorithm, Algorithm::RoundRobin);
        assert_eq!(config.policy().unwrap().time_quantum(), Some(2));
        assert_eq!(config.arrival_mode, ArrivalMode::Simultaneous);
        assert_eq!(config.driver().tick_delay(), Duration::from_millis(5));
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{"algorithm": "SJF"}"#).unwrap();
        assert_eq!(config, SimulationConfig::new(Algorithm::Sjf));
    }

    #[test]
    fn test_invalid_quantum() {
        let config = SimulationConfig::new(Algorithm::RoundRobin).with_time_quantum(0);
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));

        let config: SimulationConfig =
            serde_json::from_str(r#"{"algorithm": "RoundRobin", "time_quantum": -3}"#).unwrap();
        assert!(config.policy().is_err());

        let config: SimulationConfig =
            serde_json::from_str(r#"{"algorithm": "RoundRobin", "time_quantum": null}"#).unwrap();
        assert!(config.policy().is_err());
    }

    #[test]
    fn test_quantum_ignored_outside_round_robin() {
        let config = SimulationConfig::new(Algorithm::Priority).with_time_quantum(-1);
        assert_eq!(config.policy().unwrap(), Policy::Priority);
    }

    #[test]
    fn test_workloads_follow_config() {
        let config = SimulationConfig::default()
            .with_arrival_mode(ArrivalMode::Simultaneous)
            .with_seed(3);
        let specs = config.fixed_workload().with_process(2, 1).generate();
        assert_eq!(specs[0].arrival_time, 0);

        let specs = config.random_workload(5).generate();
        assert_eq!(specs.len(), 5);
        assert!(specs.iter().all(|s| s.arrival_time == 0));
    }
}

//! Process generators.
//!
//! A generator produces the initial process set before a run starts. The
//! engine never sees how bursts or priorities were chosen; it only sees the
//! resulting [`ProcessSpec`]s.
//!
//! # Arrival Modes
//!
//! | Mode | Arrival times |
//! |------|---------------|
//! | Staggered | `{0, 2, 4, …, 2(n-1)}` shuffled across processes |
//! | Simultaneous | every process arrives at 0 |
//!
//! Shuffles use a seeded RNG, so a generator with a fixed seed always
//! produces the same set.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::models::{Pid, ProcessSpec, Ticks};

/// Spacing between consecutive staggered arrivals.
pub const ARRIVAL_SPACING: Ticks = 2;

/// How arrival times are assigned. Interpreted by generators only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArrivalMode {
    /// Arrivals spread over `0, 2, 4, …` in random order.
    #[default]
    Staggered,
    /// Everything arrives at tick 0.
    Simultaneous,
}

impl ArrivalMode {
    /// Arrival times for `count` processes, indexed by generation order.
    pub fn arrival_times<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Ticks> {
        match self {
            ArrivalMode::Simultaneous => vec![0; count],
            ArrivalMode::Staggered => {
                let mut times: Vec<Ticks> =
                    (0..count as Ticks).map(|i| i * ARRIVAL_SPACING).collect();
                times.shuffle(rng);
                times
            }
        }
    }
}

/// Source of the initial process set.
pub trait ProcessGenerator {
    /// Produces a process set with unique pids.
    fn generate(&mut self) -> Vec<ProcessSpec>;
}

impl ProcessGenerator for Vec<ProcessSpec> {
    fn generate(&mut self) -> Vec<ProcessSpec> {
        self.clone()
    }
}

/// Fixed `(burst, priority)` workload with generated pids and arrivals.
///
/// Pids are assigned `1..=n` in the order the entries were added.
#[derive(Debug, Clone)]
pub struct FixedWorkload {
    entries: Vec<(Ticks, i32)>,
    arrival_mode: ArrivalMode,
    seed: u64,
}

impl FixedWorkload {
    /// Creates an empty workload with staggered arrivals and seed 0.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            arrival_mode: ArrivalMode::default(),
            seed: 0,
        }
    }

    /// Adds a process.
    pub fn with_process(mut self, burst_time: Ticks, priority: i32) -> Self {
        self.entries.push((burst_time, priority));
        self
    }

    /// Sets the arrival mode.
    pub fn with_arrival_mode(mut self, mode: ArrivalMode) -> Self {
        self.arrival_mode = mode;
        self
    }

    /// Sets the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no processes were added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FixedWorkload {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessGenerator for FixedWorkload {
    fn generate(&mut self) -> Vec<ProcessSpec> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let arrivals = self.arrival_mode.arrival_times(self.entries.len(), &mut rng);
        build_specs(&self.entries, &arrivals)
    }
}

/// Random workload drawn from uniform burst and priority ranges.
#[derive(Debug, Clone)]
pub struct RandomWorkload {
    count: usize,
    burst_range: RangeInclusive<Ticks>,
    priority_range: RangeInclusive<i32>,
    arrival_mode: ArrivalMode,
    rng: StdRng,
}

impl RandomWorkload {
    /// Creates a generator for `count` processes.
    ///
    /// Defaults: burst 1..=10, priority 0..=10, staggered arrivals.
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            burst_range: 1..=10,
            priority_range: 0..=10,
            arrival_mode: ArrivalMode::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sets the burst range. A lower bound of 0 is raised to 1.
    pub fn with_burst_range(mut self, range: RangeInclusive<Ticks>) -> Self {
        let (lo, hi) = range.into_inner();
        let lo = lo.max(1);
        self.burst_range = lo..=hi.max(lo);
        self
    }

    /// Sets the priority range.
    pub fn with_priority_range(mut self, range: RangeInclusive<i32>) -> Self {
        let (lo, hi) = range.into_inner();
        self.priority_range = lo..=hi.max(lo);
        self
    }

    /// Sets the arrival mode.
    pub fn with_arrival_mode(mut self, mode: ArrivalMode) -> Self {
        self.arrival_mode = mode;
        self
    }
}

impl ProcessGenerator for RandomWorkload {
    /// Each call draws a fresh set from the generator's RNG stream.
    fn generate(&mut self) -> Vec<ProcessSpec> {
        let entries: Vec<(Ticks, i32)> = (0..self.count)
            .map(|_| {
                (
                    self.rng.random_range(self.burst_range.clone()),
                    self.rng.random_range(self.priority_range.clone()),
                )
            })
            .collect();
        let arrivals = self.arrival_mode.arrival_times(self.count, &mut self.rng);
        build_specs(&entries, &arrivals)
    }
}

fn build_specs(entries: &[(Ticks, i32)], arrivals: &[Ticks]) -> Vec<ProcessSpec> {
    entries
        .iter()
        .zip(arrivals)
        .enumerate()
        .map(|(i, (&(burst, priority), &arrival))| ProcessSpec {
            pid: i as Pid + 1,
            arrival_time: arrival,
            burst_time: burst,
            priority,
        })
        .collect()
}

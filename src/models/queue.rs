//! Ready queue.
//!
//! Ordered holding area for processes that have arrived, are not finished,
//! and are not on the CPU. The queue itself is FIFO; sorting strategies
//! reorder it in place with stable sorts so equal keys keep insertion order.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{Pid, ProcessRecord};

/// FIFO queue of ready processes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadyQueue {
    records: VecDeque<ProcessRecord>,
}

impl ReadyQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record at the tail.
    pub fn push_back(&mut self, record: ProcessRecord) {
        self.records.push_back(record);
    }

    /// Removes and returns the head.
    pub fn pop_front(&mut self) -> Option<ProcessRecord> {
        self.records.pop_front()
    }

    /// Head of the queue without removing it.
    pub fn front(&self) -> Option<&ProcessRecord> {
        self.records.front()
    }

    /// Stable sort by the given key (ties keep insertion order).
    pub fn sort_by_key<K, F>(&mut self, key: F)
    where
        K: Ord,
        F: FnMut(&ProcessRecord) -> K,
    {
        self.records.make_contiguous().sort_by_key(key);
    }

    /// Number of queued records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.records.iter()
    }

    /// Pids from head to tail.
    pub fn pids(&self) -> Vec<Pid> {
        self.records.iter().map(|r| r.pid).collect()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ProcessRecord> {
        self.records.iter_mut()
    }
}

//! Tick engine.
//!
//! # Algorithm
//!
//! Each call to [`TickEngine::advance`] executes one simulated tick:
//!
//! 1. Admission: records with `arrival_time == now` join the ready queue
//!    (ascending pid on ties).
//! 2. Reorder: the policy sorts the queue (no-op for FIFO policies).
//! 3. Wait accounting: every queued record gets `wait_time += 1`.
//! 4. Dispatch: if the CPU is free, the policy selects the next record.
//!    An empty queue makes the tick idle.
//! 5. Execution: the running record loses one unit of remaining burst.
//! 6. Completion/preemption: finished records move to the completed set;
//!    Round Robin puts a record with an expired slice back at the tail.
//!
//! The tick's event reaches the sink only after phase 6, so callers never
//! observe a half-executed tick. When every record is complete the engine
//! emits a [`RunSummary`] and refuses further ticks.
//!
//! # Determinism
//! Stable sorts and pid-ordered admission make the event stream a pure
//! function of the process set and the policy.

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{EventSink, RunStatistics, RunSummary, SimulationEvent};
use crate::dispatching::{Policy, SchedulingContext, SchedulingPolicy};
use crate::error::SimulationError;
use crate::models::{ProcessRecord, ProcessSpec, ReadyQueue, Ticks};
use crate::validation::validate_run;

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Ticks can be executed.
    Running,
    /// Every process completed; the summary has been emitted.
    Finished,
    /// The caller stopped the run between ticks.
    Cancelled,
    /// The event sink failed.
    Failed,
}

/// Result of a single [`TickEngine::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The tick ran; more ticks are needed.
    Continued,
    /// The tick completed the last process.
    Finished(RunSummary),
}

/// Discrete-time CPU scheduling engine for one run.
///
/// # Example
///
/// ```
/// use u_cpusched::dispatching::Policy;
/// use u_cpusched::models::ProcessSpec;
/// use u_cpusched::simulation::{SimulationEvent, TickEngine};
///
/// let processes = vec![
///     ProcessSpec::new(1, 4),
///     ProcessSpec::new(2, 2).with_arrival(1),
/// ];
/// let mut engine = TickEngine::new(processes, Policy::Fcfs).unwrap();
/// let mut events: Vec<SimulationEvent> = Vec::new();
/// let summary = engine.run_to_completion(&mut events).unwrap();
///
/// assert_eq!(events.len(), 7); // 6 ticks + summary
/// assert!((summary.avg_waiting_time - 1.5).abs() < 1e-10);
/// ```
#[derive(Debug)]
pub struct TickEngine<P: SchedulingPolicy = Policy> {
    policy: P,
    /// Not yet admitted, sorted by (arrival, pid).
    pending: VecDeque<ProcessRecord>,
    queue: ReadyQueue,
    context: SchedulingContext,
    process_count: usize,
    state: EngineState,
    statistics: Option<RunStatistics>,
}

impl<P: SchedulingPolicy> TickEngine<P> {
    /// Validates the inputs and creates an engine positioned before tick 0.
    pub fn new(processes: Vec<ProcessSpec>, policy: P) -> Result<Self, SimulationError> {
        validate_run(&processes, &policy)?;

        let mut records: Vec<ProcessRecord> =
            processes.iter().map(ProcessRecord::from_spec).collect();
        records.sort_by_key(|r| (r.arrival_time, r.pid));

        info!(
            "starting {} run with {} processes",
            policy.name(),
            records.len()
        );

        Ok(Self {
            policy,
            process_count: records.len(),
            pending: records.into(),
            queue: ReadyQueue::new(),
            context: SchedulingContext::new(),
            state: EngineState::Running,
            statistics: None,
        })
    }

    /// Executes one tick and delivers its event(s) to `sink`.
    ///
    /// Fails immediately if the engine is no longer running.
    pub fn advance<S>(&mut self, sink: &mut S) -> Result<TickOutcome, SimulationError>
    where
        S: EventSink + ?Sized,
    {
        match self.state {
            EngineState::Running => {}
            EngineState::Finished => return Err(SimulationError::AlreadyFinished),
            EngineState::Cancelled | EngineState::Failed => return Err(SimulationError::Halted),
        }

        let now = self.context.current_time;
        let event = self.run_tick(now);
        self.deliver(sink, now, &event)?;

        if self.context.completed.len() == self.process_count {
            let statistics =
                RunStatistics::calculate(&self.context.completed, self.context.total_idle_time);
            let summary = statistics.summary();
            self.statistics = Some(statistics);
            self.state = EngineState::Finished;
            info!(
                "run finished at t={}: avg_wait={:.2} avg_turnaround={:.2} idle={}",
                now + 1,
                summary.avg_waiting_time,
                summary.avg_turnaround_time,
                summary.total_idle_time
            );
            self.deliver(sink, now, &SimulationEvent::RunSummary(summary))?;
            return Ok(TickOutcome::Finished(summary));
        }

        self.context.current_time += 1;
        Ok(TickOutcome::Continued)
    }

    /// Advances until the run finishes.
    pub fn run_to_completion<S>(&mut self, sink: &mut S) -> Result<RunSummary, SimulationError>
    where
        S: EventSink + ?Sized,
    {
        loop {
            if let TickOutcome::Finished(summary) = self.advance(sink)? {
                return Ok(summary);
            }
        }
    }

    /// Stops a running engine. Has no effect once finished or failed.
    pub fn cancel(&mut self) {
        if self.state == EngineState::Running {
            info!("run cancelled at t={}", self.context.current_time);
            self.state = EngineState::Cancelled;
        }
    }

    /// Lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the run finished normally.
    pub fn is_finished(&self) -> bool {
        self.state == EngineState::Finished
    }

    /// Active policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Tick the next `advance` executes (or the last tick, once finished).
    pub fn current_time(&self) -> Ticks {
        self.context.current_time
    }

    /// Record on the CPU between ticks (Round Robin or mid-burst).
    pub fn current_process(&self) -> Option<&ProcessRecord> {
        self.context.current_process()
    }

    /// Ready queue contents between ticks.
    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.queue
    }

    /// Completed records, in completion order.
    pub fn completed(&self) -> &[ProcessRecord] {
        self.context.completed()
    }

    /// Cumulative idle ticks so far.
    pub fn total_idle_time(&self) -> Ticks {
        self.context.total_idle_time
    }

    /// Number of processes in the run.
    pub fn process_count(&self) -> usize {
        self.process_count
    }

    /// Scheduler state shared with the policy.
    pub fn context(&self) -> &SchedulingContext {
        &self.context
    }

    /// Full statistics, available once finished.
    pub fn statistics(&self) -> Option<&RunStatistics> {
        self.statistics.as_ref()
    }

    fn run_tick(&mut self, now: Ticks) -> SimulationEvent {
        self.admit_arrivals(now);
        self.policy.reorder(&mut self.queue);

        for record in self.queue.iter_mut() {
            record.wait_time += 1;
        }

        if self.context.current_process.is_none() {
            self.dispatch(now);
        }

        let event = match self.context.current_process.as_mut() {
            Some(current) => {
                current.execute_tick();
                if self.policy.time_quantum().is_some() {
                    self.context.time_slice_remaining =
                        self.context.time_slice_remaining.saturating_sub(1);
                }
                trace!(
                    "t={now} pid={} remaining={}",
                    current.pid,
                    current.remaining_burst
                );
                SimulationEvent::Execution {
                    time: now,
                    pid: current.pid,
                    completion_fraction: current.completion_fraction(),
                }
            }
            None => {
                self.context.total_idle_time += 1;
                trace!("t={now} idle");
                return SimulationEvent::Idle { time: now };
            }
        };

        self.complete_or_preempt(now);
        event
    }

    fn admit_arrivals(&mut self, now: Ticks) {
        // `pending` is sorted, so arrivals for `now` are a prefix.
        while self
            .pending
            .front()
            .is_some_and(|r| r.arrival_time == now)
        {
            if let Some(record) = self.pending.pop_front() {
                trace!("t={now} admit pid={}", record.pid);
                self.queue.push_back(record);
            }
        }
    }

    fn dispatch(&mut self, now: Ticks) {
        let Some(mut record) = self.policy.select_next(&mut self.queue, &self.context) else {
            return;
        };
        record.mark_dispatched(now);
        if let Some(quantum) = self.policy.time_quantum() {
            self.context.time_slice_remaining = quantum;
        }
        debug!(
            "t={now} dispatch pid={} remaining={}",
            record.pid, record.remaining_burst
        );
        self.context.current_process = Some(record);
    }

    fn complete_or_preempt(&mut self, now: Ticks) {
        let finished = self
            .context
            .current_process
            .as_ref()
            .is_some_and(ProcessRecord::is_complete);

        if finished {
            if let Some(mut record) = self.context.current_process.take() {
                record.completion_time = Some(now + 1);
                debug!("t={now} complete pid={}", record.pid);
                self.context.completed.push(record);
            }
        } else if self.policy.preempts_on_tick(&self.context) {
            if let Some(record) = self.context.current_process.take() {
                debug!(
                    "t={now} preempt pid={} remaining={}",
                    record.pid, record.remaining_burst
                );
                self.queue.push_back(record);
            }
        }
    }

    fn deliver<S>(
        &mut self,
        sink: &mut S,
        now: Ticks,
        event: &SimulationEvent,
    ) -> Result<(), SimulationError>
    where
        S: EventSink + ?Sized,
    {
        sink.emit(event).map_err(|source| {
            if self.state == EngineState::Running {
                self.state = EngineState::Failed;
            }
            SimulationError::Sink { time: now, source }
        })
    }
}

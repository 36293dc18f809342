//! Real-time driver for a tick engine.
//!
//! The engine only ever runs when asked. The driver is the caller that keeps
//! asking: it advances one tick, optionally sleeps, and checks for a
//! cancellation request before the next tick. Pacing never changes the
//! simulated outcome.

use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::{EventSink, RunSummary, TickEngine, TickOutcome};
use crate::dispatching::SchedulingPolicy;
use crate::error::SimulationError;
use crate::models::Ticks;

/// Cross-thread cancellation flag, checked between ticks.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Creates an untriggered handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation at the next tick boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How a driven run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    /// Every process completed.
    Completed(RunSummary),
    /// Cancellation was honored before tick `at` started.
    Cancelled {
        /// First tick that did not run.
        at: Ticks,
    },
}

/// Paces a [`TickEngine`] in wall-clock time.
#[derive(Debug, Clone, Default)]
pub struct Driver {
    tick_delay: Duration,
    cancel: CancelHandle,
}

impl Driver {
    /// Creates a driver with no delay between ticks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wall-clock delay after each tick.
    pub fn with_tick_delay(mut self, delay: Duration) -> Self {
        self.tick_delay = delay;
        self
    }

    /// Uses an existing cancellation handle.
    pub fn with_cancel_handle(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    /// Delay applied after each tick.
    pub fn tick_delay(&self) -> Duration {
        self.tick_delay
    }

    /// Handle that cancels runs driven by this driver.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Drives `engine` until it finishes or cancellation is requested.
    pub fn run<P, S>(
        &self,
        engine: &mut TickEngine<P>,
        sink: &mut S,
    ) -> Result<RunOutcome, SimulationError>
    where
        P: SchedulingPolicy,
        S: EventSink + ?Sized,
    {
        loop {
            if self.cancel.is_cancelled() {
                engine.cancel();
                let at = engine.current_time();
                info!("driver stopped before tick {at}");
                return Ok(RunOutcome::Cancelled { at });
            }

            if let TickOutcome::Finished(summary) = engine.advance(sink)? {
                return Ok(RunOutcome::Completed(summary));
            }

            if !self.tick_delay.is_zero() {
                thread::sleep(self.tick_delay);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::Policy;
    use crate::error::SinkError;
    use crate::models::ProcessSpec;
    use crate::simulation::{EngineState, SimulationEvent};

    #[test]
    fn test_driver_runs_to_completion() {
        let mut engine = TickEngine::new(
            vec![ProcessSpec::new(1, 3), ProcessSpec::new(2, 2)],
            Policy::round_robin(1),
        )
        .unwrap();
        let mut events: Vec<SimulationEvent> = Vec::new();

        let outcome = Driver::new().run(&mut engine, &mut events).unwrap();
        let RunOutcome::Completed(summary) = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert_eq!(summary.total_idle_time, 0);
        assert_eq!(events.len(), 6);
        assert!(engine.is_finished());
    }

    #[test]
    fn test_pacing_does_not_change_outcome() {
        let processes = vec![ProcessSpec::new(1, 2), ProcessSpec::new(2, 1).with_arrival(4)];

        let mut fast = TickEngine::new(processes.clone(), Policy::Fcfs).unwrap();
        let mut fast_events: Vec<SimulationEvent> = Vec::new();
        Driver::new().run(&mut fast, &mut fast_events).unwrap();

        let mut slow = TickEngine::new(processes, Policy::Fcfs).unwrap();
        let mut slow_events: Vec<SimulationEvent> = Vec::new();
        Driver::new()
            .with_tick_delay(Duration::from_millis(1))
            .run(&mut slow, &mut slow_events)
            .unwrap();

        assert_eq!(fast_events, slow_events);
    }

    /// Requests cancellation once a given tick has been observed.
    struct CancelAfter {
        tick: Ticks,
        handle: CancelHandle,
        seen: usize,
    }

    impl EventSink for CancelAfter {
        fn emit(&mut self, event: &SimulationEvent) -> Result<(), SinkError> {
            self.seen += 1;
            if event.time() == Some(self.tick) {
                self.handle.cancel();
            }
            Ok(())
        }
    }

    #[test]
    fn test_cancel_at_tick_boundary() {
        let driver = Driver::new();
        let mut sink = CancelAfter {
            tick: 2,
            handle: driver.cancel_handle(),
            seen: 0,
        };
        let mut engine = TickEngine::new(vec![ProcessSpec::new(1, 10)], Policy::Fcfs).unwrap();

        let outcome = driver.run(&mut engine, &mut sink).unwrap();
        assert_eq!(outcome, RunOutcome::Cancelled { at: 3 });
        assert_eq!(sink.seen, 3);
        assert_eq!(engine.state(), EngineState::Cancelled);
        assert_eq!(engine.current_process().map(|p| p.remaining_burst), Some(7));
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let handle = CancelHandle::new();
        let remote = handle.clone();
        thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(handle.is_cancelled());

        let driver = Driver::new().with_cancel_handle(handle);
        let mut engine = TickEngine::new(vec![ProcessSpec::new(1, 1)], Policy::Fcfs).unwrap();
        let mut events: Vec<SimulationEvent> = Vec::new();
        assert_eq!(
            driver.run(&mut engine, &mut events).unwrap(),
            RunOutcome::Cancelled { at: 0 }
        );
        assert!(events.is_empty());
    }
}

//! Run-start validation.
//!
//! Checks the process set and the policy before tick 0. A failing run is
//! never constructed, so no partial state is observable. Detects, in order:
//! - Empty process set
//! - Invalid policy configuration (e.g. zero Round Robin quantum)
//! - Processes with non-positive burst time
//!
//! Pid uniqueness and non-negative arrivals are the generator's contract
//! and are not re-checked here.

use crate::dispatching::SchedulingPolicy;
use crate::error::SimulationError;
use crate::models::ProcessSpec;

/// Validates a run's inputs.
///
/// # Returns
/// `Ok(())` if the run may start, otherwise the first error found.
pub fn validate_run<P>(processes: &[ProcessSpec], policy: &P) -> Result<(), SimulationError>
where
    P: SchedulingPolicy + ?Sized,
{
    if processes.is_empty() {
        return Err(SimulationError::EmptyRun);
    }

    policy.validate()?;

    if let Some(bad) = processes.iter().find(|p| p.burst_time == 0) {
        return Err(SimulationError::InvalidProcess { pid: bad.pid });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::Policy;

    #[test]
    fn test_valid_input() {
        let processes = vec![ProcessSpec::new(1, 3), ProcessSpec::new(2, 1).with_arrival(4)];
        assert!(validate_run(&processes, &Policy::Fcfs).is_ok());
        assert!(validate_run(&processes, &Policy::round_robin(2)).is_ok());
    }

    #[test]
    fn test_empty_run() {
        assert!(matches!(
            validate_run(&[], &Policy::Sjf),
            Err(SimulationError::EmptyRun)
        ));
    }

    #[test]
    fn test_zero_burst() {
        let processes = vec![ProcessSpec::new(1, 3), ProcessSpec::new(2, 0)];
        assert!(matches!(
            validate_run(&processes, &Policy::Priority),
            Err(SimulationError::InvalidProcess { pid: 2 })
        ));
    }

    #[test]
    fn test_invalid_quantum() {
        let processes = vec![ProcessSpec::new(1, 3)];
        assert!(matches!(
            validate_run(&processes, &Policy::round_robin(0)),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_error_precedence() {
        // Empty beats configuration; configuration beats process errors.
        assert!(matches!(
            validate_run(&[], &Policy::round_robin(0)),
            Err(SimulationError::EmptyRun)
        ));
        let processes = vec![ProcessSpec::new(1, 0)];
        assert!(matches!(
            validate_run(&processes, &Policy::round_robin(0)),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }
}

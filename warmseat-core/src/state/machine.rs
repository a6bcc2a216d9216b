//! State machine definition
//!
//! Heater output is a function of the current state: allowed only while
//! running. Shutdown is terminal; only a power cycle leaves it.

use super::events::Event;

/// Controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Power-on, configuration check, settle delay
    Boot,
    /// Sampling knobs and battery every iteration
    Running,
    /// Outputs off, fault indicator on, no further sampling
    Shutdown(ShutdownReason),
}

/// Why the controller shut down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShutdownReason {
    /// Battery average below the shutdown threshold
    BatteryCritical,
    /// Configuration rejected at boot
    ConfigInvalid,
}

impl State {
    /// Check if this state allows heater output
    pub fn outputs_allowed(&self) -> bool {
        matches!(self, State::Running)
    }

    /// Check if this is the terminal state
    pub fn is_shutdown(&self) -> bool {
        matches!(self, State::Shutdown(_))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Boot, BootComplete) => Running,
            (Boot, FaultDetected(reason)) => Shutdown(reason),

            (Running, FaultDetected(reason)) => Shutdown(reason),

            // Shutdown absorbs everything, including a second fault
            (Shutdown(reason), _) => Shutdown(reason),

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_to_running() {
        let next = State::Boot.transition(Event::BootComplete);
        assert_eq!(next, State::Running);
        assert!(next.outputs_allowed());
    }

    #[test]
    fn test_fault_from_any_live_state() {
        for state in [State::Boot, State::Running] {
            let next = state.transition(Event::FaultDetected(ShutdownReason::BatteryCritical));
            assert_eq!(next, State::Shutdown(ShutdownReason::BatteryCritical));
            assert!(!next.outputs_allowed());
        }
    }

    #[test]
    fn test_running_ignores_boot_complete() {
        assert_eq!(State::Running.transition(Event::BootComplete), State::Running);
    }

    #[test]
    fn test_shutdown_is_terminal() {
        let state = State::Shutdown(ShutdownReason::BatteryCritical);
        assert_eq!(state.transition(Event::BootComplete), state);
        // First reason is kept
        assert_eq!(
            state.transition(Event::FaultDetected(ShutdownReason::ConfigInvalid)),
            state
        );
        assert!(state.is_shutdown());
    }

    #[test]
    fn test_event_classification() {
        assert!(Event::FaultDetected(ShutdownReason::ConfigInvalid).is_fault());
        assert!(!Event::BootComplete.is_fault());
    }
}

//! Events that trigger state transitions

use super::machine::ShutdownReason;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Configuration accepted and boot diagnostics sent
    BootComplete,
    /// A condition that requires every output off for good
    FaultDetected(ShutdownReason),
}

impl Event {
    /// Check if this event is a fault
    pub fn is_fault(&self) -> bool {
        matches!(self, Event::FaultDetected(_))
    }
}

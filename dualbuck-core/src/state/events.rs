//! Events that trigger state transitions

use super::machine::FaultKind;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Debounced operator button press
    ButtonPressed,
    /// Regulation hardware reported ramp convergence
    RampConverged,
    /// Fault condition from the protection monitor or the external
    /// hardware fault signal
    FaultDetected(FaultKind),
}

impl Event {
    /// Check if this event is operator-initiated
    pub fn is_operator_event(&self) -> bool {
        matches!(self, Event::ButtonPressed)
    }

    /// Check if this event indicates a fault
    pub fn is_fault_event(&self) -> bool {
        matches!(self, Event::FaultDetected(_))
    }
}

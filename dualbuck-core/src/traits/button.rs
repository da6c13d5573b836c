//! Operator button gating capability
//!
//! The debounced press events themselves arrive through the supervisor's
//! button entry point; this trait only controls whether the interrupt
//! source delivers them. Gating it off during the ramp prevents a second
//! start racing an in-progress soft start.

/// Trait for enabling/disabling the debounced button interrupt source
pub trait ButtonGate {
    /// Enable or disable delivery of button events
    fn set_enabled(&mut self, enabled: bool);
}

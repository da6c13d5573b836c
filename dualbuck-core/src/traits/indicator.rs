//! Operator indicator and load-pulse capabilities

use crate::state::RunPattern;

/// Trait for the fault and run indicators
pub trait Indicators {
    /// Assert or clear the fault indicator
    fn set_fault(&mut self, asserted: bool);

    /// Drive the run indicator with the given pattern
    fn set_run(&mut self, pattern: RunPattern);
}

/// Trait for the load-transient pulse generator
///
/// Used in Test mode to evaluate regulation performance under load steps.
pub trait LoadPulser {
    /// Start generating load pulses
    fn start(&mut self);

    /// Stop generating load pulses
    fn stop(&mut self);
}

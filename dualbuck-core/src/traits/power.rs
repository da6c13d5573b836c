//! Power stage capability
//!
//! The inner current-mode regulation loop runs in hardware; the core only
//! commands a reference, enables/disables the stage, and reads back the
//! two-flag convergence status.

use crate::ramp::ConvergenceStatus;

/// Errors reported by the power-stage enable/disable path
///
/// Any of these is fatal: if the disable path itself cannot be trusted,
/// the system must halt rather than continue in an indeterminate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerStageError {
    /// The enable request was rejected
    EnableFailed,
    /// The disable request was rejected
    DisableFailed,
}

/// Trait for the converter power stage and its soft-start tick source
pub trait PowerStage {
    /// Command the output reference (PWM compare counts, both phases)
    fn set_reference(&mut self, reference: u32);

    /// Enable and start the converter
    fn enable(&mut self) -> Result<(), PowerStageError>;

    /// Disable the converter output
    fn disable(&mut self) -> Result<(), PowerStageError>;

    /// Arm the hardware output-voltage protection
    fn enable_output_protection(&mut self);

    /// Read the regulation convergence status
    fn convergence_status(&mut self) -> ConvergenceStatus;

    /// Start the periodic soft-start tick source
    fn start_ramp_timer(&mut self);

    /// Stop the soft-start tick source
    fn stop_ramp_timer(&mut self);
}

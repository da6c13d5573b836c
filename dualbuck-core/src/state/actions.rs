//! Side-effect commands emitted by state transitions
//!
//! The transition table is the single authority on what happens when the
//! mode changes; the supervisor executes these commands against the
//! hardware capabilities in the order they are listed.

/// Run-indicator drive pattern
///
/// The firmware maps these onto whatever the board uses for the run LED
/// (a PWM compare value on the original hardware).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunPattern {
    /// Indicator off
    Off,
    /// Indicator on, steady
    Solid,
    /// Indicator toggling (transient-test mode)
    Blink,
}

/// One side effect of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Re-prime the telemetry filters for a fresh enable
    ResetProtection,
    /// Reset the soft-start reference to zero and command it
    ResetRamp,
    /// Command the exact steady-state reference after convergence
    SnapReference,
    /// Enable the converter power stage (fatal if the call fails)
    EnableConverter,
    /// Disable the converter power stage (fatal if the call fails)
    DisableConverter,
    /// Enable hardware output-voltage protection
    EnableOutputProtection,
    /// Start the soft-start tick source
    StartRampTimer,
    /// Stop the soft-start tick source
    StopRampTimer,
    /// Re-enable the operator button input
    EnableButton,
    /// Disable the operator button input
    DisableButton,
    /// Drive the run indicator with the given pattern
    SetRunIndicator(RunPattern),
    /// Assert the fault indicator
    AssertFaultIndicator,
    /// Clear the fault indicator
    ClearFaultIndicator,
    /// Start the load-transient pulse generator
    StartLoadPulse,
    /// Stop the load-transient pulse generator
    StopLoadPulse,
}

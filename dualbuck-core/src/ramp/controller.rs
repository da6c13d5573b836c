//! Soft-start ramp controller
//!
//! Driven once per tick while the converter is in the Ramping state.
//! Convergence is an opaque two-flag signal from the regulation
//! hardware; its derivation is out of scope here.

/// Convergence status reported by the regulation hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConvergenceStatus {
    /// Regulation loop is active
    pub running: bool,
    /// Regulation loop is still in its ramp phase
    pub still_ramping: bool,
}

impl ConvergenceStatus {
    /// True once regulation has reached steady state
    pub fn converged(&self) -> bool {
        self.running && !self.still_ramping
    }
}

/// Soft-start ramp parameters (PWM compare counts)
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampConfig {
    /// Reference increment per tick
    pub step: u32,
    /// Final steady-state reference
    pub target: u32,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            step: 2,
            target: 1200,
        }
    }
}

/// Ramp progress for one soft-start episode
///
/// The reference is monotonically non-decreasing for the duration of one
/// episode. There is no internal timeout: if the hardware never reports
/// convergence the ramp keeps stepping, matching the reference design.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampController {
    config: RampConfig,
    reference: u32,
}

impl RampController {
    /// Create a controller at zero reference
    pub const fn new(config: RampConfig) -> Self {
        Self {
            config,
            reference: 0,
        }
    }

    /// Reset to zero reference on entry to Ramping
    pub fn reset(&mut self) {
        self.reference = 0;
    }

    /// Step the reference once and return the value to command
    pub fn advance(&mut self) -> u32 {
        self.reference += self.config.step;
        self.reference
    }

    /// Snap to the exact final target once converged
    ///
    /// The commanded value is the configured target, not the last stepped
    /// value, so no residual stepping error persists into steady state.
    pub fn finish(&mut self) -> u32 {
        self.reference = self.config.target;
        self.reference
    }

    /// Current commanded reference
    pub fn reference(&self) -> u32 {
        self.reference
    }
}

//! Configuration type definitions
//!
//! All configuration is fixed at build time; there is no persisted state.
//! Values are expressed in raw ADC counts (12-bit) and PWM compare counts,
//! matching what the sampling and output-stage hardware produces.

use crate::protection::Thresholds;
use crate::ramp::RampConfig;

/// Number of samples in the telemetry averaging window
pub const AVERAGING_SAMPLES: u32 = 8;

/// ADC count corresponding to the nominal 24 V input
///
/// The input-voltage average is primed to this value so the very first
/// samples after enable do not trip the undervoltage check.
pub const VIN_NOMINAL_COUNT: f32 = 1906.0;

/// Complete supervisory configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConverterConfig {
    /// Protection thresholds (raw ADC counts)
    pub thresholds: Thresholds,
    /// Soft-start ramp parameters (PWM compare counts)
    pub ramp: RampConfig,
    /// Primed value for the input-voltage average
    pub vin_primed: f32,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            ramp: RampConfig::default(),
            vin_primed: VIN_NOMINAL_COUNT,
        }
    }
}

//! Exponential moving average filter
//!
//! A single out-of-range sample must not trip a protection fault, but a
//! sustained out-of-range condition must. The EMA attenuates a lone spike
//! by 1/N per update while converging to the true value within a few
//! update periods, which gives exactly that behavior with O(1) memory.

use crate::config::{ConverterConfig, AVERAGING_SAMPLES};

/// One raw telemetry acquisition (12-bit ADC counts, widened to f32)
///
/// Produced once per tick by the scheduled ADC group; immutable once
/// captured.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetrySample {
    /// Input voltage channel
    pub vin: f32,
    /// Output current, phase 1
    pub iout1: f32,
    /// Output current, phase 2
    pub iout2: f32,
    /// Power-stage temperature channel
    pub temp: f32,
}

/// Single-channel exponential moving average
///
/// Approximates an N-sample box average: `a' = a - (a - s) / N`.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmaFilter {
    avg: f32,
}

impl EmaFilter {
    /// Create a filter primed to the given initial average
    pub const fn primed(initial: f32) -> Self {
        Self { avg: initial }
    }

    /// Fold one sample into the running average and return the new value
    pub fn update(&mut self, sample: f32) -> f32 {
        self.avg -= (self.avg - sample) / AVERAGING_SAMPLES as f32;
        self.avg
    }

    /// Current average without updating
    pub fn value(&self) -> f32 {
        self.avg
    }

    /// Re-prime the filter to a new initial average
    pub fn reset(&mut self, initial: f32) {
        self.avg = initial;
    }
}

/// Running averages for all four telemetry channels
///
/// Meaningful only while the converter is enabled; reset on every
/// Idle -> Ramping transition and never across Run <-> Test (the
/// converter stays enabled there, so history remains valid).
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilteredTelemetry {
    /// Input voltage average, primed to the nominal count
    pub vin: EmaFilter,
    /// Phase 1 output current average
    pub iout1: EmaFilter,
    /// Phase 2 output current average
    pub iout2: EmaFilter,
    /// Temperature average
    pub temp: EmaFilter,
}

impl FilteredTelemetry {
    /// Create filters primed per the configuration
    ///
    /// The input-voltage channel is primed to the nominal expected count
    /// so the undervoltage check does not fire before real input has
    /// propagated through the window; the other channels start at zero.
    pub const fn primed(config: &ConverterConfig) -> Self {
        Self {
            vin: EmaFilter::primed(config.vin_primed),
            iout1: EmaFilter::primed(0.0),
            iout2: EmaFilter::primed(0.0),
            temp: EmaFilter::primed(0.0),
        }
    }

    /// Re-prime all four channels to their initial values
    pub fn reset(&mut self, config: &ConverterConfig) {
        self.vin.reset(config.vin_primed);
        self.iout1.reset(0.0);
        self.iout2.reset(0.0);
        self.temp.reset(0.0);
    }

    /// Fold one acquisition into all four running averages
    pub fn update(&mut self, sample: &TelemetrySample) {
        self.vin.update(sample.vin);
        self.iout1.update(sample.iout1);
        self.iout2.update(sample.iout2);
        self.temp.update(sample.temp);
    }
}

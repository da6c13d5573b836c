//! Protection monitor implementation
//!
//! Runs once per telemetry acquisition, after filtering. A threshold
//! violation is not a program error; it is the designed trigger for the
//! fault sequence, so the result is a plain `Option<FaultKind>` rather
//! than a `Result`.

use crate::config::ConverterConfig;
use crate::state::FaultKind;
use crate::telemetry::{FilteredTelemetry, TelemetrySample};

/// Protection thresholds in raw ADC counts (12-bit)
///
/// Read-only for the lifetime of the system.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    /// Minimum input-voltage average
    pub vin_min: f32,
    /// Maximum input-voltage average
    pub vin_max: f32,
    /// Maximum phase 1 output-current average
    pub iout1_max: f32,
    /// Maximum phase 2 output-current average
    pub iout2_max: f32,
    /// Maximum temperature average
    pub temp_max: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        // 24 V nominal input: trip below ~18 V or above ~30 V
        Self {
            vin_min: 1430.0,
            vin_max: 2383.0,
            iout1_max: 3100.0,
            iout2_max: 3100.0,
            temp_max: 2600.0,
        }
    }
}

/// Threshold fault detection over filtered telemetry
///
/// Owns the running averages so that filtering and evaluation always
/// happen together, in the same invocation that produced the sample.
#[derive(Debug, Clone)]
pub struct ProtectionMonitor {
    filters: FilteredTelemetry,
    thresholds: Thresholds,
}

impl ProtectionMonitor {
    /// Create a monitor with primed filters
    pub const fn new(config: &ConverterConfig) -> Self {
        Self {
            filters: FilteredTelemetry::primed(config),
            thresholds: config.thresholds,
        }
    }

    /// Re-prime the filters for a new converter enable
    pub fn reset(&mut self, config: &ConverterConfig) {
        self.filters.reset(config);
    }

    /// Fold one acquisition into the averages and evaluate all thresholds
    ///
    /// Returns the first violated condition, or `None` when everything is
    /// in range. The caller must run the fault sequence before returning
    /// from the invocation that received the sample.
    pub fn sample(&mut self, sample: &TelemetrySample) -> Option<FaultKind> {
        self.filters.update(sample);
        self.check()
    }

    /// Evaluate thresholds against the current averages
    ///
    /// Conditions are checked in a fixed order; since all are OR'd the
    /// order does not change whether a fault fires, only which kind is
    /// reported when several trip at once.
    pub fn check(&self) -> Option<FaultKind> {
        if self.filters.vin.value() < self.thresholds.vin_min {
            return Some(FaultKind::InputUnderVoltage);
        }
        if self.filters.vin.value() > self.thresholds.vin_max {
            return Some(FaultKind::InputOverVoltage);
        }
        if self.filters.iout1.value() > self.thresholds.iout1_max {
            return Some(FaultKind::OverCurrent1);
        }
        if self.filters.iout2.value() > self.thresholds.iout2_max {
            return Some(FaultKind::OverCurrent2);
        }
        if self.filters.temp.value() > self.thresholds.temp_max {
            return Some(FaultKind::OverTemperature);
        }
        None
    }

    /// Current filtered telemetry (read-only, for display/reporting)
    pub fn telemetry(&self) -> &FilteredTelemetry {
        &self.filters
    }
}

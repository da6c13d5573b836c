//! Telemetry acquisition capability

use crate::telemetry::TelemetrySample;

/// Errors reported by the acquisition hardware
///
/// Acquisition failure is fatal (the protection path depends on it), so
/// the firmware halts on any of these rather than running blind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquireError {
    /// Conversion did not complete in time
    Timeout,
    /// Result register reported an invalid conversion
    Invalid,
}

/// Trait for the scheduled ADC group sampling all four channels
pub trait TelemetrySource {
    /// Trigger the next scheduled acquisition
    fn trigger(&mut self);

    /// Read the completed acquisition
    fn acquire(&mut self) -> Result<TelemetrySample, AcquireError>;
}

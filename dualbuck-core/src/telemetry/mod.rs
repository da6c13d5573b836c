//! Telemetry filtering
//!
//! Converts raw per-channel ADC samples into smoothed estimates using a
//! single-pole exponential moving average.

pub mod filter;

pub use filter::{EmaFilter, FilteredTelemetry, TelemetrySample};

//! Protection monitoring
//!
//! Evaluates filtered telemetry against fixed thresholds and reports
//! fault conditions for the supervisor to act on.

pub mod monitor;

pub use monitor::{ProtectionMonitor, Thresholds};

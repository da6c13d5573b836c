//! Soft-start ramp control
//!
//! Brings the converter output up gradually to limit inrush current,
//! then snaps to the exact steady-state reference once the regulation
//! hardware reports convergence.

pub mod controller;

pub use controller::{ConvergenceStatus, RampConfig, RampController};

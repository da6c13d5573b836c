//! Board-agnostic supervisory logic for the dualbuck converter firmware
//!
//! This crate contains all supervisory logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware capability traits (power stage, telemetry, indicators, button)
//! - Converter state machine
//! - Telemetry filtering (exponential moving average)
//! - Protection monitoring (threshold fault detection)
//! - Soft-start ramp control
//! - The supervisor aggregate that ties the above together
//!
//! The inner current-mode regulation loop is not modeled here; the core
//! only sees it through the [`traits::PowerStage`] capability.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod protection;
pub mod ramp;
pub mod state;
pub mod supervisor;
pub mod telemetry;
pub mod traits;

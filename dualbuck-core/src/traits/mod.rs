//! Hardware capability traits
//!
//! These traits define the interface between the supervisory logic and
//! hardware-specific implementations. Register-level configuration and
//! the PWM/ADC drivers themselves live behind these seams.

pub mod button;
pub mod indicator;
pub mod power;
pub mod telemetry;

pub use button::ButtonGate;
pub use indicator::{Indicators, LoadPulser};
pub use power::{PowerStage, PowerStageError};
pub use telemetry::{AcquireError, TelemetrySource};

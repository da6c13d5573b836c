//! Embassy async tasks
//!
//! Each handler of the supervisory model is one task: the periodic tick
//! (ramp + telemetry), the operator button, the external hardware fault
//! line, and a status reporter.

pub mod button;
pub mod fault;
pub mod status;
pub mod tick;

pub use button::button_task;
pub use fault::fault_task;
pub use status::status_task;
pub use tick::tick_task;

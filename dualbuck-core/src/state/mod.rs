//! Converter state machine
//!
//! Defines the authoritative operating-mode behavior of the converter.
//! The state machine is explicit, finite, and deterministic; every side
//! effect of a transition is expressed as an [`Action`] command so no
//! other component re-implements transition logic.

pub mod actions;
pub mod events;
pub mod machine;

pub use actions::{Action, RunPattern};
pub use events::Event;
pub use machine::{ConverterState, FaultKind, Transition};

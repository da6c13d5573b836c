//! Supervisor aggregate
//!
//! The single shared controller context and its interrupt entry points.

pub mod context;

pub use context::Supervisor;

//! State shared between tasks
//!
//! The supervisor is the single shared mutable aggregate; every handler
//! locks it for one run-to-completion call, which is what makes the fault
//! sequence atomic relative to the other entry points. The two atomics
//! mirror the original hardware's interrupt-source gating: the board
//! capability implementations write them, the tasks read them before
//! delivering events.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use dualbuck_core::supervisor::Supervisor;

use crate::board::EvalBoard;

/// The supervisor, serialized under a critical section
pub type SharedSupervisor = Mutex<CriticalSectionRawMutex, RefCell<Supervisor<EvalBoard>>>;

/// Gate for the debounced button event source
static BUTTON_ENABLED: AtomicBool = AtomicBool::new(true);

/// Gate for the soft-start/telemetry tick source
///
/// Started on Idle -> Ramping, stopped on Test -> Idle; telemetry is only
/// acquired while this runs, matching the converter-enabled states.
static TICK_RUNNING: AtomicBool = AtomicBool::new(false);

pub fn set_button_enabled(enabled: bool) {
    BUTTON_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn button_enabled() -> bool {
    BUTTON_ENABLED.load(Ordering::Relaxed)
}

pub fn set_tick_running(running: bool) {
    TICK_RUNNING.store(running, Ordering::Relaxed);
}

pub fn tick_running() -> bool {
    TICK_RUNNING.load(Ordering::Relaxed)
}

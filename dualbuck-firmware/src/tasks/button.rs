//! Operator button task
//!
//! Debounces the user button and feeds press events to the supervisor.
//! Events are dropped while the gate is off (soft start in progress),
//! the same exclusion the original achieved by masking the button IRQ.

use defmt::*;
use embassy_stm32::exti::ExtiInput;
use embassy_time::Timer;

use crate::shared::{self, SharedSupervisor};

/// Settle time after an edge before the press is accepted
const DEBOUNCE_MS: u64 = 30;

/// Button task - debounced, gated operator input
#[embassy_executor::task]
pub async fn button_task(supervisor: &'static SharedSupervisor, mut button: ExtiInput<'static>) {
    info!("Button task started");

    loop {
        button.wait_for_falling_edge().await;

        Timer::after_millis(DEBOUNCE_MS).await;
        if button.is_high() {
            // Bounce, not a press
            continue;
        }

        if !shared::button_enabled() {
            debug!("Button press ignored (input gated off)");
            button.wait_for_rising_edge().await;
            continue;
        }

        let result = supervisor.lock(|cell| cell.borrow_mut().on_button());
        if let Err(e) = result {
            defmt::panic!("power stage failure: {}", e);
        }

        // One event per physical press
        button.wait_for_rising_edge().await;
    }
}

//! External hardware fault task
//!
//! The output-voltage comparator asserts this line when the regulated
//! output leaves its window. The full fault sequence runs inside one
//! supervisor lock, so the converter is disabled before any other
//! handler can touch converter state.

use defmt::*;
use embassy_stm32::exti::ExtiInput;

use crate::shared::SharedSupervisor;

/// Hardware fault task - latches a fault on the comparator edge
#[embassy_executor::task]
pub async fn fault_task(supervisor: &'static SharedSupervisor, mut fault_line: ExtiInput<'static>) {
    info!("Hardware fault task started");

    loop {
        fault_line.wait_for_falling_edge().await;
        warn!("Hardware output-voltage fault asserted");

        let result = supervisor.lock(|cell| cell.borrow_mut().on_hardware_fault());
        if let Err(e) = result {
            defmt::panic!("power stage failure: {}", e);
        }

        fault_line.wait_for_rising_edge().await;
    }
}

//! Status reporting task
//!
//! Periodic defmt report of the operating mode and filtered telemetry,
//! read through the supervisor's read-only queries. Reporting never
//! re-implements transition logic; it only displays state.

use defmt::*;
use embassy_time::{Duration, Ticker};

use dualbuck_core::state::ConverterState;

use crate::shared::SharedSupervisor;

/// Status task - 1 Hz state and telemetry report
#[embassy_executor::task]
pub async fn status_task(supervisor: &'static SharedSupervisor) {
    info!("Status task started");

    let mut ticker = Ticker::every(Duration::from_secs(1));

    loop {
        ticker.next().await;

        let (state, vin, iout1, iout2, temp, fault) = supervisor.lock(|cell| {
            let sup = cell.borrow();
            let t = sup.telemetry();
            (
                sup.state(),
                t.vin.value(),
                t.iout1.value(),
                t.iout2.value(),
                t.temp.value(),
                sup.last_fault(),
            )
        });

        match state {
            ConverterState::Fault => {
                warn!("state={} fault={}", state, fault);
            }
            state if state.is_enabled() => {
                info!(
                    "state={} vin={=f32} iout1={=f32} iout2={=f32} temp={=f32}",
                    state, vin, iout1, iout2, temp
                );
            }
            _ => {
                info!("state={}", state);
            }
        }
    }
}

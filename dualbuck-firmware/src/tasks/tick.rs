//! Soft-start and telemetry tick task
//!
//! Stands in for the original soft-start counter interrupt: every tick
//! acquires one telemetry sample, runs the protection check, and steps
//! the ramp, all inside a single supervisor lock so the sequence
//! "acquire -> filter -> protection -> ramp step" is atomic per tick.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::board::AdcSampler;
use crate::shared::{self, SharedSupervisor};
use dualbuck_core::traits::TelemetrySource;

/// Tick interval; sets the soft-start ramp rate and the sample rate
pub const TICK_INTERVAL_MS: u64 = 1;

/// Tick task - drives ramp stepping and telemetry acquisition
#[embassy_executor::task]
pub async fn tick_task(supervisor: &'static SharedSupervisor, mut sampler: AdcSampler) {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;

        // The tick source is stopped while the converter sits in Idle
        if !shared::tick_running() {
            continue;
        }

        sampler.trigger();
        let sample = match sampler.acquire() {
            Ok(sample) => sample,
            // Running blind would leave the protection path dead; halt.
            Err(e) => defmt::panic!("telemetry acquisition failed: {}", e),
        };

        let result = supervisor.lock(|cell| {
            let mut sup = cell.borrow_mut();
            sup.on_sample(&sample)?;
            sup.on_tick()
        });

        if let Err(e) = result {
            // Enable/disable path reported failure; the safety-critical
            // path is untrustworthy, halt rather than continue.
            defmt::panic!("power stage failure: {}", e);
        }
    }
}

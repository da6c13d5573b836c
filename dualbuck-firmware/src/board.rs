//! Eval-board capability implementations
//!
//! Thin wrappers binding the core's hardware traits to the dual-buck
//! evaluation board: TIM1 drives the two phase references, TIM3 the run
//! LED, TIM4 the load-transient pulses; the fault LED is a plain GPIO
//! (active low, as wired on the board).

use embassy_stm32::adc::{Adc, AnyAdcChannel};
use embassy_stm32::gpio::{Input, Output};
use embassy_stm32::peripherals::{ADC1, TIM1, TIM3, TIM4};
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;

use dualbuck_core::ramp::ConvergenceStatus;
use dualbuck_core::state::RunPattern;
use dualbuck_core::telemetry::TelemetrySample;
use dualbuck_core::traits::{
    AcquireError, ButtonGate, Indicators, LoadPulser, PowerStage, PowerStageError,
    TelemetrySource,
};

use crate::shared;

/// Board capabilities handed to the supervisor
pub struct EvalBoard {
    /// Phase 1 reference compare channel
    pub phase1: SimplePwmChannel<'static, TIM1>,
    /// Phase 2 reference compare channel
    pub phase2: SimplePwmChannel<'static, TIM1>,
    /// Run indicator, slow PWM so half duty reads as blinking
    pub run_led: SimplePwmChannel<'static, TIM3>,
    /// Load-transient pulse generator
    pub load_pulse: SimplePwmChannel<'static, TIM4>,
    /// Fault indicator, active low
    pub fault_led: Output<'static>,
    /// Power-stage enable line
    pub enable: Output<'static>,
    /// Output-voltage protection arm line
    pub ovp_arm: Output<'static>,
    /// Gate-driver fault feedback, active low
    pub driver_nfault: Input<'static>,
    /// Regulation status: loop active
    pub reg_running: Input<'static>,
    /// Regulation status: ramp phase still in progress
    pub reg_ramping: Input<'static>,
}

impl PowerStage for EvalBoard {
    fn set_reference(&mut self, reference: u32) {
        let max = self.phase1.max_duty_cycle() as u32;
        let compare = reference.min(max) as u16;
        self.phase1.set_duty_cycle(compare);
        self.phase2.set_duty_cycle(compare);
    }

    fn enable(&mut self) -> Result<(), PowerStageError> {
        self.enable.set_high();
        self.phase1.enable();
        self.phase2.enable();
        if self.driver_nfault.is_low() {
            return Err(PowerStageError::EnableFailed);
        }
        Ok(())
    }

    fn disable(&mut self) -> Result<(), PowerStageError> {
        self.phase1.disable();
        self.phase2.disable();
        self.enable.set_low();
        // The enable line is the last word; a driver still flagging a
        // fault after it dropped means the disable path is untrustworthy
        if self.driver_nfault.is_low() {
            return Err(PowerStageError::DisableFailed);
        }
        Ok(())
    }

    fn enable_output_protection(&mut self) {
        self.ovp_arm.set_high();
    }

    fn convergence_status(&mut self) -> ConvergenceStatus {
        ConvergenceStatus {
            running: self.reg_running.is_high(),
            still_ramping: self.reg_ramping.is_high(),
        }
    }

    fn start_ramp_timer(&mut self) {
        shared::set_tick_running(true);
    }

    fn stop_ramp_timer(&mut self) {
        shared::set_tick_running(false);
    }
}

impl LoadPulser for EvalBoard {
    fn start(&mut self) {
        self.load_pulse.enable();
    }

    fn stop(&mut self) {
        self.load_pulse.disable();
    }
}

impl Indicators for EvalBoard {
    fn set_fault(&mut self, asserted: bool) {
        // Active low
        if asserted {
            self.fault_led.set_low();
        } else {
            self.fault_led.set_high();
        }
    }

    fn set_run(&mut self, pattern: RunPattern) {
        let max = self.run_led.max_duty_cycle();
        let compare = match pattern {
            RunPattern::Off => 0,
            RunPattern::Solid => max,
            RunPattern::Blink => max / 2,
        };
        self.run_led.set_duty_cycle(compare);
    }
}

impl ButtonGate for EvalBoard {
    fn set_enabled(&mut self, enabled: bool) {
        shared::set_button_enabled(enabled);
    }
}

/// Scheduled four-channel acquisition over ADC1
pub struct AdcSampler {
    pub adc: Adc<'static, ADC1>,
    pub vin: AnyAdcChannel<ADC1>,
    pub iout1: AnyAdcChannel<ADC1>,
    pub iout2: AnyAdcChannel<ADC1>,
    pub temp: AnyAdcChannel<ADC1>,
}

impl TelemetrySource for AdcSampler {
    fn trigger(&mut self) {
        // Conversions here are software-triggered and immediate; the
        // scheduled-group trigger has nothing to arm.
    }

    fn acquire(&mut self) -> Result<TelemetrySample, AcquireError> {
        Ok(TelemetrySample {
            vin: self.adc.blocking_read(&mut self.vin) as f32,
            iout1: self.adc.blocking_read(&mut self.iout1) as f32,
            iout2: self.adc.blocking_read(&mut self.iout2) as f32,
            temp: self.adc.blocking_read(&mut self.temp) as f32,
        })
    }
}

//! Dualbuck - Multi-Phase Buck Converter Supervisory Firmware
//!
//! Supervisory control for a dual-phase synchronous buck converter on
//! the STM32G474 control card: soft-start sequencing, telemetry-based
//! protection, and operator mode arbitration. The peak-current-mode
//! regulation loop itself runs in hardware; this firmware commands its
//! reference and supervises it.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::adc::{Adc, AdcChannel};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::time::{hz, khz};
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_sync::blocking_mutex::Mutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use dualbuck_core::config::ConverterConfig;
use dualbuck_core::supervisor::Supervisor;

use crate::board::{AdcSampler, EvalBoard};
use crate::shared::SharedSupervisor;

mod board;
mod shared;
mod tasks;

// The supervisor must outlive every task referencing it
static SUPERVISOR: StaticCell<SharedSupervisor> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Dualbuck firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    // Phase reference compares, both phases on TIM1
    let phases = SimplePwm::new(
        p.TIM1,
        Some(PwmPin::new_ch1(p.PA8, OutputType::PushPull)),
        Some(PwmPin::new_ch2(p.PA9, OutputType::PushPull)),
        None,
        None,
        khz(200),
        CountingMode::EdgeAlignedUp,
    )
    .split();

    // Run LED on a slow PWM so half duty reads as blinking
    let run_led = SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new_ch1(p.PB4, OutputType::PushPull)),
        None,
        None,
        None,
        hz(2),
        CountingMode::EdgeAlignedUp,
    )
    .split();
    let mut run_led = run_led.ch1;
    run_led.enable();
    run_led.set_duty_cycle(0);

    // Load-transient pulse generator
    let load_pulse = SimplePwm::new(
        p.TIM4,
        Some(PwmPin::new_ch1(p.PB6, OutputType::PushPull)),
        None,
        None,
        None,
        hz(100),
        CountingMode::EdgeAlignedUp,
    )
    .split();
    let mut load_pulse = load_pulse.ch1;
    load_pulse.set_duty_cycle_fraction(1, 2);

    let board = EvalBoard {
        phase1: phases.ch1,
        phase2: phases.ch2,
        run_led,
        load_pulse,
        // Fault LED is active low; start extinguished
        fault_led: Output::new(p.PB5, Level::High, Speed::Low),
        enable: Output::new(p.PB10, Level::Low, Speed::Low),
        ovp_arm: Output::new(p.PB11, Level::Low, Speed::Low),
        driver_nfault: Input::new(p.PB12, Pull::Up),
        reg_running: Input::new(p.PC0, Pull::Down),
        reg_ramping: Input::new(p.PC1, Pull::Down),
    };

    // Telemetry channels: vin, iout1, iout2, temperature
    let adc = Adc::new(p.ADC1);
    let sampler = AdcSampler {
        adc,
        vin: p.PA0.degrade_adc(),
        iout1: p.PA1.degrade_adc(),
        iout2: p.PA2.degrade_adc(),
        temp: p.PA3.degrade_adc(),
    };

    let button = ExtiInput::new(p.PC13, p.EXTI13, Pull::Up);
    let fault_line = ExtiInput::new(p.PB0, p.EXTI0, Pull::Up);

    let supervisor: &'static SharedSupervisor = SUPERVISOR.init(Mutex::new(RefCell::new(
        Supervisor::new(board, ConverterConfig::default()),
    )));

    spawner.spawn(tasks::tick_task(supervisor, sampler)).unwrap();
    spawner.spawn(tasks::button_task(supervisor, button)).unwrap();
    spawner.spawn(tasks::fault_task(supervisor, fault_line)).unwrap();
    spawner.spawn(tasks::status_task(supervisor)).unwrap();

    info!("Supervisor ready; press the user button to start the converter");
}

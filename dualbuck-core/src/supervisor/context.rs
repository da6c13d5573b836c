//! Supervisor aggregate
//!
//! One exclusively-owned context holding the state machine, protection
//! monitor, ramp controller, and the board capabilities. Every interrupt
//! entry point is a method here; the firmware serializes calls under a
//! critical section so the fault sequence runs as one atomic unit
//! relative to the other handlers.

use crate::config::ConverterConfig;
use crate::protection::ProtectionMonitor;
use crate::ramp::RampController;
use crate::state::{Action, ConverterState, Event, FaultKind};
use crate::telemetry::{FilteredTelemetry, TelemetrySample};
use crate::traits::{ButtonGate, Indicators, LoadPulser, PowerStage, PowerStageError};

/// Supervisory controller for one dual-phase converter
///
/// `B` provides the board capabilities. All mode changes flow through the
/// state-machine transition table; this type only executes the resulting
/// action lists and owns the mutable state they touch.
pub struct Supervisor<B> {
    board: B,
    config: ConverterConfig,
    state: ConverterState,
    protection: ProtectionMonitor,
    ramp: RampController,
    last_fault: Option<FaultKind>,
}

impl<B> Supervisor<B>
where
    B: PowerStage + LoadPulser + Indicators + ButtonGate,
{
    /// Create a supervisor in the Idle state
    pub fn new(board: B, config: ConverterConfig) -> Self {
        let protection = ProtectionMonitor::new(&config);
        let ramp = RampController::new(config.ramp);
        Self {
            board,
            config,
            state: ConverterState::Idle,
            protection,
            ramp,
            last_fault: None,
        }
    }

    /// Current operating mode (read-only, for display/reporting)
    pub fn state(&self) -> ConverterState {
        self.state
    }

    /// Current filtered telemetry (read-only, for display/reporting)
    pub fn telemetry(&self) -> &FilteredTelemetry {
        self.protection.telemetry()
    }

    /// The condition that caused the most recent fault latch, if any
    pub fn last_fault(&self) -> Option<FaultKind> {
        self.last_fault
    }

    /// Debounced operator button press
    ///
    /// Ignored while Ramping even if the hardware gate let one through;
    /// the transition table is the authority on button handling.
    pub fn on_button(&mut self) -> Result<(), PowerStageError> {
        if !self.state.button_allowed() {
            return Ok(());
        }
        self.apply(Event::ButtonPressed)
    }

    /// Periodic soft-start tick
    ///
    /// While Ramping: step the reference, command it, and check the
    /// two-flag convergence status. On convergence the Ramping -> Run
    /// transition snaps the reference to the exact configured target.
    /// Outside Ramping the tick only keeps telemetry acquisition going,
    /// which the firmware handles around this call.
    pub fn on_tick(&mut self) -> Result<(), PowerStageError> {
        if self.state != ConverterState::Ramping {
            return Ok(());
        }

        let reference = self.ramp.advance();
        self.board.set_reference(reference);

        if self.board.convergence_status().converged() {
            self.apply(Event::RampConverged)?;
        }
        Ok(())
    }

    /// Completed telemetry acquisition
    ///
    /// Filters and evaluates protection in the same invocation, so a
    /// tripped threshold fully disables the converter before this
    /// returns. Samples are only meaningful while the converter is
    /// enabled; anything else is dropped.
    pub fn on_sample(&mut self, sample: &TelemetrySample) -> Result<(), PowerStageError> {
        if !self.state.is_enabled() {
            return Ok(());
        }
        if let Some(kind) = self.protection.sample(sample) {
            self.apply(Event::FaultDetected(kind))?;
        }
        Ok(())
    }

    /// External hardware output-voltage fault signal
    pub fn on_hardware_fault(&mut self) -> Result<(), PowerStageError> {
        self.apply(Event::FaultDetected(FaultKind::OutputOverVoltage))
    }

    /// Run one event through the transition table and execute its side
    /// effects in order
    fn apply(&mut self, event: Event) -> Result<(), PowerStageError> {
        if let Event::FaultDetected(kind) = event {
            self.last_fault = Some(kind);
        }

        let transition = self.state.transition(event);
        for action in &transition.actions {
            self.execute(*action)?;
        }
        self.state = transition.next;
        Ok(())
    }

    /// Execute one side-effect command against the board
    fn execute(&mut self, action: Action) -> Result<(), PowerStageError> {
        match action {
            Action::ResetProtection => self.protection.reset(&self.config),
            Action::ResetRamp => {
                self.ramp.reset();
                self.board.set_reference(0);
            }
            Action::SnapReference => {
                let target = self.ramp.finish();
                self.board.set_reference(target);
            }
            Action::EnableConverter => self.board.enable()?,
            Action::DisableConverter => self.board.disable()?,
            Action::EnableOutputProtection => self.board.enable_output_protection(),
            Action::StartRampTimer => self.board.start_ramp_timer(),
            Action::StopRampTimer => self.board.stop_ramp_timer(),
            Action::EnableButton => self.board.set_enabled(true),
            Action::DisableButton => self.board.set_enabled(false),
            Action::SetRunIndicator(pattern) => self.board.set_run(pattern),
            Action::AssertFaultIndicator => self.board.set_fault(true),
            Action::ClearFaultIndicator => self.board.set_fault(false),
            Action::StartLoadPulse => LoadPulser::start(&mut self.board),
            Action::StopLoadPulse => LoadPulser::stop(&mut self.board),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ramp::ConvergenceStatus;
    use crate::state::RunPattern;
    use heapless::Vec;

    /// Everything the supervisor did to the hardware, in order
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        SetReference(u32),
        Enable,
        Disable,
        OutputProtection,
        RampTimerStart,
        RampTimerStop,
        Button(bool),
        Run(RunPattern),
        FaultLed(bool),
        PulseStart,
        PulseStop,
    }

    #[derive(Debug, Default)]
    struct MockBoard {
        calls: Vec<Call, 128>,
        converged: bool,
        fail_disable: bool,
    }

    impl MockBoard {
        fn record(&mut self, call: Call) {
            self.calls.push(call).unwrap();
        }
    }

    impl PowerStage for MockBoard {
        fn set_reference(&mut self, reference: u32) {
            self.record(Call::SetReference(reference));
        }

        fn enable(&mut self) -> Result<(), PowerStageError> {
            self.record(Call::Enable);
            Ok(())
        }

        fn disable(&mut self) -> Result<(), PowerStageError> {
            if self.fail_disable {
                return Err(PowerStageError::DisableFailed);
            }
            self.record(Call::Disable);
            Ok(())
        }

        fn enable_output_protection(&mut self) {
            self.record(Call::OutputProtection);
        }

        fn convergence_status(&mut self) -> ConvergenceStatus {
            ConvergenceStatus {
                running: true,
                still_ramping: !self.converged,
            }
        }

        fn start_ramp_timer(&mut self) {
            self.record(Call::RampTimerStart);
        }

        fn stop_ramp_timer(&mut self) {
            self.record(Call::RampTimerStop);
        }
    }

    impl LoadPulser for MockBoard {
        fn start(&mut self) {
            self.record(Call::PulseStart);
        }

        fn stop(&mut self) {
            self.record(Call::PulseStop);
        }
    }

    impl Indicators for MockBoard {
        fn set_fault(&mut self, asserted: bool) {
            self.record(Call::FaultLed(asserted));
        }

        fn set_run(&mut self, pattern: RunPattern) {
            self.record(Call::Run(pattern));
        }
    }

    impl ButtonGate for MockBoard {
        fn set_enabled(&mut self, enabled: bool) {
            self.record(Call::Button(enabled));
        }
    }

    fn supervisor() -> Supervisor<MockBoard> {
        Supervisor::new(MockBoard::default(), ConverterConfig::default())
    }

    fn in_range_sample() -> TelemetrySample {
        TelemetrySample {
            vin: ConverterConfig::default().vin_primed,
            iout1: 1000.0,
            iout2: 1000.0,
            temp: 1000.0,
        }
    }

    /// Drive a fresh supervisor into the Run state
    fn start_and_converge(sup: &mut Supervisor<MockBoard>) {
        sup.on_button().unwrap();
        assert_eq!(sup.state(), ConverterState::Ramping);
        sup.board.converged = true;
        sup.on_tick().unwrap();
        assert_eq!(sup.state(), ConverterState::Run);
    }

    #[test]
    fn test_startup_sequence() {
        let mut sup = supervisor();
        sup.on_button().unwrap();

        assert_eq!(sup.state(), ConverterState::Ramping);
        assert_eq!(
            sup.board.calls.as_slice(),
            &[
                Call::SetReference(0),
                Call::Enable,
                Call::Button(false),
                Call::Run(RunPattern::Solid),
                Call::FaultLed(false),
                Call::RampTimerStart,
            ]
        );
    }

    #[test]
    fn test_ramp_steps_linearly() {
        let mut sup = supervisor();
        sup.on_button().unwrap();
        sup.board.calls.clear();

        let step = ConverterConfig::default().ramp.step;
        for k in 1..=5u32 {
            sup.on_tick().unwrap();
            assert_eq!(
                sup.board.calls.last(),
                Some(&Call::SetReference(k * step))
            );
        }
        assert_eq!(sup.state(), ConverterState::Ramping);
    }

    #[test]
    fn test_button_locked_out_during_ramp() {
        // Simulate the button permanently "pending": every tick also
        // delivers a press. No transition may happen until convergence.
        let mut sup = supervisor();
        sup.on_button().unwrap();

        for _ in 0..10 {
            sup.on_tick().unwrap();
            sup.on_button().unwrap();
            assert_eq!(sup.state(), ConverterState::Ramping);
        }

        sup.board.converged = true;
        sup.on_tick().unwrap();
        assert_eq!(sup.state(), ConverterState::Run);
    }

    #[test]
    fn test_convergence_snaps_to_target() {
        let mut sup = supervisor();
        sup.on_button().unwrap();
        for _ in 0..3 {
            sup.on_tick().unwrap();
        }

        sup.board.converged = true;
        sup.board.calls.clear();
        sup.on_tick().unwrap();

        let config = ConverterConfig::default();
        assert_eq!(sup.state(), ConverterState::Run);
        // Stepped reference first, then the exact target, protection
        // armed, button unlocked
        assert_eq!(
            sup.board.calls.as_slice(),
            &[
                Call::SetReference(4 * config.ramp.step),
                Call::SetReference(config.ramp.target),
                Call::OutputProtection,
                Call::Button(true),
            ]
        );
    }

    #[test]
    fn test_tick_is_noop_outside_ramping() {
        let mut sup = supervisor();
        sup.on_tick().unwrap();
        assert!(sup.board.calls.is_empty());
        assert_eq!(sup.state(), ConverterState::Idle);
    }

    #[test]
    fn test_run_test_idle_cycle() {
        let mut sup = supervisor();
        start_and_converge(&mut sup);

        sup.board.calls.clear();
        sup.on_button().unwrap();
        assert_eq!(sup.state(), ConverterState::Test);
        assert_eq!(
            sup.board.calls.as_slice(),
            &[Call::PulseStart, Call::Run(RunPattern::Blink)]
        );

        sup.board.calls.clear();
        sup.on_button().unwrap();
        assert_eq!(sup.state(), ConverterState::Idle);
        assert_eq!(
            sup.board.calls.as_slice(),
            &[
                Call::Run(RunPattern::Off),
                Call::PulseStop,
                Call::Disable,
                Call::RampTimerStop,
            ]
        );
    }

    #[test]
    fn test_threshold_trip_disables_in_same_call() {
        let mut sup = supervisor();
        start_and_converge(&mut sup);

        let overcurrent = TelemetrySample {
            iout1: 4095.0,
            ..in_range_sample()
        };

        sup.board.calls.clear();
        let mut tripped = false;
        for _ in 0..32 {
            sup.on_sample(&overcurrent).unwrap();
            if sup.state().is_fault() {
                tripped = true;
                break;
            }
            // Until the average crosses the threshold, nothing happens
            assert!(sup.board.calls.is_empty());
        }

        assert!(tripped);
        assert_eq!(sup.last_fault(), Some(FaultKind::OverCurrent1));
        assert_eq!(
            sup.board.calls.as_slice(),
            &[
                Call::Disable,
                Call::PulseStop,
                Call::FaultLed(true),
                Call::Run(RunPattern::Off),
                Call::Button(true),
            ]
        );
    }

    #[test]
    fn test_undervoltage_trips_after_history_decays() {
        let mut sup = supervisor();
        start_and_converge(&mut sup);

        let dead_input = TelemetrySample {
            vin: 0.0,
            ..in_range_sample()
        };
        for _ in 0..16 {
            sup.on_sample(&dead_input).unwrap();
        }
        assert!(sup.state().is_fault());
        assert_eq!(sup.last_fault(), Some(FaultKind::InputUnderVoltage));
    }

    #[test]
    fn test_hardware_fault_path() {
        let mut sup = supervisor();
        start_and_converge(&mut sup);

        sup.board.calls.clear();
        sup.on_hardware_fault().unwrap();

        assert!(sup.state().is_fault());
        assert_eq!(sup.last_fault(), Some(FaultKind::OutputOverVoltage));
        assert_eq!(sup.board.calls.first(), Some(&Call::Disable));
    }

    #[test]
    fn test_fault_latches_until_acknowledged() {
        let mut sup = supervisor();
        start_and_converge(&mut sup);
        sup.on_hardware_fault().unwrap();

        // In-range samples while latched change nothing
        for _ in 0..8 {
            sup.on_sample(&in_range_sample()).unwrap();
            assert!(sup.state().is_fault());
        }

        // Operator acknowledgment returns to Idle
        sup.board.calls.clear();
        sup.on_button().unwrap();
        assert_eq!(sup.state(), ConverterState::Idle);
        assert_eq!(sup.board.calls.as_slice(), &[Call::FaultLed(false)]);
    }

    #[test]
    fn test_restart_after_fault_reprimes_filters() {
        let mut sup = supervisor();
        start_and_converge(&mut sup);

        // Latch an overcurrent fault
        let overcurrent = TelemetrySample {
            iout1: 4095.0,
            ..in_range_sample()
        };
        for _ in 0..32 {
            sup.on_sample(&overcurrent).unwrap();
        }
        assert!(sup.state().is_fault());

        // Acknowledge and restart; stale current history must be gone
        sup.on_button().unwrap();
        sup.on_button().unwrap();
        assert_eq!(sup.state(), ConverterState::Ramping);
        for _ in 0..16 {
            sup.on_sample(&in_range_sample()).unwrap();
        }
        assert_eq!(sup.state(), ConverterState::Ramping);
    }

    #[test]
    fn test_samples_ignored_while_idle() {
        let mut sup = supervisor();
        let garbage = TelemetrySample {
            vin: 0.0,
            iout1: 4095.0,
            iout2: 4095.0,
            temp: 4095.0,
        };
        for _ in 0..32 {
            sup.on_sample(&garbage).unwrap();
        }
        assert_eq!(sup.state(), ConverterState::Idle);
        assert!(sup.board.calls.is_empty());
    }

    #[test]
    fn test_disable_failure_is_fatal() {
        let mut sup = supervisor();
        start_and_converge(&mut sup);

        sup.board.fail_disable = true;
        let result = sup.on_hardware_fault();
        assert_eq!(result, Err(PowerStageError::DisableFailed));
    }

    #[test]
    fn test_telemetry_query_tracks_filters() {
        let mut sup = supervisor();
        start_and_converge(&mut sup);

        let sample = in_range_sample();
        sup.on_sample(&sample).unwrap();
        // vin stays at the primed nominal under nominal input
        assert_eq!(sup.telemetry().vin.value(), sample.vin);
        assert!(sup.telemetry().iout1.value() > 0.0);
    }
}

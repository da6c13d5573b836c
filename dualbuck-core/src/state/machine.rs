//! State machine definition
//!
//! All power-stage, indicator, and button-gating behavior is a function
//! of the current state and an event.

use heapless::Vec;

use super::actions::{Action, RunPattern};
use super::events::Event;

/// Maximum side effects emitted by a single transition
pub const MAX_ACTIONS: usize = 8;

/// Converter operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConverterState {
    /// Output disabled, waiting for operator start
    Idle,
    /// Soft-start in progress; button input disabled
    Ramping,
    /// Regulating at the steady-state target
    Run,
    /// Regulating with load-transient pulses active
    Test,
    /// Fault latched; output disabled until operator acknowledgment
    Fault,
}

/// Fault conditions that latch the converter off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Input-voltage average below minimum
    InputUnderVoltage,
    /// Input-voltage average above maximum
    InputOverVoltage,
    /// Phase 1 output-current average above maximum
    OverCurrent1,
    /// Phase 2 output-current average above maximum
    OverCurrent2,
    /// Temperature average above maximum
    OverTemperature,
    /// External hardware output-voltage fault signal
    OutputOverVoltage,
}

/// Result of one transition: the new state and its side effects, in
/// execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State to enter
    pub next: ConverterState,
    /// Commands for the supervisor to execute against the hardware
    pub actions: Vec<Action, MAX_ACTIONS>,
}

impl Transition {
    fn new(next: ConverterState, actions: &[Action]) -> Self {
        Self {
            next,
            // The table never lists more than MAX_ACTIONS effects
            actions: Vec::from_slice(actions).unwrap_or_default(),
        }
    }

    fn stay(current: ConverterState) -> Self {
        Self {
            next: current,
            actions: Vec::new(),
        }
    }
}

impl ConverterState {
    /// Check if the converter output is enabled in this state
    pub fn is_enabled(&self) -> bool {
        matches!(
            self,
            ConverterState::Ramping | ConverterState::Run | ConverterState::Test
        )
    }

    /// Check if this is the latched fault state
    pub fn is_fault(&self) -> bool {
        matches!(self, ConverterState::Fault)
    }

    /// Check if operator button input is accepted in this state
    ///
    /// The button interrupt source is additionally gated in hardware;
    /// this is the authoritative answer either way.
    pub fn button_allowed(&self) -> bool {
        !matches!(self, ConverterState::Ramping)
    }

    /// Process an event and return the new state plus its side effects
    ///
    /// This is the single authoritative transition function. Events not
    /// listed for a state are no-ops, except the fault event which is
    /// accepted from every state.
    pub fn transition(self, event: Event) -> Transition {
        use ConverterState::*;
        use Event::*;

        match (self, event) {
            // A fault latches the converter off from any state. The
            // ordering mirrors the fault sequence: kill the output first,
            // indicators and button gating after.
            (_, FaultDetected(_)) => Transition::new(
                Fault,
                &[
                    Action::DisableConverter,
                    Action::StopLoadPulse,
                    Action::AssertFaultIndicator,
                    Action::SetRunIndicator(RunPattern::Off),
                    Action::EnableButton,
                ],
            ),

            // Operator start: fresh protection history, zero reference,
            // converter on, button locked out for the duration of the ramp
            (Idle, ButtonPressed) => Transition::new(
                Ramping,
                &[
                    Action::ResetProtection,
                    Action::ResetRamp,
                    Action::EnableConverter,
                    Action::DisableButton,
                    Action::SetRunIndicator(RunPattern::Solid),
                    Action::ClearFaultIndicator,
                    Action::StartRampTimer,
                ],
            ),

            // Ramp complete: exact steady-state reference, hardware vout
            // protection armed, operator input unlocked
            (Ramping, RampConverged) => Transition::new(
                Run,
                &[
                    Action::SnapReference,
                    Action::EnableOutputProtection,
                    Action::EnableButton,
                ],
            ),

            // Run -> Test: start transient pulsing
            (Run, ButtonPressed) => Transition::new(
                Test,
                &[
                    Action::StartLoadPulse,
                    Action::SetRunIndicator(RunPattern::Blink),
                ],
            ),

            // Test -> Idle: shut everything down
            (Test, ButtonPressed) => Transition::new(
                Idle,
                &[
                    Action::SetRunIndicator(RunPattern::Off),
                    Action::StopLoadPulse,
                    Action::DisableConverter,
                    Action::StopRampTimer,
                ],
            ),

            // Operator acknowledges the latched fault
            (Fault, ButtonPressed) => {
                Transition::new(Idle, &[Action::ClearFaultIndicator])
            }

            // Everything else is a no-op: a button press while Ramping
            // (belt and braces, the input is gated off anyway) and stray
            // convergence events outside Ramping
            _ => Transition::stay(self),
        }
    }
}

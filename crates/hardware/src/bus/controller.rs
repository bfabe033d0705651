//! Transaction controller.
//!
//! The controller is the bus-facing half of the slave. It performs:
//! 1. **Admission:** Deciding when an offered address phase is accepted into the pipeline.
//! 2. **Sequencing:** Moving between `Idle`, `DataPhase` and `ErrorHold`.
//! 3. **Response:** Driving ready and the response code back to the requester.
//!
//! All decisions live in the pure `transition` function; `TransactionController` only holds
//! the current state and applies the transition once per clock.

use tracing::trace;

use crate::bus::signals::HResp;

/// Controller state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ControllerState {
    /// No data phase pending.
    #[default]
    Idle,
    /// A latched transaction is being completed by the register unit.
    DataPhase,
    /// Second cycle of an error response.
    ErrorHold,
}

impl ControllerState {
    /// Transfer-valid strobe to the register unit; depends only on the state.
    #[inline]
    pub const fn transfer_valid(self) -> bool {
        matches!(self, Self::DataPhase)
    }
}

/// How a data phase ended, as decided by `transition`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataPhaseOutcome {
    /// The register unit flagged an error.
    Error,
    /// Single transfer or final beat of a fixed-length burst.
    Complete,
    /// A burst beat completed and the requester offered another address phase.
    Continue,
    /// A burst beat completed with no follow-up; the burst is dropped silently.
    Abandon,
}

/// Combinational inputs to the controller for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerInputs {
    /// Select asserted with a NONSEQ or SEQ transfer type.
    pub address_phase: bool,
    /// Direction of the latched transaction.
    pub latched_write: bool,
    /// Error flag from the register unit.
    pub unit_error: bool,
    /// Burst-done flag from the register unit.
    pub burst_done: bool,
    /// The beat being completed belongs to a single transfer, as resolved by the register unit.
    pub single: bool,
}

/// Outputs of the controller for one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerOutputs {
    /// Ready for the next address phase.
    pub ready: bool,
    /// Response code for this cycle.
    pub resp: HResp,
    /// Transfer-valid strobe to the register unit.
    pub transfer_valid: bool,
    /// Direction forwarded to the register unit; low outside the data phase.
    pub write: bool,
    /// The offered address phase is latched at the coming edge.
    pub admit: bool,
    /// Outcome of the data phase, if one ran this cycle.
    pub outcome: Option<DataPhaseOutcome>,
}

/// Next-state and output function.
///
/// Ready drops only in the first cycle of an error response, so no address phase can be
/// admitted while the erroring transfer is still completing. Every return to `Idle` that
/// coincides with an admitted address phase goes straight to `DataPhase`.
pub fn transition(
    state: ControllerState,
    inputs: &ControllerInputs,
) -> (ControllerState, ControllerOutputs) {
    let transfer_valid = state.transfer_valid();
    let error_now = transfer_valid && inputs.unit_error;
    let ready = !error_now;
    let admit = ready && inputs.address_phase;
    let after_idle = if admit {
        ControllerState::DataPhase
    } else {
        ControllerState::Idle
    };

    let (next, outcome) = match state {
        ControllerState::Idle => (after_idle, None),
        ControllerState::DataPhase => {
            let outcome = if inputs.unit_error {
                DataPhaseOutcome::Error
            } else if inputs.burst_done || inputs.single {
                DataPhaseOutcome::Complete
            } else if admit {
                DataPhaseOutcome::Continue
            } else {
                DataPhaseOutcome::Abandon
            };
            let next = match outcome {
                DataPhaseOutcome::Error => ControllerState::ErrorHold,
                DataPhaseOutcome::Continue => ControllerState::DataPhase,
                DataPhaseOutcome::Complete | DataPhaseOutcome::Abandon => after_idle,
            };
            (next, Some(outcome))
        }
        ControllerState::ErrorHold => (after_idle, None),
    };

    let resp = if error_now || state == ControllerState::ErrorHold {
        HResp::Error
    } else {
        HResp::Okay
    };

    let outputs = ControllerOutputs {
        ready,
        resp,
        transfer_valid,
        write: transfer_valid && inputs.latched_write,
        admit,
        outcome,
    };
    (next, outputs)
}

/// Stateful wrapper applying `transition` once per clock.
#[derive(Clone, Debug, Default)]
pub struct TransactionController {
    state: ControllerState,
}

impl TransactionController {
    /// Creates a controller in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// Evaluates this cycle's outputs and moves to the next state.
    pub fn tick(&mut self, inputs: &ControllerInputs) -> ControllerOutputs {
        let (next, outputs) = transition(self.state, inputs);
        if next != self.state {
            trace!(from = ?self.state, to = ?next, "controller state change");
        }
        self.state = next;
        outputs
    }

    /// Asynchronous reset to `Idle`.
    pub fn reset(&mut self) {
        self.state = ControllerState::Idle;
    }
}

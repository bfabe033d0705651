//! Transaction controller state machine tests.
//!
//! The transition function is exercised in isolation from any timing.

use ahbsim_core::HResp;
use ahbsim_core::bus::controller::{
    ControllerInputs, ControllerState, DataPhaseOutcome, TransactionController, transition,
};
use rstest::rstest;

fn inputs(address_phase: bool, unit_error: bool, burst_done: bool, single: bool) -> ControllerInputs {
    ControllerInputs {
        address_phase,
        latched_write: false,
        unit_error,
        burst_done,
        single,
    }
}

#[rstest]
#[case::idle_stays_idle(ControllerState::Idle, inputs(false, false, false, false), ControllerState::Idle)]
#[case::idle_admits(ControllerState::Idle, inputs(true, false, false, false), ControllerState::DataPhase)]
#[case::error_enters_hold(ControllerState::DataPhase, inputs(true, true, false, true), ControllerState::ErrorHold)]
#[case::single_completes(ControllerState::DataPhase, inputs(false, false, true, true), ControllerState::Idle)]
#[case::single_back_to_back(ControllerState::DataPhase, inputs(true, false, true, true), ControllerState::DataPhase)]
#[case::burst_done(ControllerState::DataPhase, inputs(false, false, true, false), ControllerState::Idle)]
#[case::burst_continues(ControllerState::DataPhase, inputs(true, false, false, false), ControllerState::DataPhase)]
#[case::burst_falls_back(ControllerState::DataPhase, inputs(false, false, false, false), ControllerState::Idle)]
#[case::hold_returns(ControllerState::ErrorHold, inputs(false, false, false, false), ControllerState::Idle)]
#[case::hold_admits(ControllerState::ErrorHold, inputs(true, false, false, false), ControllerState::DataPhase)]
fn next_state(
    #[case] state: ControllerState,
    #[case] inp: ControllerInputs,
    #[case] expected: ControllerState,
) {
    let (next, _) = transition(state, &inp);
    assert_eq!(next, expected);
}

#[rstest]
#[case(inputs(true, true, false, false), DataPhaseOutcome::Error)]
#[case(inputs(false, false, true, false), DataPhaseOutcome::Complete)]
#[case(inputs(false, false, false, true), DataPhaseOutcome::Complete)]
#[case(inputs(true, false, false, false), DataPhaseOutcome::Continue)]
#[case(inputs(false, false, false, false), DataPhaseOutcome::Abandon)]
fn data_phase_outcomes(#[case] inp: ControllerInputs, #[case] outcome: DataPhaseOutcome) {
    let (_, out) = transition(ControllerState::DataPhase, &inp);
    assert_eq!(out.outcome, Some(outcome));
}

#[test]
fn no_outcome_outside_data_phase() {
    for state in [ControllerState::Idle, ControllerState::ErrorHold] {
        let (_, out) = transition(state, &inputs(true, true, true, true));
        assert_eq!(out.outcome, None);
    }
}

#[test]
fn error_response_spans_two_cycles() {
    let (next, first) = transition(ControllerState::DataPhase, &inputs(true, true, false, true));
    assert_eq!(first.resp, HResp::Error);
    assert!(!first.ready);
    assert!(!first.admit, "nothing is admitted while ready is low");

    let (last, second) = transition(next, &inputs(false, false, false, false));
    assert_eq!(second.resp, HResp::Error);
    assert!(second.ready);
    assert_eq!(last, ControllerState::Idle);

    let (_, after) = transition(last, &inputs(false, false, false, false));
    assert_eq!(after.resp, HResp::Okay);
}

#[test]
fn idle_ignores_unit_flags() {
    // Stale unit outputs cannot produce an error outside the data phase.
    let (next, out) = transition(ControllerState::Idle, &inputs(false, true, false, false));
    assert_eq!(next, ControllerState::Idle);
    assert_eq!(out.resp, HResp::Okay);
    assert!(out.ready);
}

#[test]
fn direction_and_valid_only_in_data_phase() {
    let inp = ControllerInputs {
        latched_write: true,
        ..inputs(false, false, true, true)
    };
    for state in [ControllerState::Idle, ControllerState::ErrorHold] {
        let (_, out) = transition(state, &inp);
        assert!(!out.transfer_valid);
        assert!(!out.write);
    }
    let (_, out) = transition(ControllerState::DataPhase, &inp);
    assert!(out.transfer_valid);
    assert!(out.write);
}

#[test]
fn ready_in_steady_states() {
    for state in [
        ControllerState::Idle,
        ControllerState::DataPhase,
        ControllerState::ErrorHold,
    ] {
        let (_, out) = transition(state, &inputs(true, false, false, false));
        assert!(out.ready, "{state:?} must be ready without an error");
        assert!(out.admit);
    }
}

#[test]
fn stateful_controller_follows_transition() {
    let mut ctrl = TransactionController::new();
    assert_eq!(ctrl.state(), ControllerState::Idle);

    let out = ctrl.tick(&inputs(true, false, false, false));
    assert!(out.admit);
    assert_eq!(ctrl.state(), ControllerState::DataPhase);

    let out = ctrl.tick(&inputs(false, true, false, true));
    assert_eq!(out.resp, HResp::Error);
    assert_eq!(ctrl.state(), ControllerState::ErrorHold);

    ctrl.reset();
    assert_eq!(ctrl.state(), ControllerState::Idle);
}

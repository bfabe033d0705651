//! Error response behaviour.

use ahbsim_core::bus::ControllerState;
use ahbsim_core::regfile::RegisterId;
use ahbsim_core::{BusRequest, HResp, HSize};
use proptest::prelude::*;
use rstest::rstest;

use crate::common::harness::{BASE, TestContext};

#[test]
fn write_outside_map_errors_without_side_effects() {
    let mut ctx = TestContext::new();
    let before = ctx.snapshot();

    let resp = ctx.write_word(0x100, 0xFFFF_FFFF);
    assert_eq!(resp.resp, HResp::Error);
    assert_eq!(ctx.snapshot(), before);
}

#[test]
fn write_to_read_only_keeps_value() {
    let mut ctx = TestContext::new();
    let resp = ctx.write_word(0x004, 0xFFFF_FFFF);
    assert_eq!(resp.resp, HResp::Error);
    assert_eq!(ctx.reg(RegisterId::Status), 0x0000_0001);
}

#[test]
fn error_response_timing() {
    let mut ctx = TestContext::new();
    let r0 = ctx.step(BusRequest::write(BASE + 0x100, HSize::Word));
    assert!(r0.ready);
    assert_eq!(r0.resp, HResp::Okay);
    assert_eq!(ctx.slave.state(), ControllerState::DataPhase);

    // A follow-up address phase offered in the first error cycle is not taken.
    let r1 = ctx.step(BusRequest::read(BASE, HSize::Word).with_wdata(1));
    assert!(!r1.ready);
    assert_eq!(r1.resp, HResp::Error);
    assert_eq!(ctx.slave.state(), ControllerState::ErrorHold);
    assert_eq!(ctx.slave.pipeline().pending, None);

    let r2 = ctx.idle();
    assert!(r2.ready);
    assert_eq!(r2.resp, HResp::Error);
    assert_eq!(ctx.slave.state(), ControllerState::Idle);

    let r3 = ctx.idle();
    assert_eq!(r3.resp, HResp::Okay);
}

#[test]
fn address_phase_during_hold_is_admitted() {
    let mut ctx = TestContext::new();
    ctx.set_reg(RegisterId::Scratch, 0x5A5A_5A5A);
    let _ = ctx.step(BusRequest::write(BASE + 0x100, HSize::Word));
    let _ = ctx.idle();
    let hold = ctx.step(BusRequest::read(BASE + 0x1C, HSize::Word));
    assert_eq!(hold.resp, HResp::Error);
    assert!(hold.ready);
    assert_eq!(ctx.slave.state(), ControllerState::DataPhase);

    let data = ctx.idle();
    assert_eq!(data.resp, HResp::Okay);
    assert_eq!(data.rdata, 0x5A5A_5A5A);
}

#[rstest]
#[case::unmapped(BusRequest::read(BASE + 0x024, HSize::Word))]
#[case::outside_window(BusRequest::read(BASE + 0x1000, HSize::Word))]
#[case::odd_half(BusRequest::read(BASE + 0x001, HSize::Half))]
#[case::misaligned_word(BusRequest::read(BASE + 0x002, HSize::Word))]
#[case::doubleword(BusRequest::read(BASE, HSize::Word).with_size_code(3))]
#[case::read_only_write(BusRequest::write(BASE + 0x010, HSize::Word))]
#[case::id_byte_write(BusRequest::write(BASE + 0x021, HSize::Byte))]
fn rejected_transfers(#[case] req: BusRequest) {
    let mut ctx = TestContext::new();
    let before = ctx.snapshot();
    let resp = ctx.transfer(req, 0xFFFF_FFFF);
    assert_eq!(resp.resp, HResp::Error);
    assert_eq!(resp.rdata, 0);
    assert_eq!(ctx.snapshot(), before);
    assert_eq!(ctx.slave.stats().errors, 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn misaligned_transfers_always_error(word in 0u32..9, low in 1u32..4, write in any::<bool>()) {
        let addr = BASE + word * 4 + low;
        let mut ctx = TestContext::new();
        let req = if write {
            BusRequest::write(addr, HSize::Word)
        } else {
            BusRequest::read(addr, HSize::Word)
        };
        prop_assert_eq!(ctx.transfer(req, 0).resp, HResp::Error);

        if low % 2 == 1 {
            let req = BusRequest::read(addr, HSize::Half);
            prop_assert_eq!(ctx.transfer(req, 0).resp, HResp::Error);
        }
    }

    #[test]
    fn unmapped_addresses_always_error(addr in any::<u32>()) {
        let word = addr & !0b11;
        prop_assume!(!(BASE..=BASE + 0x20).contains(&word));
        let mut ctx = TestContext::new();
        let before = ctx.snapshot();
        prop_assert_eq!(ctx.write(word, HSize::Word, 0xFFFF_FFFF).resp, HResp::Error);
        prop_assert_eq!(ctx.snapshot(), before);
    }
}

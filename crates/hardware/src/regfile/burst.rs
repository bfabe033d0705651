//! Burst address generation and beat tracking.
//!
//! This module implements how a multi-beat burst walks through the address space:
//! 1. **Address arithmetic:** `next_address`, a pure function of the current address,
//!    transfer size and burst kind.
//! 2. **Progress state:** `BurstTracker`, which re-derives each beat's address and counts
//!    beats until a fixed-length burst completes.
//!
//! Wrapping bursts stay inside a window of `beats × size` bytes aligned to its own size; the
//! bits above the window are carried through untouched.

use tracing::debug;

use crate::bus::latches::Transaction;
use crate::bus::signals::{HBurst, HSize, HTrans};

/// Size in bytes of the wrap window of `burst` at `size`, or `None` for non-wrapping kinds.
#[inline]
pub const fn wrap_window(size: HSize, burst: HBurst) -> Option<u32> {
    match burst.beats() {
        Some(beats) if burst.is_wrap() => Some(beats * size.bytes()),
        _ => None,
    }
}

/// Address of the beat following one at `current`.
///
/// * `Single` never advances.
/// * Incrementing kinds add the size step (wrapping at the top of the 32-bit space).
/// * Wrapping kinds add the step modulo the wrap window.
pub const fn next_address(current: u32, size: HSize, burst: HBurst) -> u32 {
    let step = size.bytes();
    if burst.is_single() {
        return current;
    }
    match wrap_window(size, burst) {
        Some(window) => {
            let mask = window - 1;
            (current & !mask) | (current.wrapping_add(step) & mask)
        }
        None => current.wrapping_add(step),
    }
}

/// One data-phase beat with its attributes resolved against any burst in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Beat {
    /// Address the beat accesses.
    pub addr: u32,
    /// Raw size code.
    pub size: u8,
    /// Burst kind.
    pub burst: HBurst,
    /// Byte-lane write enables.
    pub strobe: u8,
    /// `true` for a write.
    pub write: bool,
    /// 1-based position of the beat inside its burst.
    pub number: u32,
}

impl Beat {
    /// Returns `true` if this beat finishes its transfer.
    ///
    /// Open `Incr` bursts never finish on their own.
    #[inline]
    pub fn completes(&self) -> bool {
        self.burst.beats().is_some_and(|len| self.number >= len)
    }
}

/// Progress of the burst currently being serviced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BurstTracker {
    active: bool,
    beats: u32,
    addr: u32,
    size: u8,
    burst: HBurst,
    strobe: u8,
}

impl BurstTracker {
    /// Creates an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a multi-beat burst has beats outstanding.
    #[inline]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` while a fixed-length burst has beats outstanding.
    ///
    /// Open `Incr` bursts have no final beat, so they are never outstanding in this sense.
    #[inline]
    pub const fn has_fixed_length(&self) -> bool {
        self.active && self.burst.beats().is_some()
    }

    /// Returns `true` if the next beat opens a new burst.
    #[inline]
    pub const fn is_first_beat(&self) -> bool {
        !self.active
    }

    /// Beats accepted so far in the current burst.
    #[inline]
    pub const fn beat_count(&self) -> u32 {
        self.beats
    }

    /// Address the next continuation beat will access.
    #[inline]
    pub const fn current_address(&self) -> u32 {
        self.addr
    }

    /// Resolves the latched transaction into the beat it represents.
    ///
    /// A SEQ beat inside an active burst uses the derived address and the burst's size,
    /// kind and lane mask; anything else starts from the latched attributes.
    pub fn resolve(&self, txn: &Transaction) -> Beat {
        if self.active && txn.trans == HTrans::Seq {
            if txn.addr != self.addr {
                debug!(
                    presented = format_args!("{:#010x}", txn.addr),
                    derived = format_args!("{:#010x}", self.addr),
                    "burst beat address differs from derived address"
                );
            }
            return Beat {
                addr: self.addr,
                size: self.size,
                burst: self.burst,
                strobe: self.strobe,
                write: txn.write,
                number: self.beats.saturating_add(1),
            };
        }
        if txn.trans == HTrans::Seq {
            debug!(
                addr = format_args!("{:#010x}", txn.addr),
                "SEQ beat with no burst in progress, treated as first beat"
            );
        }
        Beat {
            addr: txn.addr,
            size: txn.size,
            burst: txn.burst,
            strobe: txn.strobe,
            write: txn.write,
            number: 1,
        }
    }

    /// Records an accepted, error-free beat of `size`.
    ///
    /// Completing beats return the tracker to idle; otherwise the next address is derived.
    pub fn advance(&mut self, beat: &Beat, size: HSize) {
        if beat.completes() {
            self.clear();
            return;
        }
        *self = Self {
            active: true,
            beats: beat.number,
            addr: next_address(beat.addr, size, beat.burst),
            size: beat.size,
            burst: beat.burst,
            strobe: beat.strobe,
        };
    }

    /// Abandons any burst in progress.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

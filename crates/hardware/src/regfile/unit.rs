//! Register unit: the data-phase half of the slave.
//!
//! Every cycle the unit looks at the latched transaction and performs:
//! 1. **Evaluation:** Burst address resolution, validity checks and the read mux
//!    (combinational, no state changes).
//! 2. **Commit:** At the clock edge, the byte-lane write and burst progress update
//!    for the beat that was just evaluated.
//!
//! A beat that fails any check never reaches the write path, so a rejected transfer
//! cannot disturb register contents.

use tracing::debug;

use crate::bus::latches::Transaction;
use crate::bus::signals::HSize;
use crate::common::constants::{ALL_LANES, BYTE_LANES};
use crate::common::error::BusError;
use crate::regfile::burst::{Beat, BurstTracker};
use crate::regfile::checks::check_transfer;
use crate::regfile::map::RegisterId;
use crate::regfile::traits::RegisterStorage;

/// Expands a 4-bit lane mask into a 32-bit byte mask.
#[inline]
pub const fn lane_bit_mask(strobe: u8) -> u32 {
    let mut mask = 0u32;
    let mut lane = 0;
    while lane < BYTE_LANES {
        if strobe & (1 << lane) != 0 {
            mask |= 0xFF << (lane * 8);
        }
        lane += 1;
    }
    mask
}

/// Replaces the lanes of `old` selected by `strobe` with those of `new`.
#[inline]
pub const fn merge_lanes(old: u32, new: u32, strobe: u8) -> u32 {
    let mask = lane_bit_mask(strobe & ALL_LANES);
    (old & !mask) | (new & mask)
}

/// A beat that passed every check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    /// The resolved beat.
    pub beat: Beat,
    /// Register it targets.
    pub reg: RegisterId,
    /// Decoded transfer size.
    pub size: HSize,
}

/// Combinational outputs of the unit for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitOutputs {
    /// A valid transfer failed a check.
    pub error: bool,
    /// The transfer (single or fixed-length burst) is finished after this beat.
    pub burst_done: bool,
    /// Read data; zero unless an error-free read is in progress.
    pub rdata: u32,
    /// Accepted beat to be committed at the edge.
    pub access: Option<Access>,
    /// Diagnosis of a rejected beat.
    pub fault: Option<BusError>,
}

/// Register file with burst and error detection.
#[derive(Debug)]
pub struct RegisterFile<S> {
    storage: S,
    base: u32,
    tracker: BurstTracker,
}

impl<S: RegisterStorage> RegisterFile<S> {
    /// Creates a unit decoding the 4 KiB window at `base`.
    pub fn new(storage: S, base: u32) -> Self {
        Self {
            storage,
            base,
            tracker: BurstTracker::new(),
        }
    }

    /// Window base address.
    #[inline]
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Backing storage.
    #[inline]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable backing storage, for the surrounding system.
    #[inline]
    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Burst progress state.
    #[inline]
    pub const fn tracker(&self) -> &BurstTracker {
        &self.tracker
    }

    /// Evaluates the latched transaction without changing any state.
    pub fn evaluate(&self, pending: Option<&Transaction>, transfer_valid: bool) -> UnitOutputs {
        let Some(txn) = pending.filter(|_| transfer_valid) else {
            return UnitOutputs::default();
        };
        let beat = self.tracker.resolve(txn);

        match check_transfer(self.base, beat.addr, beat.size, beat.write) {
            Ok((reg, size)) => {
                let rdata = if !beat.write && reg.access().is_readable() {
                    self.storage.read(reg)
                } else {
                    0
                };
                UnitOutputs {
                    error: false,
                    burst_done: beat.completes(),
                    rdata,
                    access: Some(Access { beat, reg, size }),
                    fault: None,
                }
            }
            Err(fault) => UnitOutputs {
                error: true,
                burst_done: false,
                rdata: 0,
                access: None,
                fault: Some(fault),
            },
        }
    }

    /// Clock edge: performs the write of an accepted beat and updates burst progress.
    ///
    /// `wdata` is the registered write data of the data phase. Returns `true` if a
    /// register was written.
    pub fn commit(&mut self, outputs: &UnitOutputs, wdata: u32) -> bool {
        if let Some(fault) = outputs.fault {
            debug!(%fault, "transfer rejected");
            self.tracker.clear();
            return false;
        }
        let Some(access) = outputs.access else {
            return false;
        };

        let written = if access.beat.write {
            let old = self.storage.read(access.reg);
            let new = merge_lanes(old, wdata, access.beat.strobe);
            self.storage.write(access.reg, new);
            true
        } else {
            false
        };
        self.tracker.advance(&access.beat, access.size);
        written
    }

    /// Asynchronous reset of burst state and register contents.
    pub fn reset(&mut self) {
        self.tracker.clear();
        self.storage.reset();
    }
}

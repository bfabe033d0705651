//! Address-phase to data-phase pipeline registers.
//!
//! This module defines what survives the clock edge between the two bus phases:
//! 1. **Transaction:** The attributes captured when an address phase is admitted.
//! 2. **Pipeline Registers:** The single pending-transaction slot plus the delayed write data.
//!
//! The slot is `None` whenever no data phase is pending, so a stale transaction can never
//! reach the register unit after reset or after the controller has gone idle.

use crate::bus::signals::{BusRequest, HBurst, HTrans};

/// Attributes of one admitted transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Byte address presented in the address phase.
    pub addr: u32,
    /// Raw 3-bit size code.
    pub size: u8,
    /// Burst kind.
    pub burst: HBurst,
    /// Transfer type that admitted this transaction (NONSEQ or SEQ).
    pub trans: HTrans,
    /// `true` for a write.
    pub write: bool,
    /// Byte-lane write enables.
    pub strobe: u8,
    /// Lock flag, carried through unmodified.
    pub lock: bool,
}

impl Transaction {
    /// Captures the address-phase fields of a request.
    pub const fn capture(req: &BusRequest) -> Self {
        Self {
            addr: req.addr,
            size: req.size,
            burst: req.burst,
            trans: req.trans,
            write: req.write,
            strobe: req.strobe,
            lock: req.lock,
        }
    }

    /// Returns `true` if this transfer opens a new burst or is a single transfer.
    #[inline]
    pub const fn is_first_beat(&self) -> bool {
        matches!(self.trans, HTrans::NonSeq)
    }
}

/// Registers clocked at the boundary between address phase and data phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineRegisters {
    /// Transaction whose data phase runs this cycle.
    pub pending: Option<Transaction>,
    /// Write data sampled at the end of the most recent data phase.
    pub wdata_q: u32,
}

impl PipelineRegisters {
    /// Creates empty pipeline registers (reset state).
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock edge, write-data half: sample the write data at the clock edge that ends the
    /// data phase.
    #[inline]
    pub fn latch_wdata(&mut self, wdata: u32) {
        self.wdata_q = wdata;
    }

    /// Clock edge, address half: latch `req` if its address phase was admitted, otherwise
    /// empty the slot.
    pub fn advance(&mut self, req: &BusRequest, admitted: bool) {
        self.pending = admitted.then(|| Transaction::capture(req));
    }

    /// Asynchronous clear.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Bus request and response signals.
//!
//! This module defines the values sampled from and driven onto the bus every cycle. It provides:
//! 1. **Encodings:** Transfer type, size, burst kind and response codes with their wire values.
//! 2. **Request:** `BusRequest`, the full set of requester-driven lines for one cycle.
//! 3. **Response:** `BusResponse`, the ready/response/read-data lines driven back.
//!
//! Size codes are kept as raw 3-bit values in `BusRequest`; only codes 0-2 are supported and
//! anything else is reported by the register unit as an invalid-size error.

/// Transfer type (`HTRANS`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HTrans {
    /// No transfer requested.
    #[default]
    Idle,
    /// Requester is inside a burst but not ready for the next beat.
    Busy,
    /// First beat of a burst, or a single transfer.
    NonSeq,
    /// Continuation beat of a burst.
    Seq,
}

impl HTrans {
    /// Decodes a 2-bit transfer type.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Idle,
            1 => Self::Busy,
            2 => Self::NonSeq,
            _ => Self::Seq,
        }
    }

    /// Returns the 2-bit wire encoding.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Busy => 1,
            Self::NonSeq => 2,
            Self::Seq => 3,
        }
    }

    /// Returns `true` for NONSEQ and SEQ, the two types that carry an address phase.
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::NonSeq | Self::Seq)
    }
}

/// Supported transfer sizes (`HSIZE` codes 0-2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HSize {
    /// 8-bit transfer.
    Byte,
    /// 16-bit transfer.
    Half,
    /// 32-bit transfer.
    Word,
}

impl HSize {
    /// Wire code for a byte transfer.
    pub const BYTE: u8 = 0;
    /// Wire code for a half-word transfer.
    pub const HALF: u8 = 1;
    /// Wire code for a word transfer.
    pub const WORD: u8 = 2;

    /// Decodes a 3-bit size code; `None` for sizes wider than the 32-bit data bus.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0b111 {
            Self::BYTE => Some(Self::Byte),
            Self::HALF => Some(Self::Half),
            Self::WORD => Some(Self::Word),
            _ => None,
        }
    }

    /// Returns the 3-bit wire encoding.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Byte => Self::BYTE,
            Self::Half => Self::HALF,
            Self::Word => Self::WORD,
        }
    }

    /// Number of bytes moved per beat (the burst address step).
    #[inline]
    pub const fn bytes(self) -> u32 {
        1 << self.bits()
    }

    /// Natural byte-lane mask of a transfer of this size at `addr`.
    ///
    /// Lanes follow the little-endian byte position inside the 32-bit word,
    /// so a byte at `...1` uses lane 1 and a half-word at `...2` uses lanes 2-3.
    pub const fn lane_mask(self, addr: u32) -> u8 {
        let lanes: u8 = match self {
            Self::Byte => 0b0001,
            Self::Half => 0b0011,
            Self::Word => 0b1111,
        };
        (lanes << (addr & 0b11)) & 0b1111
    }
}

/// Burst kind (`HBURST`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HBurst {
    /// Single transfer.
    #[default]
    Single,
    /// Incrementing burst of unspecified length.
    Incr,
    /// 4-beat wrapping burst.
    Wrap4,
    /// 4-beat incrementing burst.
    Incr4,
    /// 8-beat wrapping burst.
    Wrap8,
    /// 8-beat incrementing burst.
    Incr8,
    /// 16-beat wrapping burst.
    Wrap16,
    /// 16-beat incrementing burst.
    Incr16,
}

impl HBurst {
    /// Decodes a 3-bit burst code. Every code is defined.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::Single,
            1 => Self::Incr,
            2 => Self::Wrap4,
            3 => Self::Incr4,
            4 => Self::Wrap8,
            5 => Self::Incr8,
            6 => Self::Wrap16,
            _ => Self::Incr16,
        }
    }

    /// Returns the 3-bit wire encoding.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Single => 0,
            Self::Incr => 1,
            Self::Wrap4 => 2,
            Self::Incr4 => 3,
            Self::Wrap8 => 4,
            Self::Incr8 => 5,
            Self::Wrap16 => 6,
            Self::Incr16 => 7,
        }
    }

    /// Number of beats of a fixed-length burst; `None` for `Incr`.
    pub const fn beats(self) -> Option<u32> {
        match self {
            Self::Single => Some(1),
            Self::Incr => None,
            Self::Wrap4 | Self::Incr4 => Some(4),
            Self::Wrap8 | Self::Incr8 => Some(8),
            Self::Wrap16 | Self::Incr16 => Some(16),
        }
    }

    /// Returns `true` for the three wrapping kinds.
    #[inline]
    pub const fn is_wrap(self) -> bool {
        matches!(self, Self::Wrap4 | Self::Wrap8 | Self::Wrap16)
    }

    /// Returns `true` for a single transfer.
    #[inline]
    pub const fn is_single(self) -> bool {
        matches!(self, Self::Single)
    }
}

/// Transfer response (`HRESP`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HResp {
    /// Transfer completed successfully (or no transfer pending).
    #[default]
    Okay,
    /// Transfer failed.
    Error,
}

/// Requester-driven lines sampled in one clock cycle.
///
/// Address-phase fields (`sel` through `lock`) belong to the transfer being offered this cycle;
/// `wdata` belongs to the write whose address phase was accepted in the previous cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusRequest {
    /// Slave select (`HSEL`).
    pub sel: bool,
    /// Transfer type (`HTRANS`).
    pub trans: HTrans,
    /// Byte address (`HADDR`).
    pub addr: u32,
    /// Raw 3-bit size code (`HSIZE`).
    pub size: u8,
    /// Burst kind (`HBURST`).
    pub burst: HBurst,
    /// Direction (`HWRITE`); `true` for writes.
    pub write: bool,
    /// Per-byte write enables (`HWSTRB`), bit `n` covers `wdata[8n+7:8n]`.
    pub strobe: u8,
    /// Locked/exclusive sequence (`HMASTLOCK`). Carried, never interpreted.
    pub lock: bool,
    /// Write data (`HWDATA`).
    pub wdata: u32,
}

impl BusRequest {
    /// A cycle with the slave deselected and no transfer.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Selected single read of the given size.
    pub fn read(addr: u32, size: HSize) -> Self {
        Self {
            sel: true,
            trans: HTrans::NonSeq,
            addr,
            size: size.bits(),
            ..Self::default()
        }
    }

    /// Selected single write of the given size with the natural lane mask.
    pub fn write(addr: u32, size: HSize) -> Self {
        Self {
            sel: true,
            trans: HTrans::NonSeq,
            addr,
            size: size.bits(),
            write: true,
            strobe: size.lane_mask(addr),
            ..Self::default()
        }
    }

    /// Replaces the burst kind.
    pub const fn with_burst(mut self, burst: HBurst) -> Self {
        self.burst = burst;
        self
    }

    /// Replaces the write strobes.
    pub const fn with_strobe(mut self, strobe: u8) -> Self {
        self.strobe = strobe & 0b1111;
        self
    }

    /// Replaces the raw size code, including unsupported ones.
    pub const fn with_size_code(mut self, size: u8) -> Self {
        self.size = size & 0b111;
        self
    }

    /// Sets the write data driven this cycle.
    pub const fn with_wdata(mut self, wdata: u32) -> Self {
        self.wdata = wdata;
        self
    }

    /// Sets the lock flag.
    pub const fn with_lock(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }

    /// Turns this address phase into a SEQ continuation beat at `addr`.
    pub const fn seq(mut self, addr: u32) -> Self {
        self.trans = HTrans::Seq;
        self.addr = addr;
        self
    }

    /// Turns this address phase into a BUSY cycle (selected, no beat offered).
    pub const fn busy(mut self) -> Self {
        self.trans = HTrans::Busy;
        self
    }

    /// Returns `true` if this cycle offers a transfer to this slave.
    #[inline]
    pub const fn is_address_phase(&self) -> bool {
        self.sel && self.trans.is_active()
    }
}

/// Lines driven back to the requester in one clock cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusResponse {
    /// Transfer done / ready for the next address phase (`HREADYOUT`).
    pub ready: bool,
    /// Response code (`HRESP`).
    pub resp: HResp,
    /// Read data (`HRDATA`); only meaningful alongside `Okay` on a completing read.
    pub rdata: u32,
}

impl Default for BusResponse {
    fn default() -> Self {
        Self {
            ready: true,
            resp: HResp::Okay,
            rdata: 0,
        }
    }
}

impl BusResponse {
    /// Returns `true` when the response code is `Error`.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.resp == HResp::Error
    }
}

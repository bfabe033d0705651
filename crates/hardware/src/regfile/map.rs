//! Peripheral register map.
//!
//! Nine 32-bit registers live at word-aligned offsets inside the 4 KiB window.
//!
//! # Memory Map
//!
//! * `0x000`: CTRL (read/write)
//! * `0x004`: STATUS (read-only)
//! * `0x008`: INT_ENABLE (read/write)
//! * `0x00C`: DATA (read/write)
//! * `0x010`: INT_STATUS (read-only)
//! * `0x014`: INT_CLEAR (write-only)
//! * `0x018`: CONFIG (read/write)
//! * `0x01C`: SCRATCH (read/write)
//! * `0x020`: ID (read-only)

use std::fmt;

use serde::Deserialize;

use crate::common::constants::{WINDOW_OFFSET_MASK, WORD_OFFSET_MASK};

/// How the bus may access a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// Reads return the content; writes are access violations.
    ReadOnly,
    /// Writes update the content; reads return zero.
    WriteOnly,
    /// Reads and writes both reach the content.
    ReadWrite,
}

impl AccessMode {
    /// Returns `true` if a bus write is permitted.
    #[inline]
    pub const fn is_writable(self) -> bool {
        !matches!(self, Self::ReadOnly)
    }

    /// Returns `true` if a bus read observes the register content.
    #[inline]
    pub const fn is_readable(self) -> bool {
        !matches!(self, Self::WriteOnly)
    }
}

/// Named registers of the peripheral.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegisterId {
    /// Control register.
    Ctrl,
    /// Status posted by the surrounding system.
    Status,
    /// Interrupt enable mask.
    IntEnable,
    /// General data register.
    Data,
    /// Raw interrupt status posted by the surrounding system.
    IntStatus,
    /// Interrupt clear strobe.
    IntClear,
    /// Configuration register.
    Config,
    /// Software scratch space.
    Scratch,
    /// Peripheral identification.
    Id,
}

impl RegisterId {
    /// Number of registers in the map.
    pub const COUNT: usize = 9;

    /// Every register, in offset order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Ctrl,
        Self::Status,
        Self::IntEnable,
        Self::Data,
        Self::IntStatus,
        Self::IntClear,
        Self::Config,
        Self::Scratch,
        Self::Id,
    ];

    /// Byte offset of the register inside the window.
    pub const fn offset(self) -> u32 {
        match self {
            Self::Ctrl => 0x000,
            Self::Status => 0x004,
            Self::IntEnable => 0x008,
            Self::Data => 0x00C,
            Self::IntStatus => 0x010,
            Self::IntClear => 0x014,
            Self::Config => 0x018,
            Self::Scratch => 0x01C,
            Self::Id => 0x020,
        }
    }

    /// Bus access permitted on this register.
    pub const fn access(self) -> AccessMode {
        match self {
            Self::Status | Self::IntStatus | Self::Id => AccessMode::ReadOnly,
            Self::IntClear => AccessMode::WriteOnly,
            Self::Ctrl | Self::IntEnable | Self::Data | Self::Config | Self::Scratch => {
                AccessMode::ReadWrite
            }
        }
    }

    /// Content after reset unless overridden by configuration.
    pub const fn reset_value(self) -> u32 {
        match self {
            Self::Status => 0x0000_0001,
            Self::Id => 0x4148_0100,
            _ => 0,
        }
    }

    /// Dense index into a register array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical upper-case register name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ctrl => "CTRL",
            Self::Status => "STATUS",
            Self::IntEnable => "INT_ENABLE",
            Self::Data => "DATA",
            Self::IntStatus => "INT_STATUS",
            Self::IntClear => "INT_CLEAR",
            Self::Config => "CONFIG",
            Self::Scratch => "SCRATCH",
            Self::Id => "ID",
        }
    }

    /// Looks up the register covering a window offset.
    ///
    /// Sub-word offsets select the register whose word contains them, so `0x00D`
    /// decodes to `DATA`. Bits above the window are ignored; the caller checks
    /// that the address is inside the window.
    pub fn from_offset(offset: u32) -> Option<Self> {
        let word = offset & WINDOW_OFFSET_MASK & WORD_OFFSET_MASK;
        Self::ALL.into_iter().find(|reg| reg.offset() == word)
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

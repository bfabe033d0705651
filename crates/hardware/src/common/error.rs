//! Bus and configuration error definitions.
//!
//! This module defines the error taxonomy used throughout the simulator. It provides:
//! 1. **Bus Errors:** The four transfer-check failures detected by the register unit.
//! 2. **Configuration Errors:** Failures loading or validating a `Config`.
//!
//! Bus errors are an internal diagnosis only: on the wire every variant collapses into
//! the same `ERROR` response.

use thiserror::Error;

use crate::regfile::map::RegisterId;

/// Reasons a latched transfer is rejected by the register unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BusError {
    /// Address lies outside the peripheral window or on no register offset.
    #[error("address decode error at {addr:#010x}")]
    AddressDecode {
        /// The offending byte address.
        addr: u32,
    },

    /// Address is not a multiple of the transfer size.
    #[error("misaligned {size_bytes}-byte transfer at {addr:#010x}")]
    Alignment {
        /// The offending byte address.
        addr: u32,
        /// Transfer width in bytes.
        size_bytes: u32,
    },

    /// Size code is not one of byte, half-word or word.
    #[error("unsupported transfer size code {code} at {addr:#010x}")]
    InvalidSize {
        /// The offending byte address.
        addr: u32,
        /// Raw 3-bit `HSIZE` value.
        code: u8,
    },

    /// Write directed at a read-only register.
    #[error("write to read-only register {reg} at {addr:#010x}")]
    AccessViolation {
        /// The offending byte address.
        addr: u32,
        /// The register that was targeted.
        reg: RegisterId,
    },
}

impl BusError {
    /// Address of the rejected transfer.
    pub const fn addr(&self) -> u32 {
        match *self {
            Self::AddressDecode { addr }
            | Self::Alignment { addr, .. }
            | Self::InvalidSize { addr, .. }
            | Self::AccessViolation { addr, .. } => addr,
        }
    }
}

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for `Config`.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("cannot read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// Peripheral base address is not aligned to its 4 KiB window.
    #[error("peripheral base address {0:#010x} is not 4 KiB aligned")]
    UnalignedBase(u32),
}

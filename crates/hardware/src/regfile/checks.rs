//! Transfer validity checks.
//!
//! Each check maps one class of malformed transfer onto a `BusError`:
//! 1. **Size:** only byte, half-word and word transfers exist on a 32-bit bus.
//! 2. **Decode:** the address must fall in the peripheral window on a register.
//! 3. **Alignment:** the address must be a multiple of the transfer size.
//! 4. **Access:** writes may not target read-only registers.
//!
//! `check_transfer` runs them in that order and reports the first failure. When several
//! would fire only one is reported; callers only care that the transfer is rejected.

use crate::bus::signals::HSize;
use crate::common::constants::{WINDOW_BASE_MASK, WINDOW_OFFSET_MASK};
use crate::common::error::BusError;
use crate::regfile::map::RegisterId;

/// Decodes the raw size code.
pub const fn check_size(addr: u32, code: u8) -> Result<HSize, BusError> {
    match HSize::from_bits(code) {
        Some(size) => Ok(size),
        None => Err(BusError::InvalidSize { addr, code }),
    }
}

/// Maps an address onto a register of the window at `base`.
pub fn decode(base: u32, addr: u32) -> Result<RegisterId, BusError> {
    if addr & WINDOW_BASE_MASK != base & WINDOW_BASE_MASK {
        return Err(BusError::AddressDecode { addr });
    }
    RegisterId::from_offset(addr & WINDOW_OFFSET_MASK).ok_or(BusError::AddressDecode { addr })
}

/// Requires `addr` to be a multiple of the transfer size.
pub const fn check_alignment(addr: u32, size: HSize) -> Result<(), BusError> {
    let size_bytes = size.bytes();
    if addr & (size_bytes - 1) == 0 {
        Ok(())
    } else {
        Err(BusError::Alignment { addr, size_bytes })
    }
}

/// Rejects writes to read-only registers.
pub const fn check_access(addr: u32, reg: RegisterId, write: bool) -> Result<(), BusError> {
    if write && !reg.access().is_writable() {
        Err(BusError::AccessViolation { addr, reg })
    } else {
        Ok(())
    }
}

/// Runs every check against one beat and returns the target register and decoded size.
pub fn check_transfer(
    base: u32,
    addr: u32,
    size_code: u8,
    write: bool,
) -> Result<(RegisterId, HSize), BusError> {
    let size = check_size(addr, size_code)?;
    let reg = decode(base, addr)?;
    check_alignment(addr, size)?;
    check_access(addr, reg, write)?;
    Ok((reg, size))
}

//! Storage trait behind the register file.
//!
//! The register unit only relies on this read/write contract; what actually holds the
//! bits (a plain array, a model of the surrounding peripheral, a test double) is up to
//! the implementor.

use crate::regfile::map::RegisterId;

/// Backing store for the peripheral's registers.
///
/// Accesses here bypass bus permissions; the register unit enforces access modes before
/// calling in.
pub trait RegisterStorage: Send {
    /// Returns the current 32-bit content of `reg`.
    fn read(&self, reg: RegisterId) -> u32;

    /// Replaces the full 32-bit content of `reg`.
    fn write(&mut self, reg: RegisterId, value: u32);

    /// Restores every register to its reset value.
    fn reset(&mut self);
}

//! Array-backed register bank.

use std::collections::HashMap;

use crate::regfile::map::RegisterId;
use crate::regfile::traits::RegisterStorage;

/// Default `RegisterStorage`: one `u32` per register plus the values restored on reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterBank {
    regs: [u32; RegisterId::COUNT],
    reset_values: [u32; RegisterId::COUNT],
}

impl RegisterBank {
    /// Creates a bank holding the built-in reset values.
    pub fn new() -> Self {
        let reset_values = RegisterId::ALL.map(RegisterId::reset_value);
        Self {
            regs: reset_values,
            reset_values,
        }
    }

    /// Creates a bank whose reset values are overridden per register.
    pub fn with_reset_values(overrides: &HashMap<RegisterId, u32>) -> Self {
        let mut bank = Self::new();
        for (&reg, &value) in overrides {
            bank.reset_values[reg.index()] = value;
        }
        bank.regs = bank.reset_values;
        bank
    }

    /// Reads a register from the system side, regardless of its bus access mode.
    #[inline]
    pub fn peek(&self, reg: RegisterId) -> u32 {
        self.regs[reg.index()]
    }

    /// Drives a register from the system side, e.g. posting STATUS bits.
    #[inline]
    pub fn poke(&mut self, reg: RegisterId, value: u32) {
        self.regs[reg.index()] = value;
    }

    /// Value `reg` returns to on reset.
    pub fn reset_value(&self, reg: RegisterId) -> u32 {
        self.reset_values[reg.index()]
    }
}

impl Default for RegisterBank {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterStorage for RegisterBank {
    fn read(&self, reg: RegisterId) -> u32 {
        self.peek(reg)
    }

    fn write(&mut self, reg: RegisterId, value: u32) {
        self.poke(reg, value);
    }

    fn reset(&mut self) {
        self.regs = self.reset_values;
    }
}

//! Cycle-level simulation of the complete slave.

/// Top-level slave composing the controller and the register unit.
pub mod slave;

pub use slave::AhbSlave;

//! Pipelined AHB-style peripheral bus slave simulator library.
//!
//! This crate implements a cycle-accurate model of a memory-mapped peripheral with the following:
//! 1. **Bus:** Request/response signals, address-to-data-phase pipeline registers, and the
//!    transaction controller state machine.
//! 2. **Register File:** Address decode, alignment and access-mode checks, burst address
//!    generation (incrementing and wrapping), and byte-lane writes.
//! 3. **Simulation:** The slave top level, configuration, and activity statistics.

/// Bus signals, pipeline registers and transaction controller.
pub mod bus;
/// Common constants and error types.
pub mod common;
/// Slave configuration (defaults, JSON loading, validation).
pub mod config;
/// Register map, storage, checks, burst logic and the register unit.
pub mod regfile;
/// Slave top level.
pub mod sim;
/// Bus activity statistics.
pub mod stats;

/// Request lines sampled each cycle.
pub use crate::bus::signals::{BusRequest, BusResponse, HBurst, HResp, HSize, HTrans};
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Register identifiers and the default backing store.
pub use crate::regfile::{RegisterBank, RegisterId, RegisterStorage};
/// Top-level slave; construct with `AhbSlave::new`.
pub use crate::sim::AhbSlave;

//! Bus-facing side of the slave.
//!
//! This module provides:
//! 1. **Signals:** Request and response lines with their encodings.
//! 2. **Latches:** The pipeline registers between address phase and data phase.
//! 3. **Controller:** The `Idle` / `DataPhase` / `ErrorHold` state machine.

/// Transaction controller state machine.
pub mod controller;

/// Pipeline registers.
pub mod latches;

/// Request and response signal definitions.
pub mod signals;

pub use controller::{ControllerState, TransactionController};
pub use latches::{PipelineRegisters, Transaction};
pub use signals::{BusRequest, BusResponse, HBurst, HResp, HSize, HTrans};

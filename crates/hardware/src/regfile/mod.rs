//! Register file with burst and error detection.
//!
//! This module implements the data-phase side of the slave:
//! 1. **Map:** Register names, offsets, access modes and reset values.
//! 2. **Storage:** The `RegisterStorage` seam and the default `RegisterBank`.
//! 3. **Checks:** Size, decode, alignment and access-mode validation.
//! 4. **Bursts:** Next-address arithmetic and beat counting.
//! 5. **Unit:** Evaluation of the latched transaction and the byte-lane write path.

/// Array-backed register storage.
pub mod bank;

/// Burst address generation and progress tracking.
pub mod burst;

/// Transfer validity checks.
pub mod checks;

/// Register map definitions.
pub mod map;

/// Storage trait.
pub mod traits;

/// Evaluation and commit logic.
pub mod unit;

pub use bank::RegisterBank;
pub use burst::{BurstTracker, next_address};
pub use map::{AccessMode, RegisterId};
pub use traits::RegisterStorage;
pub use unit::{RegisterFile, UnitOutputs};

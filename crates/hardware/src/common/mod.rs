//! Common types and constants shared by the bus controller and the register file.
//!
//! This module provides:
//! 1. **Constants:** Window geometry and byte-lane masks.
//! 2. **Error Handling:** Bus check failures and configuration errors.

/// Window geometry and byte-lane constants.
pub mod constants;

/// Error types.
pub mod error;

pub use constants::{ALL_LANES, WINDOW_SIZE};
pub use error::{BusError, ConfigError};

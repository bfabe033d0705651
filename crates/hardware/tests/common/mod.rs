//! Shared test infrastructure.


/// Cycle-driving harness.
pub mod harness;

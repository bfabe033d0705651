//! Bus activity statistics.
//!
//! This module tracks what the slave has done since construction. It provides:
//! 1. **Cycles:** Total clocks, clocks spent idle and clocks holding an error response.
//! 2. **Transfers:** Admissions, completed reads and writes, error responses.
//! 3. **Bursts:** Fixed-length bursts completed and fixed-length bursts cut short.

use tracing::info;

/// Counters updated once per clock by `AhbSlave::tick`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BusStats {
    /// Total clock cycles simulated.
    pub cycles: u64,
    /// Cycles with no data phase, no admission and no error response.
    pub idle_cycles: u64,
    /// Second cycles of error responses (`ErrorHold`).
    pub error_hold_cycles: u64,
    /// Address phases admitted into the pipeline.
    pub transfers: u64,
    /// Beats completed with an OKAY response.
    pub okay: u64,
    /// Completed read beats.
    pub reads: u64,
    /// Completed write beats.
    pub writes: u64,
    /// Register writes actually committed.
    pub register_writes: u64,
    /// Transfers rejected with an ERROR response.
    pub errors: u64,
    /// Multi-beat bursts that ran to their final beat.
    pub bursts_completed: u64,
    /// Fixed-length bursts discarded before their final beat, either superseded by a new
    /// first beat or cut short by reset. A BUSY pause the burst resumes from is not counted.
    pub bursts_abandoned: u64,
}

impl BusStats {
    /// Fraction of cycles carrying a data phase or an error response, in `[0, 1]`.
    pub fn utilization(&self) -> f64 {
        if self.cycles == 0 {
            return 0.0;
        }
        (self.okay + self.errors + self.error_hold_cycles) as f64 / self.cycles as f64
    }

    /// Logs every counter at `info` level.
    pub fn summary(&self) {
        info!(
            cycles = self.cycles,
            idle_cycles = self.idle_cycles,
            error_hold_cycles = self.error_hold_cycles,
            transfers = self.transfers,
            okay = self.okay,
            reads = self.reads,
            writes = self.writes,
            register_writes = self.register_writes,
            errors = self.errors,
            bursts_completed = self.bursts_completed,
            bursts_abandoned = self.bursts_abandoned,
            utilization = self.utilization(),
            "bus statistics"
        );
    }
}

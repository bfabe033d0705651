//! Bus slave: controller, pipeline registers and register unit wired together.
//!
//! One call to `tick` is one clock cycle. Within a cycle the slave
//! 1. evaluates the register unit against the transaction latched at the previous edge,
//! 2. runs the controller's transition on those results and the offered address phase,
//! 3. drives the response, and
//! 4. applies the clock edge: registers write data, commits the beat, latches any
//!    admitted address phase.

use tracing::{debug, info};

use crate::bus::controller::{
    ControllerInputs, ControllerOutputs, ControllerState, DataPhaseOutcome,
    TransactionController,
};
use crate::bus::latches::PipelineRegisters;
use crate::bus::signals::{BusRequest, BusResponse, HResp};
use crate::common::error::ConfigError;
use crate::config::Config;
use crate::regfile::bank::RegisterBank;
use crate::regfile::burst::BurstTracker;
use crate::regfile::traits::RegisterStorage;
use crate::regfile::unit::{RegisterFile, UnitOutputs};
use crate::stats::BusStats;

/// Pipelined bus slave in front of a register file.
#[derive(Debug)]
pub struct AhbSlave<S = RegisterBank> {
    controller: TransactionController,
    pipeline: PipelineRegisters,
    regfile: RegisterFile<S>,
    stats: BusStats,
    trace_transfers: bool,
}

impl AhbSlave<RegisterBank> {
    /// Builds a slave backed by a `RegisterBank` with the configured reset values.
    ///
    /// # Errors
    ///
    /// Returns any error from `Config::validate`.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let bank = RegisterBank::with_reset_values(&config.peripheral.reset_values);
        Self::with_storage(bank, config)
    }
}

impl<S: RegisterStorage> AhbSlave<S> {
    /// Builds a slave in front of arbitrary register storage.
    ///
    /// # Errors
    ///
    /// Returns any error from `Config::validate`.
    pub fn with_storage(storage: S, config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            controller: TransactionController::new(),
            pipeline: PipelineRegisters::new(),
            regfile: RegisterFile::new(storage, config.peripheral.base_addr),
            stats: BusStats::default(),
            trace_transfers: config.general.trace_transfers,
        })
    }

    /// Current controller state.
    #[inline]
    pub const fn state(&self) -> ControllerState {
        self.controller.state()
    }

    /// Pipeline registers as of the last clock edge.
    #[inline]
    pub const fn pipeline(&self) -> &PipelineRegisters {
        &self.pipeline
    }

    /// Burst progress state.
    #[inline]
    pub const fn burst(&self) -> &BurstTracker {
        self.regfile.tracker()
    }

    /// Register storage.
    #[inline]
    pub const fn storage(&self) -> &S {
        self.regfile.storage()
    }

    /// Mutable register storage, for the surrounding system.
    #[inline]
    pub const fn storage_mut(&mut self) -> &mut S {
        self.regfile.storage_mut()
    }

    /// Base address of the register window.
    #[inline]
    pub const fn base_addr(&self) -> u32 {
        self.regfile.base()
    }

    /// Activity counters.
    #[inline]
    pub const fn stats(&self) -> &BusStats {
        &self.stats
    }

    /// Advances the slave by one clock cycle and returns the lines driven this cycle.
    pub fn tick(&mut self, req: &BusRequest) -> BusResponse {
        let pending = self.pipeline.pending;
        let unit = self
            .regfile
            .evaluate(pending.as_ref(), self.controller.state().transfer_valid());

        let inputs = ControllerInputs {
            address_phase: req.is_address_phase(),
            latched_write: pending.is_some_and(|txn| txn.write),
            unit_error: unit.error,
            burst_done: unit.burst_done,
            single: unit
                .access
                .is_some_and(|access| access.beat.burst.is_single()),
        };
        let out = self.controller.tick(&inputs);

        let response = BusResponse {
            ready: out.ready,
            resp: out.resp,
            rdata: unit.rdata,
        };

        let superseded = self.superseded_burst(&unit);
        self.pipeline.latch_wdata(req.wdata);
        let written = self.regfile.commit(&unit, self.pipeline.wdata_q);
        self.pipeline.advance(req, out.admit);

        if out.admit {
            debug!(
                addr = format_args!("{:#010x}", req.addr),
                trans = ?req.trans,
                burst = ?req.burst,
                write = req.write,
                "address phase admitted"
            );
        }
        if superseded {
            self.stats.bursts_abandoned += 1;
            debug!("fixed-length burst superseded before its final beat");
        }
        self.record(&out, &unit, written);
        if self.trace_transfers {
            self.trace(&out, &unit, &response);
        }
        response
    }

    /// Ticks through a sequence of requests, one per cycle.
    pub fn run(&mut self, requests: &[BusRequest]) -> Vec<BusResponse> {
        requests.iter().map(|req| self.tick(req)).collect()
    }

    /// Asynchronous reset: controller, pipeline, burst state and register contents.
    ///
    /// Statistics are kept; a fixed-length burst cut short here counts as abandoned.
    pub fn reset(&mut self) {
        if self.regfile.tracker().has_fixed_length() {
            self.stats.bursts_abandoned += 1;
        }
        self.controller.reset();
        self.pipeline.reset();
        self.regfile.reset();
        info!("bus slave reset");
    }

    fn record(&mut self, out: &ControllerOutputs, unit: &UnitOutputs, written: bool) {
        let stats = &mut self.stats;
        stats.cycles += 1;
        if out.admit {
            stats.transfers += 1;
        }
        if written {
            stats.register_writes += 1;
        }
        let Some(outcome) = out.outcome else {
            if out.resp == HResp::Error {
                stats.error_hold_cycles += 1;
            } else if !out.admit {
                stats.idle_cycles += 1;
            }
            return;
        };
        if outcome == DataPhaseOutcome::Error {
            stats.errors += 1;
            return;
        }
        stats.okay += 1;
        debug!(?outcome, write = out.write, "data phase complete");
        if out.write {
            stats.writes += 1;
        } else {
            stats.reads += 1;
        }
        let multi_beat = unit
            .access
            .is_some_and(|access| !access.beat.burst.is_single());
        match outcome {
            DataPhaseOutcome::Complete if multi_beat => stats.bursts_completed += 1,
            DataPhaseOutcome::Abandon => debug!("no follow-up beat offered, burst paused"),
            _ => {}
        }
    }

    /// A first beat accepted while a fixed-length burst still has beats outstanding
    /// replaces that burst at the coming edge.
    fn superseded_burst(&self, unit: &UnitOutputs) -> bool {
        self.regfile.tracker().has_fixed_length()
            && unit.access.is_some_and(|access| access.beat.number == 1)
    }

    fn trace(&self, out: &ControllerOutputs, unit: &UnitOutputs, response: &BusResponse) {
        match (unit.access, unit.fault) {
            (Some(access), _) => info!(
                addr = format_args!("{:#010x}", access.beat.addr),
                reg = %access.reg,
                beat = access.beat.number,
                write = out.write,
                data = format_args!(
                    "{:#010x}",
                    if out.write { self.pipeline.wdata_q } else { response.rdata }
                ),
                resp = ?response.resp,
                "transfer"
            ),
            (None, Some(fault)) => info!(%fault, resp = ?response.resp, "transfer"),
            (None, None) => {}
        }
    }
}

use ahbsim_core::config::Config;
use ahbsim_core::regfile::RegisterId;
use ahbsim_core::sim::AhbSlave;
use ahbsim_core::{BusRequest, BusResponse, HSize};
use tracing_subscriber::EnvFilter;

/// Base address of the default peripheral window.
pub const BASE: u32 = 0x4000_0000;

/// Installs a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct TestContext {
    pub slave: AhbSlave,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        let slave = AhbSlave::new(config).unwrap();
        Self { slave }
    }

    /// Ticks one cycle.
    pub fn step(&mut self, req: BusRequest) -> BusResponse {
        self.slave.tick(&req)
    }

    /// Ticks one idle cycle.
    pub fn idle(&mut self) -> BusResponse {
        self.step(BusRequest::idle())
    }

    /// Runs one isolated transfer: address phase, data phase, and the hold cycle if it
    /// errored. Returns the data-phase response.
    pub fn transfer(&mut self, addr_phase: BusRequest, wdata: u32) -> BusResponse {
        let accepted = self.step(addr_phase);
        assert!(accepted.ready, "address phase offered while not ready");
        let data = self.step(BusRequest::idle().with_wdata(wdata));
        if data.is_error() {
            assert!(!data.ready, "first error cycle must stall");
            let hold = self.idle();
            assert!(hold.is_error(), "error response must last two cycles");
            assert!(hold.ready);
        }
        data
    }

    pub fn write(&mut self, addr: u32, size: HSize, wdata: u32) -> BusResponse {
        self.transfer(BusRequest::write(addr, size), wdata)
    }

    pub fn write_word(&mut self, offset: u32, value: u32) -> BusResponse {
        self.write(BASE + offset, HSize::Word, value)
    }

    /// Writes one byte, placing it on the lane selected by the address.
    pub fn write_byte(&mut self, offset: u32, value: u8) -> BusResponse {
        let lane_shift = (offset & 0b11) * 8;
        self.write(BASE + offset, HSize::Byte, u32::from(value) << lane_shift)
    }

    pub fn read(&mut self, addr: u32, size: HSize) -> BusResponse {
        self.transfer(BusRequest::read(addr, size), 0)
    }

    pub fn read_word(&mut self, offset: u32) -> BusResponse {
        self.read(BASE + offset, HSize::Word)
    }

    /// Register content as seen by the surrounding system.
    pub fn reg(&self, reg: RegisterId) -> u32 {
        self.slave.storage().peek(reg)
    }

    pub fn set_reg(&mut self, reg: RegisterId, value: u32) {
        self.slave.storage_mut().poke(reg, value);
    }

    /// Snapshot of every register, in map order.
    pub fn snapshot(&self) -> Vec<u32> {
        RegisterId::ALL.iter().map(|&reg| self.reg(reg)).collect()
    }
}

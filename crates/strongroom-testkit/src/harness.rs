//! Tick-controlled service harness

use parking_lot::Mutex;
use strongroom_core::{ActorId, CallContext, PortfolioId, RegistryConfig, RegistryResult, Tick};
use strongroom_registry::{NewPortfolio, PortfolioService};
use strongroom_store::MemoryStore;

/// In-memory `PortfolioService` plus a current tick the test moves by hand
#[derive(Debug)]
pub struct Harness {
    service: PortfolioService<MemoryStore>,
    tick: Mutex<u64>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Default configuration, clock at zero
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Custom configuration, clock at zero
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            service: PortfolioService::new(MemoryStore::new(), config),
            tick: Mutex::new(0),
        }
    }

    /// Service under test
    pub fn service(&self) -> &PortfolioService<MemoryStore> {
        &self.service
    }

    /// Current tick
    pub fn now(&self) -> Tick {
        Tick(*self.tick.lock())
    }

    /// Move the clock forward
    pub fn advance(&self, ticks: u64) {
        let mut tick = self.tick.lock();
        *tick = tick.saturating_add(ticks);
    }

    /// Jump the clock to an absolute tick
    pub fn set_tick(&self, tick: u64) {
        *self.tick.lock() = tick;
    }

    /// Call context for `actor` at the current tick
    pub fn ctx(&self, actor: &ActorId) -> CallContext {
        CallContext::new(actor.clone(), self.now().value())
    }

    /// Create a one-tag portfolio owned by `owner`
    pub fn create_vault(&self, owner: &ActorId, name: &str) -> RegistryResult<PortfolioId> {
        self.service
            .create(&self.ctx(owner), NewPortfolio::new(name, 100, &["btc"]))
    }
}

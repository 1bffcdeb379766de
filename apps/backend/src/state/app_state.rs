use std::sync::Arc;

use crate::ai::StrategyRegistry;
use crate::config::OrchestratorConfig;
use crate::infra::GameLocks;
use crate::repos::GameStore;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway for game records.
    pub store: Arc<dyn GameStore>,
    /// Strategy registry, immutable after startup.
    pub registry: Arc<StrategyRegistry>,
    /// Per-game mutual exclusion.
    pub locks: Arc<GameLocks>,
    /// Orchestrator tunables.
    pub config: OrchestratorConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn GameStore>,
        registry: Arc<StrategyRegistry>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            store,
            registry,
            locks: Arc::new(GameLocks::new()),
            config,
        }
    }

    /// In-memory state with the built-in strategies, for tests and
    /// embedding.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(crate::adapters::MemoryGameStore::new()),
            Arc::new(StrategyRegistry::discover()),
            OrchestratorConfig::default(),
        )
    }
}

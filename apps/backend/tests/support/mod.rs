#![allow(dead_code)]

//! Shared helpers for integration tests: state builders and scripted
//! strategies with controlled failure modes.

use std::sync::Arc;
use std::time::Duration;

use backend::adapters::MemoryGameStore;
use backend::ai::{Strategy, StrategyError, StrategyRegistry};
use backend::repos::GameStore;
use backend::rules::BoardPosition;
use backend::{AppState, GameService, OrchestratorConfig};
use once_cell::sync::OnceCell;
use uuid::Uuid;

static LOGGING: OnceCell<()> = OnceCell::new();

pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(tracing_subscriber::EnvFilter::new)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Service over a fresh in-memory store with the built-in strategies.
pub fn service() -> GameService {
    init_logging();
    GameService::new(AppState::in_memory())
}

/// Service with a custom registry and config over a fresh store.
pub fn service_with(registry: StrategyRegistry, config: OrchestratorConfig) -> GameService {
    init_logging();
    GameService::new(AppState::new(
        Arc::new(MemoryGameStore::new()),
        Arc::new(registry),
        config,
    ))
}

/// Service with a custom registry and config over a shared store, for
/// tests that observe one store through differently configured processes.
pub fn service_sharing(
    store: Arc<dyn GameStore>,
    registry: StrategyRegistry,
    config: OrchestratorConfig,
) -> GameService {
    init_logging();
    GameService::new(AppState::new(store, Arc::new(registry), config))
}

/// Conforming strategy that never produces a move.
pub struct NullStrategy;

impl Strategy for NullStrategy {
    fn name(&self) -> &str {
        "null"
    }

    fn description(&self) -> &str {
        "never produces a move"
    }

    fn choose_move(
        &self,
        _position: &BoardPosition,
        _game_id: Option<Uuid>,
    ) -> Result<Option<String>, StrategyError> {
        Ok(None)
    }
}

/// Strategy that sleeps past any configured bound.
pub struct StallingStrategy(pub Duration);

impl Strategy for StallingStrategy {
    fn name(&self) -> &str {
        "stalling"
    }

    fn description(&self) -> &str {
        "sleeps before moving"
    }

    fn choose_move(
        &self,
        position: &BoardPosition,
        _game_id: Option<Uuid>,
    ) -> Result<Option<String>, StrategyError> {
        std::thread::sleep(self.0);
        Ok(position.legal_uci_moves().first().cloned())
    }
}

/// Strategy that panics on every invocation.
pub struct PanickingStrategy;

impl Strategy for PanickingStrategy {
    fn name(&self) -> &str {
        "panicking"
    }

    fn description(&self) -> &str {
        "always panics"
    }

    fn choose_move(
        &self,
        _position: &BoardPosition,
        _game_id: Option<Uuid>,
    ) -> Result<Option<String>, StrategyError> {
        panic!("scripted failure");
    }
}

/// Strategy that always suggests the same (usually illegal) move.
pub struct FixedMoveStrategy(pub &'static str);

impl Strategy for FixedMoveStrategy {
    fn name(&self) -> &str {
        "fixed"
    }

    fn description(&self) -> &str {
        "always suggests the same move"
    }

    fn choose_move(
        &self,
        _position: &BoardPosition,
        _game_id: Option<Uuid>,
    ) -> Result<Option<String>, StrategyError> {
        Ok(Some(self.0.to_string()))
    }
}

/// Deterministic strategy: plays the first legal move.
pub struct FirstMoveStrategy;

impl Strategy for FirstMoveStrategy {
    fn name(&self) -> &str {
        "first"
    }

    fn description(&self) -> &str {
        "plays the first legal move"
    }

    fn choose_move(
        &self,
        position: &BoardPosition,
        _game_id: Option<Uuid>,
    ) -> Result<Option<String>, StrategyError> {
        Ok(position.legal_uci_moves().first().cloned())
    }
}

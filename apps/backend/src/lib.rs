#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod ai;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod protocol;
pub mod repos;
pub mod rules;
pub mod services;
pub mod state;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use ai::{Strategy, StrategyError, StrategyInfo, StrategyRegistry};
pub use config::OrchestratorConfig;
pub use domain::{GameRecord, GameSnapshot, SeatAssignment, Session, Side, TerminationFlags};
pub use errors::{GameError, NotFoundKind};
pub use services::game_flow::{AutoOutcome, AutoReply, TurnOutcome, TurnState};
pub use services::{GameFlowService, GameService};
pub use state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}

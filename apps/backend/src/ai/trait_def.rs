//! Strategy trait definition.

use thiserror::Error;
use uuid::Uuid;

use crate::rules::BoardPosition;

/// Errors that can occur during automated move computation.
///
/// These surface to callers as warnings on an otherwise successful
/// orchestrated turn; they never abort a committed human move.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// Strategy failed to produce a move within the configured bound.
    #[error("strategy timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Strategy implementation panicked; caught at the dispatch boundary.
    #[error("strategy panicked: {0}")]
    Panicked(String),

    /// Strategy encountered an internal error.
    #[error("strategy internal error: {0}")]
    Internal(String),

    /// Strategy suggested a move that is not legal in the position.
    #[error("strategy suggested an illegal move: {0}")]
    IllegalSuggestion(String),
}

/// Trait for automated players.
///
/// Implementations receive a read-only position and must choose a legal
/// move, returned in UCI notation. `Ok(None)` means no move is available
/// (terminal position) and is never an error. Implementations must not
/// mutate anything outside their own invocation; `game_id` is provided for
/// bookkeeping and telemetry only. Failures must be reported through
/// [`StrategyError`], never suppressed.
pub trait Strategy: Send + Sync {
    /// Stable registry name.
    fn name(&self) -> &str;

    /// Human-readable description for strategy listings.
    fn description(&self) -> &str;

    /// Compute a move for the side to play in `position`.
    fn choose_move(
        &self,
        position: &BoardPosition,
        game_id: Option<Uuid>,
    ) -> Result<Option<String>, StrategyError>;
}

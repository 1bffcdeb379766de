//! Strategy dispatch boundary.
//!
//! Strategy computation is untrusted, possibly-failing external work: it
//! runs on a blocking thread bounded by a timeout, and a panicking
//! implementation is caught at the join boundary and converted into a
//! [`StrategyError`]. Nothing a strategy does can corrupt session state:
//! the session is only touched after the suggestion has been validated.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinError;
use tracing::debug;
use uuid::Uuid;

use crate::ai::{Strategy, StrategyError};
use crate::rules::BoardPosition;

/// Invoke `choose_move` with the configured time bound.
///
/// On timeout the orchestrator stops waiting and treats the step as "no
/// move produced"; the abandoned blocking task finishes on its own without
/// holding the per-game lock hostage.
pub(super) async fn invoke_with_timeout(
    strategy: Arc<dyn Strategy>,
    position: BoardPosition,
    game_id: Uuid,
    limit: Duration,
) -> Result<Option<String>, StrategyError> {
    debug!(%game_id, strategy = strategy.name(), "invoking strategy");

    let handle =
        tokio::task::spawn_blocking(move || strategy.choose_move(&position, Some(game_id)));

    match tokio::time::timeout(limit, handle).await {
        Err(_) => Err(StrategyError::Timeout(limit)),
        Ok(Err(join_error)) => Err(join_error_to_strategy_error(join_error)),
        Ok(Ok(result)) => result,
    }
}

fn join_error_to_strategy_error(err: JoinError) -> StrategyError {
    if err.is_panic() {
        let payload = err.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        StrategyError::Panicked(message)
    } else {
        StrategyError::Internal("strategy task was cancelled".to_string())
    }
}

//! Public snapshot API for observing game state without exposing internals.

use serde::{Deserialize, Serialize};

use crate::domain::record::Side;
use crate::domain::termination::TerminationFlags;

/// Read-only view of one game, as returned to callers.
///
/// `legal_moves` is freshly computed for the current position and is
/// deterministic for a given `fen`. `game_over` is the claim-draw display
/// aggregate; the individual flags stay available for consumers that need
/// the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub fen: String,
    pub pgn: String,
    pub turn: Side,
    pub flags: TerminationFlags,
    pub game_over: bool,
    pub legal_moves: Vec<String>,
    /// History reconstruction fell back to position-only truth. Non-fatal.
    pub history_degraded: bool,
}

//! Termination-flag aggregation.

use serde::{Deserialize, Serialize};

use crate::rules::PositionTermination;

/// The five end-of-game predicates, kept as independent booleans because
/// consumers distinguish *why* a game ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationFlags {
    pub checkmate: bool,
    pub stalemate: bool,
    pub insufficient_material: bool,
    pub seventyfive_moves: bool,
    pub fivefold_repetition: bool,
}

impl TerminationFlags {
    pub fn from_position(term: PositionTermination, fivefold_repetition: bool) -> Self {
        Self {
            checkmate: term.checkmate,
            stalemate: term.stalemate,
            insufficient_material: term.insufficient_material,
            seventyfive_moves: term.seventyfive_moves,
            fivefold_repetition,
        }
    }

    /// Any flag set. The orchestrator stops resolving moves here.
    pub fn is_terminal(&self) -> bool {
        self.checkmate
            || self.stalemate
            || self.insufficient_material
            || self.seventyfive_moves
            || self.fivefold_repetition
    }

    /// Display aggregate: checkmate or stalemate, extended with the
    /// draw-by-rule flags when the caller opts into claiming a draw.
    pub fn game_over(&self, claim_draw: bool) -> bool {
        self.checkmate
            || self.stalemate
            || (claim_draw
                && (self.insufficient_material
                    || self.seventyfive_moves
                    || self.fivefold_repetition))
    }
}

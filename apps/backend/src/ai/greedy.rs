//! Greedy material strategy.
//!
//! Scores each legal move by the material it wins immediately (captured
//! piece plus promotion gain) and plays a random best-scoring move. With no
//! material on offer it behaves like the random strategy.

use std::sync::Mutex;

use rand::prelude::*;
use uuid::Uuid;

use super::trait_def::{Strategy, StrategyError};
use crate::rules::{BoardPosition, LegalMove, Role};

/// Strategy that grabs the most material available this ply.
pub struct GreedyStrategy {
    rng: Mutex<StdRng>,
}

impl GreedyStrategy {
    pub const NAME: &'static str = "greedy";
    pub const DESCRIPTION: &'static str =
        "Prefers the capture or promotion winning the most material, otherwise plays randomly.";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn score(m: &LegalMove) -> u32 {
        let capture = m.capture.map(role_value).unwrap_or(0);
        // A promotion trades a pawn for the promoted piece.
        let promotion = m
            .promotion
            .map(|role| role_value(role).saturating_sub(role_value(Role::Pawn)))
            .unwrap_or(0);
        capture + promotion
    }
}

fn role_value(role: Role) -> u32 {
    match role {
        Role::Pawn => 1,
        Role::Knight | Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        // Capturing the king never happens in legal chess; promotion to a
        // king does not exist either.
        Role::King => 0,
    }
}

impl Strategy for GreedyStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn choose_move(
        &self,
        position: &BoardPosition,
        _game_id: Option<Uuid>,
    ) -> Result<Option<String>, StrategyError> {
        let legal = position.legal_moves();
        if legal.is_empty() {
            return Ok(None);
        }

        let best = legal.iter().map(Self::score).max().unwrap_or(0);
        let candidates: Vec<&LegalMove> =
            legal.iter().filter(|m| Self::score(m) == best).collect();

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| StrategyError::Internal(format!("RNG lock poisoned: {e}")))?;

        let choice = candidates
            .choose(&mut *rng)
            .ok_or_else(|| StrategyError::Internal("failed to choose a move".into()))?;

        Ok(Some(choice.uci.clone()))
    }
}

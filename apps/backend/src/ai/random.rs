//! Random strategy - plays a uniformly random legal move.
//!
//! This is the reference implementation of the [`Strategy`] trait: it
//! always selects from the legal-move list, keeps its RNG behind a mutex
//! for interior mutability, supports seeding for deterministic tests, and
//! reports failures without panicking.

use std::sync::Mutex;

use rand::prelude::*;
use uuid::Uuid;

use super::trait_def::{Strategy, StrategyError};
use crate::rules::BoardPosition;

/// Strategy that makes random legal moves.
pub struct RandomStrategy {
    /// RNG behind a mutex: trait methods take `&self`.
    rng: Mutex<StdRng>,
}

impl RandomStrategy {
    pub const NAME: &'static str = "random";
    pub const DESCRIPTION: &'static str =
        "Selects a uniformly random legal move from the available options.";

    /// `Some(seed)` gives reproducible behavior for tests; `None` seeds
    /// from system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Strategy for RandomStrategy {
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

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| StrategyError::Internal(format!("RNG lock poisoned: {e}")))?;

        let choice = legal
            .choose(&mut *rng)
            .ok_or_else(|| StrategyError::Internal("failed to choose a random move".into()))?;

        Ok(Some(choice.uci.clone()))
    }
}

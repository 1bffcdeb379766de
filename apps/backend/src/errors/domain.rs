//! Domain-level error type used across services and adapters.
//!
//! This error type is transport- and storage-agnostic. Service operations
//! return `Result<T, GameError>`; a transport layer embedding this crate
//! maps the variants onto its own status codes.

use thiserror::Error;
use uuid::Uuid;

use crate::ai::StrategyError;

/// Domain-level not found entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Strategy,
}

/// Central domain error type.
///
/// `InvalidFormat`, `IllegalMove` and `NotFound` abort the requested
/// operation with no partial mutation. A `Strategy` error raised during an
/// implicit cascaded step is downgraded to a warning annotation by the
/// orchestrator and never rolls back the committed human move.
#[derive(Debug, Error)]
pub enum GameError {
    /// Move notation that does not parse at all.
    #[error("invalid move format: {notation}")]
    InvalidFormat { notation: String },

    /// Well-formed notation that is not legal in the current position.
    #[error("illegal move: {notation}")]
    IllegalMove { notation: String },

    /// Unknown session id or strategy name.
    #[error("{kind:?} not found: {detail}")]
    NotFound { kind: NotFoundKind, detail: String },

    /// Strategy failed, timed out, panicked, or suggested an illegal move.
    #[error(transparent)]
    Strategy(#[from] StrategyError),

    /// Persistence gateway failure or unrecoverable record corruption.
    #[error("store error: {detail}")]
    Store { detail: String },

    /// Invalid runtime configuration.
    #[error("configuration error: {detail}")]
    Config { detail: String },
}

impl GameError {
    pub fn invalid_format(notation: impl Into<String>) -> Self {
        Self::InvalidFormat {
            notation: notation.into(),
        }
    }

    pub fn illegal_move(notation: impl Into<String>) -> Self {
        Self::IllegalMove {
            notation: notation.into(),
        }
    }

    pub fn game_not_found(id: Uuid) -> Self {
        Self::NotFound {
            kind: NotFoundKind::Game,
            detail: format!("game {id} does not exist"),
        }
    }

    pub fn strategy_not_found(name: &str) -> Self {
        Self::NotFound {
            kind: NotFoundKind::Strategy,
            detail: format!("strategy '{name}' is not registered"),
        }
    }

    pub fn store(detail: impl Into<String>) -> Self {
        Self::Store {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// True for the rejection variants that leave session state untouched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GameError::InvalidFormat { .. } | GameError::IllegalMove { .. }
        )
    }
}

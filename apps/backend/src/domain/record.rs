//! The persisted unit for one game.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::termination::TerminationFlags;
use crate::rules::STANDARD_START_FEN;

/// One side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Per-side strategy assignment.
///
/// An `Assigned` name is validated against the registry only when the game
/// is created; a name that later disappears from the registry is allowed to
/// persist and degrades gracefully at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatAssignment {
    Unassigned,
    Assigned(String),
}

impl SeatAssignment {
    pub fn from_option(name: Option<String>) -> Self {
        match name {
            Some(name) => SeatAssignment::Assigned(name),
            None => SeatAssignment::Unassigned,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            SeatAssignment::Assigned(name) => Some(name),
            SeatAssignment::Unassigned => None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, SeatAssignment::Assigned(_))
    }
}

/// Persisted game state.
///
/// `turn` and `flags` are derived from (`fen`, `pgn`) and are stored only
/// for the convenience of read paths; an accepted move replaces `fen`,
/// `pgn`, `turn` and all five flags together as one unit. There are no
/// partial field updates.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub id: Uuid,
    pub fen: String,
    pub pgn: String,
    pub turn: Side,
    pub flags: TerminationFlags,
    pub white_strategy: SeatAssignment,
    pub black_strategy: SeatAssignment,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl GameRecord {
    /// A fresh game at the standard start with an empty history.
    pub fn new(white_strategy: SeatAssignment, black_strategy: SeatAssignment) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            fen: STANDARD_START_FEN.to_string(),
            pgn: String::new(),
            turn: Side::White,
            flags: TerminationFlags::default(),
            white_strategy,
            black_strategy,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn strategy_for(&self, side: Side) -> &SeatAssignment {
        match side {
            Side::White => &self.white_strategy,
            Side::Black => &self.black_strategy,
        }
    }
}

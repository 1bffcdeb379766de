//! Rules-engine adapter.
//!
//! Chess legality, notation and termination predicates come from shakmaty;
//! movetext parsing comes from pgn-reader. Nothing in this crate
//! reimplements the rules of the game; this module only wraps the engine
//! behind the project's own types.

pub mod movetext;
pub mod position;

pub use movetext::{replay, write_game, Replayed, ReplayError};
pub use position::{
    AppliedPly, BoardPosition, LegalMove, PositionTermination, RulesError, SanOutcome,
    STANDARD_START_FEN,
};

pub use shakmaty::Role;

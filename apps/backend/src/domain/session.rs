//! Live session state for one game.
//!
//! A session is reconstructed from the persisted (position, history) pair,
//! applies at most one move per call, and produces read-only snapshots.
//! The reconstruction policy: the position is the source of truth for the
//! legality of the *next* move; the history is advisory and may degrade.

use time::OffsetDateTime;
use tracing::warn;

use crate::domain::record::{GameRecord, Side};
use crate::domain::snapshot::GameSnapshot;
use crate::domain::termination::TerminationFlags;
use crate::errors::GameError;
use crate::rules::{movetext, BoardPosition, RulesError, STANDARD_START_FEN};

/// An accepted move, as reported to the orchestrator.
#[derive(Debug, Clone)]
pub struct AppliedMove {
    /// Normalized UCI of the move.
    pub uci: String,
    /// The token recorded into history: the derived SAN, or the raw UCI
    /// fallback when derivation failed verification.
    pub notation: String,
    /// Side that made the move.
    pub mover: Side,
}

#[derive(Debug)]
pub struct Session {
    position: BoardPosition,
    /// Start of the replayable history; `None` means the standard start.
    anchor_fen: Option<String>,
    /// Ply tokens since the anchor.
    sans: Vec<String>,
    /// Repetition keys for the anchor and every position after it.
    repetition_keys: Vec<String>,
    flags: TerminationFlags,
    history_degraded: bool,
}

impl Session {
    /// A fresh game at the standard start.
    pub fn new() -> Self {
        let position = BoardPosition::standard();
        let mut session = Self {
            repetition_keys: vec![position.repetition_key()],
            position,
            anchor_fen: None,
            sans: Vec::new(),
            flags: TerminationFlags::default(),
            history_degraded: false,
        };
        session.refresh_flags();
        session
    }

    /// Rebuild the session from a persisted (position, history) pair.
    ///
    /// The history is replayed from the anchor implied by its headers (or
    /// the standard start). If replay fails at any ply, or does not
    /// reproduce the stored position exactly, the session falls back to
    /// trusting the position directly and the history anchor is reset to
    /// the current position. Only an unreadable stored position is an
    /// error.
    pub fn reconstruct(fen: &str, pgn: &str) -> Result<Self, GameError> {
        if pgn.trim().is_empty() {
            return Self::from_position_only(fen, false);
        }

        match movetext::replay(pgn) {
            Ok(replayed) => {
                let replayed_fen = replayed.position.to_fen();
                if replayed_fen == fen {
                    let mut session = Self {
                        position: replayed.position,
                        anchor_fen: replayed.anchor_fen,
                        sans: replayed.sans,
                        repetition_keys: replayed.repetition_keys,
                        flags: TerminationFlags::default(),
                        history_degraded: false,
                    };
                    session.refresh_flags();
                    Ok(session)
                } else {
                    warn!(
                        stored = fen,
                        replayed = %replayed_fen,
                        "history does not reproduce the stored position; continuing from position only"
                    );
                    Self::from_position_only(fen, true)
                }
            }
            Err(err) => {
                warn!(error = %err, "history replay failed; continuing from position only");
                Self::from_position_only(fen, true)
            }
        }
    }

    fn from_position_only(fen: &str, degraded: bool) -> Result<Self, GameError> {
        let position = BoardPosition::from_fen(fen)
            .map_err(|e| GameError::store(format!("stored position is unreadable: {e}")))?;
        let normalized = position.to_fen();
        let anchor_fen = (normalized != STANDARD_START_FEN).then_some(normalized);
        let mut session = Self {
            repetition_keys: vec![position.repetition_key()],
            position,
            anchor_fen,
            sans: Vec::new(),
            flags: TerminationFlags::default(),
            history_degraded: degraded,
        };
        session.refresh_flags();
        Ok(session)
    }

    /// Validate and apply one move given in UCI notation.
    ///
    /// Rejections (`InvalidFormat`, `IllegalMove`) leave the session
    /// untouched. On success the position, history, repetition keys and
    /// all five termination flags are updated together.
    pub fn apply_move(&mut self, notation: &str) -> Result<AppliedMove, GameError> {
        let mover = self.position.turn();
        let applied = self.position.apply_uci(notation).map_err(|e| match e {
            RulesError::InvalidUci(n) => GameError::invalid_format(n),
            RulesError::IllegalMove(n) => GameError::illegal_move(n),
            RulesError::InvalidFen(d) => GameError::store(d),
        })?;

        if applied.san.is_fallback() {
            warn!(
                uci = %applied.uci,
                "SAN derivation failed verification; recording the raw move token and degrading history"
            );
            self.history_degraded = true;
        }

        let notation = applied.san.token().to_string();
        self.sans.push(notation.clone());
        self.position = applied.position;
        self.repetition_keys.push(self.position.repetition_key());
        self.refresh_flags();

        Ok(AppliedMove {
            uci: applied.uci,
            notation,
            mover,
        })
    }

    /// The movetext encoding of the session's history.
    pub fn movetext(&self) -> String {
        if self.anchor_fen.is_none() && self.sans.is_empty() {
            return String::new();
        }
        movetext::write_game(self.anchor_fen.as_deref(), &self.sans)
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            fen: self.position.to_fen(),
            pgn: self.movetext(),
            turn: self.position.turn(),
            flags: self.flags,
            game_over: self.flags.game_over(true),
            legal_moves: self.position.legal_uci_moves(),
            history_degraded: self.history_degraded,
        }
    }

    /// Write the session state back into a record. All derived fields are
    /// replaced together; a caller then persists the record as one unit.
    pub fn write_back(&self, record: &mut GameRecord) {
        record.fen = self.position.to_fen();
        record.pgn = self.movetext();
        record.turn = self.position.turn();
        record.flags = self.flags;
        record.updated_at = OffsetDateTime::now_utc();
    }

    pub fn position(&self) -> &BoardPosition {
        &self.position
    }

    pub fn turn(&self) -> Side {
        self.position.turn()
    }

    pub fn flags(&self) -> TerminationFlags {
        self.flags
    }

    pub fn history_degraded(&self) -> bool {
        self.history_degraded
    }

    fn refresh_flags(&mut self) {
        let current = self.position.repetition_key();
        let occurrences = self
            .repetition_keys
            .iter()
            .filter(|key| **key == current)
            .count();
        self.flags = TerminationFlags::from_position(self.position.termination(), occurrences >= 5);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::SeatAssignment;

    #[test]
    fn accepted_move_flips_turn_and_records_history() {
        let mut session = Session::new();
        let applied = session.apply_move("e2e4").unwrap();
        assert_eq!(applied.mover, Side::White);
        assert_eq!(applied.notation, "e4");
        assert_eq!(session.turn(), Side::Black);
        assert_eq!(session.movetext(), "1. e4 *");
        assert!(!session.flags().is_terminal());
    }

    #[test]
    fn rejections_leave_state_untouched() {
        let mut session = Session::new();
        let before = session.snapshot();

        assert!(matches!(
            session.apply_move("nonsense"),
            Err(GameError::InvalidFormat { .. })
        ));
        assert!(matches!(
            session.apply_move("e2e5"),
            Err(GameError::IllegalMove { .. })
        ));

        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn write_back_then_reconstruct_round_trips() {
        let mut session = Session::new();
        for uci in ["e2e4", "e7e5", "g1f3", "b8c6"] {
            session.apply_move(uci).unwrap();
        }
        let mut record = GameRecord::new(SeatAssignment::Unassigned, SeatAssignment::Unassigned);
        session.write_back(&mut record);

        let rebuilt = Session::reconstruct(&record.fen, &record.pgn).unwrap();
        assert_eq!(rebuilt.snapshot(), session.snapshot());
        assert!(!rebuilt.history_degraded());
    }

    #[test]
    fn malformed_history_falls_back_to_the_position() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
        let session = Session::reconstruct(fen, "1. e4 Qxe4 something &&& *").unwrap();

        assert!(session.history_degraded());
        assert_eq!(session.snapshot().fen, fen);
        // The anchor moved to the stored position, so new history replays
        // from there.
        assert!(session.movetext().contains("[FEN"));
    }

    #[test]
    fn history_position_mismatch_degrades() {
        // Valid movetext that ends somewhere else than the stored position.
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let session = Session::reconstruct(fen, "1. e4 e5 *").unwrap();
        assert!(session.history_degraded());
        assert_eq!(session.snapshot().fen, fen);
    }

    #[test]
    fn unreadable_position_is_a_store_error() {
        assert!(matches!(
            Session::reconstruct("garbage", "also garbage"),
            Err(GameError::Store { .. })
        ));
    }

    #[test]
    fn turn_invariant_holds_along_a_line() {
        let mut session = Session::new();
        for uci in ["d2d4", "d7d5", "c2c4", "e7e6", "b1c3"] {
            let mover = session.turn();
            let applied = session.apply_move(uci).unwrap();
            assert_eq!(applied.mover, mover);
            assert_eq!(session.turn(), mover.opponent());
        }
    }

    #[test]
    fn mating_move_sets_checkmate_and_empties_legal_moves() {
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2";
        let mut session = Session::reconstruct(fen, "").unwrap();
        session.apply_move("d8h4").unwrap();

        let snapshot = session.snapshot();
        assert!(snapshot.flags.checkmate);
        assert!(snapshot.game_over);
        assert!(snapshot.legal_moves.is_empty());
    }

    #[test]
    fn knight_shuffle_reaches_fivefold_repetition() {
        let mut session = Session::new();
        for _ in 0..4 {
            for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
                session.apply_move(uci).unwrap();
            }
        }
        let flags = session.flags();
        assert!(flags.fivefold_repetition);
        assert!(flags.is_terminal());
        assert!(!flags.game_over(false));
        assert!(flags.game_over(true));
    }

    #[test]
    fn empty_history_with_custom_position_is_not_degraded() {
        let fen = "8/8/8/4k3/8/8/8/4K3 w - - 0 1";
        let session = Session::reconstruct(fen, "").unwrap();
        assert!(!session.history_degraded());
        assert!(session.flags().insufficient_material);
    }
}

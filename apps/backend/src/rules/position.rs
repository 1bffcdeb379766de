//! Board position wrapper over shakmaty.
//!
//! Provides FEN parsing and encoding, legal move generation, move
//! application with SAN derivation, and the position-level termination
//! predicates (checkmate, stalemate, insufficient material, 75-move rule).
//! Fivefold repetition needs the move history and is aggregated by the
//! session layer from [`BoardPosition::repetition_key`].

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position, Role};
use thiserror::Error;

use crate::domain::Side;

/// FEN of the standard starting position.
pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Errors produced by the rules adapter.
#[derive(Debug, Error)]
pub enum RulesError {
    /// Position encoding that does not parse or is unreachable.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Move notation that does not parse as UCI.
    #[error("invalid UCI move: {0}")]
    InvalidUci(String),

    /// Well-formed move that is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
}

/// A legal move in the current position.
///
/// `san` is only valid relative to the position it was generated from.
#[derive(Debug, Clone)]
pub struct LegalMove {
    pub uci: String,
    pub san: String,
    pub capture: Option<Role>,
    pub promotion: Option<Role>,
}

/// How the recorded notation for an accepted move was obtained.
///
/// A derived SAN is verified by parsing it back against the pre-move
/// position; on mismatch the raw UCI token is recorded instead. The
/// fallback token is not guaranteed to re-parse as SAN on replay; history
/// degrades while the position stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanOutcome {
    Derived(String),
    Fallback(String),
}

impl SanOutcome {
    pub fn token(&self) -> &str {
        match self {
            SanOutcome::Derived(s) | SanOutcome::Fallback(s) => s,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SanOutcome::Fallback(_))
    }
}

/// Result of applying one move: the successor position plus both notations.
#[derive(Debug, Clone)]
pub struct AppliedPly {
    pub position: BoardPosition,
    pub uci: String,
    pub san: SanOutcome,
}

/// The four termination predicates that are a pure function of the position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionTermination {
    pub checkmate: bool,
    pub stalemate: bool,
    pub insufficient_material: bool,
    pub seventyfive_moves: bool,
}

/// A single board state with validation and termination predicates.
#[derive(Debug, Clone)]
pub struct BoardPosition {
    inner: Chess,
}

impl BoardPosition {
    /// The standard starting position.
    pub fn standard() -> Self {
        Self {
            inner: Chess::default(),
        }
    }

    /// Parse a position from its FEN encoding.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|e| RulesError::InvalidFen(format!("{fen}: {e}")))?;
        let inner: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| RulesError::InvalidFen(format!("{fen}: {e}")))?;
        Ok(Self { inner })
    }

    /// Encode the position as FEN. Round-trips exactly through
    /// [`BoardPosition::from_fen`].
    pub fn to_fen(&self) -> String {
        Fen::from_position(&self.inner, EnPassantMode::Legal).to_string()
    }

    pub fn turn(&self) -> Side {
        side_from(self.inner.turn())
    }

    pub fn is_check(&self) -> bool {
        self.inner.is_check()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.inner.halfmoves()
    }

    pub fn fullmove_number(&self) -> u32 {
        self.inner.fullmoves().get()
    }

    /// All legal moves, in the engine's deterministic generation order.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        self.inner
            .legal_moves()
            .into_iter()
            .map(|m| {
                let capture = m.capture();
                let promotion = m.promotion();
                let uci = m.to_uci(CastlingMode::Standard).to_string();
                let san = San::from_move(&self.inner, m).to_string();
                LegalMove {
                    uci,
                    san,
                    capture,
                    promotion,
                }
            })
            .collect()
    }

    /// Legal moves as bare UCI strings, for snapshots.
    pub fn legal_uci_moves(&self) -> Vec<String> {
        self.inner
            .legal_moves()
            .into_iter()
            .map(|m| m.to_uci(CastlingMode::Standard).to_string())
            .collect()
    }

    /// Validate and apply a move given in UCI notation.
    ///
    /// The position itself is immutable; the successor is returned in the
    /// [`AppliedPly`] together with the normalized UCI and the SAN derived
    /// from the pre-move position.
    pub fn apply_uci(&self, notation: &str) -> Result<AppliedPly, RulesError> {
        let uci: UciMove = notation
            .parse()
            .map_err(|_| RulesError::InvalidUci(notation.to_string()))?;
        let m = uci
            .to_move(&self.inner)
            .map_err(|_| RulesError::IllegalMove(notation.to_string()))?;
        if !self.inner.legal_moves().contains(&m) {
            return Err(RulesError::IllegalMove(notation.to_string()));
        }

        let normalized = m.to_uci(CastlingMode::Standard).to_string();
        let san = derive_san(&self.inner, m);
        let mut next = self.inner.clone();
        next.play_unchecked(m);

        Ok(AppliedPly {
            position: Self { inner: next },
            uci: normalized,
            san,
        })
    }

    /// Replay one SAN ply, as stored in movetext.
    pub(crate) fn play_san(&self, san: &San) -> Result<Self, RulesError> {
        let m = san
            .to_move(&self.inner)
            .map_err(|_| RulesError::IllegalMove(san.to_string()))?;
        let mut next = self.inner.clone();
        next.play_unchecked(m);
        Ok(Self { inner: next })
    }

    /// Position-level termination predicates.
    pub fn termination(&self) -> PositionTermination {
        PositionTermination {
            checkmate: self.inner.is_checkmate(),
            stalemate: self.inner.is_stalemate(),
            insufficient_material: self.inner.is_insufficient_material(),
            seventyfive_moves: self.inner.halfmoves() >= 150,
        }
    }

    /// Key under which two positions count as repetitions of each other:
    /// piece placement, side to move, castling rights and en-passant
    /// target (the first four FEN fields, clocks excluded).
    pub fn repetition_key(&self) -> String {
        let fen = self.to_fen();
        fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
    }
}

fn side_from(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

/// Derive SAN for a move and verify it parses back to the same move on the
/// pre-move position. Verification failure falls back to the UCI token.
fn derive_san(pos: &Chess, m: Move) -> SanOutcome {
    let san = San::from_move(pos, m);
    match san.to_move(pos) {
        Ok(round_trip) if round_trip == m => {
            let mut successor = pos.clone();
            successor.play_unchecked(m);
            let suffix = if successor.is_checkmate() {
                "#"
            } else if successor.is_check() {
                "+"
            } else {
                ""
            };
            SanOutcome::Derived(format!("{san}{suffix}"))
        }
        _ => SanOutcome::Fallback(m.to_uci(CastlingMode::Standard).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_start() {
        let pos = BoardPosition::standard();
        assert_eq!(pos.to_fen(), STANDARD_START_FEN);
        assert_eq!(pos.turn(), Side::White);
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(pos.termination(), PositionTermination::default());
    }

    #[test]
    fn fen_round_trip() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
        let pos = BoardPosition::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
        assert_eq!(pos.turn(), Side::Black);
    }

    #[test]
    fn rejects_invalid_fen() {
        assert!(matches!(
            BoardPosition::from_fen("not a fen"),
            Err(RulesError::InvalidFen(_))
        ));
    }

    #[test]
    fn applies_a_legal_move() {
        let pos = BoardPosition::standard();
        let applied = pos.apply_uci("e2e4").unwrap();
        assert_eq!(applied.uci, "e2e4");
        assert_eq!(applied.san, SanOutcome::Derived("e4".to_string()));
        assert_eq!(applied.position.turn(), Side::Black);
    }

    #[test]
    fn rejects_unparseable_notation() {
        let pos = BoardPosition::standard();
        assert!(matches!(
            pos.apply_uci("not-a-move"),
            Err(RulesError::InvalidUci(_))
        ));
    }

    #[test]
    fn rejects_illegal_move() {
        let pos = BoardPosition::standard();
        assert!(matches!(
            pos.apply_uci("e2e5"),
            Err(RulesError::IllegalMove(_))
        ));
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut pos = BoardPosition::standard();
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            pos = pos.apply_uci(uci).unwrap().position;
        }
        let term = pos.termination();
        assert!(term.checkmate);
        assert!(!term.stalemate);
        assert!(pos.legal_moves().is_empty());
    }

    #[test]
    fn mating_san_carries_the_suffix() {
        let pos =
            BoardPosition::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2")
                .unwrap();
        let applied = pos.apply_uci("d8h4").unwrap();
        assert_eq!(applied.san, SanOutcome::Derived("Qh4#".to_string()));
    }

    #[test]
    fn stalemate_position() {
        let pos = BoardPosition::from_fen("8/8/8/8/8/6q1/5k2/7K w - - 0 1").unwrap();
        let term = pos.termination();
        assert!(term.stalemate);
        assert!(!term.checkmate);
        assert!(pos.legal_moves().is_empty());
    }

    #[test]
    fn bare_kings_are_insufficient_material() {
        let pos = BoardPosition::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(pos.termination().insufficient_material);
    }

    #[test]
    fn seventyfive_move_rule_from_halfmove_clock() {
        let pos = BoardPosition::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 150 80").unwrap();
        assert!(pos.termination().seventyfive_moves);
        let fresh = BoardPosition::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 10 80").unwrap();
        assert!(!fresh.termination().seventyfive_moves);
    }

    #[test]
    fn repetition_key_ignores_clocks() {
        let a = BoardPosition::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 0 10").unwrap();
        let b = BoardPosition::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 40 60").unwrap();
        assert_eq!(a.repetition_key(), b.repetition_key());
    }

    #[test]
    fn castling_normalizes_notation() {
        let pos =
            BoardPosition::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let applied = pos.apply_uci("e1g1").unwrap();
        assert_eq!(applied.san, SanOutcome::Derived("O-O".to_string()));
    }

    #[test]
    fn capture_metadata_on_legal_moves() {
        let pos =
            BoardPosition::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2")
                .unwrap();
        let moves = pos.legal_moves();
        let exd5 = moves.iter().find(|m| m.uci == "e4d5").unwrap();
        assert_eq!(exd5.san, "exd5");
        assert_eq!(exd5.capture, Some(Role::Pawn));
    }

    #[test]
    fn promotion_metadata() {
        let pos = BoardPosition::from_fen("8/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        let moves = pos.legal_moves();
        let promote = moves.iter().find(|m| m.uci == "a7a8q").unwrap();
        assert_eq!(promote.promotion, Some(Role::Queen));
    }
}

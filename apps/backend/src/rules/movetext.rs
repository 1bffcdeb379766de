//! Movetext encoding and replay.
//!
//! Persisted history is PGN-shaped: an optional `[SetUp]`/`[FEN]` header
//! pair when the game is anchored somewhere other than the standard start,
//! followed by numbered plies. Replay walks the movetext through pgn-reader
//! and applies each ply against the rules engine; any failure is reported
//! with the offending ply so the caller can fall back to the stored
//! position.

use std::fmt::Write as _;
use std::io::Cursor;
use std::ops::ControlFlow;

use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use thiserror::Error;

use super::position::{BoardPosition, RulesError};

/// Replay failure. The session treats any of these as "history is
/// advisory": the stored position stays authoritative.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("movetext does not parse: {0}")]
    Parse(String),

    #[error("movetext anchor FEN is invalid: {0}")]
    BadAnchor(String),

    #[error("ply {index} ({ply:?}) cannot be replayed: {source}")]
    IllegalPly {
        index: usize,
        ply: String,
        #[source]
        source: RulesError,
    },
}

/// A successfully replayed history.
#[derive(Debug)]
pub struct Replayed {
    /// Position after the final ply.
    pub position: BoardPosition,
    /// Anchor FEN from the movetext headers, if any.
    pub anchor_fen: Option<String>,
    /// The ply tokens, normalized.
    pub sans: Vec<String>,
    /// Repetition keys for the anchor and every position after it.
    pub repetition_keys: Vec<String>,
}

impl Replayed {
    fn empty() -> Self {
        let position = BoardPosition::standard();
        Self {
            repetition_keys: vec![position.repetition_key()],
            anchor_fen: None,
            sans: Vec::new(),
            position,
        }
    }
}

/// Encode a game as movetext.
///
/// `anchor_fen` is emitted as `[SetUp]`/`[FEN]` headers when present; ply
/// numbering starts from the anchor's fullmove counter. A `*` result marker
/// closes the movetext, matching an in-progress game.
pub fn write_game(anchor_fen: Option<&str>, plies: &[String]) -> String {
    let mut out = String::new();
    let (mut move_no, mut white_to_move) = anchor_numbering(anchor_fen);

    if let Some(fen) = anchor_fen {
        out.push_str("[SetUp \"1\"]\n");
        let _ = writeln!(out, "[FEN \"{fen}\"]");
        out.push('\n');
    }

    for (i, ply) in plies.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if white_to_move {
            let _ = write!(out, "{move_no}. ");
        } else if i == 0 {
            let _ = write!(out, "{move_no}... ");
        }
        out.push_str(ply);
        if !white_to_move {
            move_no += 1;
        }
        white_to_move = !white_to_move;
    }

    if !plies.is_empty() {
        out.push(' ');
    }
    out.push('*');
    out
}

/// Replay movetext from its anchor. Empty input is an empty history at the
/// standard start.
pub fn replay(movetext: &str) -> Result<Replayed, ReplayError> {
    if movetext.trim().is_empty() {
        return Ok(Replayed::empty());
    }

    let mut reader = Reader::new(Cursor::new(movetext.as_bytes()));
    let mut visitor = ReplayVisitor::default();
    match reader.read_game(&mut visitor) {
        Ok(Some(())) => {}
        Ok(None) => return Ok(Replayed::empty()),
        Err(e) => return Err(ReplayError::Parse(e.to_string())),
    }

    if let Some(error) = visitor.error.take() {
        return Err(error);
    }
    let position = match visitor.position.take() {
        Some(position) => position,
        None => return Ok(Replayed::empty()),
    };

    Ok(Replayed {
        position,
        anchor_fen: visitor.fen_tag,
        sans: visitor.sans,
        repetition_keys: visitor.keys,
    })
}

/// Ply numbering implied by the anchor: (fullmove counter, white to move).
fn anchor_numbering(anchor_fen: Option<&str>) -> (u32, bool) {
    let Some(fen) = anchor_fen else {
        return (1, true);
    };
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let white_to_move = fields.get(1).copied() != Some("b");
    let move_no = fields
        .get(5)
        .and_then(|f| f.parse::<u32>().ok())
        .unwrap_or(1);
    (move_no, white_to_move)
}

#[derive(Default)]
struct ReplayVisitor {
    fen_tag: Option<String>,
    position: Option<BoardPosition>,
    sans: Vec<String>,
    keys: Vec<String>,
    error: Option<ReplayError>,
}

impl Visitor for ReplayVisitor {
    type Tags = ();
    type Movetext = ();
    type Output = ();

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        if key == b"FEN" {
            self.fen_tag = Some(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        let start = match self.fen_tag.as_deref() {
            Some(fen) => match BoardPosition::from_fen(fen) {
                Ok(position) => position,
                Err(_) => {
                    self.error = Some(ReplayError::BadAnchor(fen.to_string()));
                    return ControlFlow::Break(());
                }
            },
            None => BoardPosition::standard(),
        };
        self.keys.push(start.repetition_key());
        self.position = Some(start);
        ControlFlow::Continue(())
    }

    fn san(&mut self, _: &mut Self::Movetext, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        let Some(position) = self.position.as_ref() else {
            return ControlFlow::Break(());
        };
        match position.play_san(&san_plus.san) {
            Ok(next) => {
                self.keys.push(next.repetition_key());
                self.sans.push(san_plus.to_string());
                self.position = Some(next);
                ControlFlow::Continue(())
            }
            Err(source) => {
                self.error = Some(ReplayError::IllegalPly {
                    index: self.sans.len(),
                    ply: san_plus.to_string(),
                    source,
                });
                ControlFlow::Break(())
            }
        }
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn end_game(&mut self, _: Self::Movetext) -> Self::Output {}
}

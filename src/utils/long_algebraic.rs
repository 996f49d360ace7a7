//! Coordinate move text (`e2e4`, `e7e8q`).
//!
//! Parsing is purely syntactic; whether the move is legal is decided by the
//! engine that receives it.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongAlgebraicMove {
    pub source: Position,
    pub target: Position,
    pub promotion: Option<PieceKind>,
}

pub fn move_to_long_algebraic(source: Position, target: Position, promotion: Option<PieceKind>) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&source.to_string());
    out.push_str(&target.to_string());
    if let Some(kind) = promotion.and_then(promotion_to_char) {
        out.push(kind);
    }
    out
}

pub fn parse_long_algebraic(long_algebraic: &str) -> EngineResult<LongAlgebraicMove> {
    let invalid = || EngineError::InvalidLongAlgebraic(long_algebraic.to_owned());

    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(invalid());
    }

    let source = algebraic_to_position(&text[0..2]).map_err(|_| invalid())?;
    let target = algebraic_to_position(&text[2..4]).map_err(|_| invalid())?;
    let promotion = match text[4..].chars().next() {
        Some(ch) => Some(char_to_promotion(ch).ok_or_else(invalid)?),
        None => None,
    };

    Ok(LongAlgebraicMove {
        source,
        target,
        promotion,
    })
}

fn promotion_to_char(piece_kind: PieceKind) -> Option<char> {
    match piece_kind {
        PieceKind::Knight => Some('n'),
        PieceKind::Bishop => Some('b'),
        PieceKind::Rook => Some('r'),
        PieceKind::Queen => Some('q'),
        _ => None,
    }
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}

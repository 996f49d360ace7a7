//! Best-effort structural parser for ledger entries.
//!
//! Recovers `piece, source, target` from a notated half-move. Castles are
//! recognised by exact text only; result entries and anything else that does
//! not look like a move yield `None`.

use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerMove {
    Castle(CastleSide),
    Move {
        piece: PieceKind,
        source: Position,
        target: Position,
        promotion: Option<PieceKind>,
    },
}

pub fn parse_ledger_entry(entry: &str) -> Option<LedgerMove> {
    match entry {
        "O-O" => return Some(LedgerMove::Castle(CastleSide::KingSide)),
        "O-O-O" => return Some(LedgerMove::Castle(CastleSide::QueenSide)),
        _ => {}
    }

    let mut rest = entry;
    let piece = match rest.chars().next().and_then(PieceKind::from_notation_letter) {
        Some(kind) => {
            rest = &rest[1..];
            kind
        }
        None => PieceKind::Pawn,
    };

    let source = algebraic_to_position(rest.get(0..2)?).ok()?;
    let separator = rest.get(2..3)?;
    if separator != "-" && separator != "x" {
        return None;
    }
    let target = algebraic_to_position(rest.get(3..5)?).ok()?;

    let promotion = rest
        .find('=')
        .and_then(|idx| rest[idx + 1..].chars().next())
        .and_then(PieceKind::from_notation_letter)
        .filter(|kind| kind.is_promotion_target());

    Some(LedgerMove::Move {
        piece,
        source,
        target,
        promotion,
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_ledger_entry, LedgerMove};
    use crate::game_state::chess_types::*;
    use crate::notation::move_notation::{encode_move, MoveFacts};
    use crate::utils::algebraic::algebraic_to_position;

    fn sq(text: &str) -> Position {
        algebraic_to_position(text).expect("square should parse")
    }

    #[test]
    fn encoded_moves_parse_back_to_the_same_squares() {
        let cases = [
            (PieceKind::Pawn, "e2", "e4", false, false),
            (PieceKind::Knight, "g1", "f3", false, false),
            (PieceKind::Bishop, "c4", "f7", true, true),
            (PieceKind::Queen, "d8", "h4", false, true),
            (PieceKind::King, "e1", "e2", false, false),
        ];
        for (piece, from, to, capture, check) in cases {
            let entry = encode_move(&MoveFacts {
                source: sq(from),
                target: sq(to),
                piece,
                is_capture: capture,
                gives_check: check,
                is_checkmate: false,
                is_en_passant: false,
                castle: None,
            });
            assert_eq!(
                parse_ledger_entry(&entry),
                Some(LedgerMove::Move {
                    piece,
                    source: sq(from),
                    target: sq(to),
                    promotion: None,
                }),
                "entry {entry} should parse back"
            );
        }
    }

    #[test]
    fn castles_match_exactly() {
        assert_eq!(
            parse_ledger_entry("O-O"),
            Some(LedgerMove::Castle(CastleSide::KingSide))
        );
        assert_eq!(
            parse_ledger_entry("O-O-O"),
            Some(LedgerMove::Castle(CastleSide::QueenSide))
        );
        assert_eq!(parse_ledger_entry("O-O+"), None);
        assert_eq!(parse_ledger_entry("0-0"), None);
    }

    #[test]
    fn promotion_suffix_is_recovered() {
        assert_eq!(
            parse_ledger_entry("a7xb8=Q+"),
            Some(LedgerMove::Move {
                piece: PieceKind::Pawn,
                source: sq("a7"),
                target: sq("b8"),
                promotion: Some(PieceKind::Queen),
            })
        );
    }

    #[test]
    fn result_entries_and_noise_are_ignored() {
        assert_eq!(parse_ledger_entry("1/2-1/2 {Draw by stalemate}"), None);
        assert_eq!(parse_ledger_entry("0-1 {White resigns}"), None);
        assert_eq!(parse_ledger_entry(""), None);
        assert_eq!(parse_ledger_entry("Ke1"), None);
        assert_eq!(parse_ledger_entry("e2*e4"), None);
    }
}

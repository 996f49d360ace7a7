//! Move notation for the ledger.
//!
//! Entries use long algebraic form with a piece letter:
//! `{piece}{from}{'x' | '-'}{to}{'+'}{'#'}{" e.p."}`, castles are `O-O` and
//! `O-O-O`, and a promotion appends `=Q`/`=R`/`=B`/`=N` to the entry already
//! written for that half-move.

use crate::game_state::chess_types::*;
use crate::game_state::outcome::GameOutcome;

/// Facts about one half-move needed to notate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveFacts {
    pub source: Position,
    pub target: Position,
    pub piece: PieceKind,
    pub is_capture: bool,
    pub gives_check: bool,
    pub is_checkmate: bool,
    pub is_en_passant: bool,
    pub castle: Option<CastleSide>,
}

pub fn encode_move(facts: &MoveFacts) -> String {
    if let Some(side) = facts.castle {
        return side.notation().to_owned();
    }

    let mut out = String::with_capacity(12);
    out.push_str(facts.piece.notation_letter());
    out.push_str(&facts.source.to_string());
    out.push(if facts.is_capture { 'x' } else { '-' });
    out.push_str(&facts.target.to_string());
    push_check_markers(&mut out, facts.gives_check, facts.is_checkmate);
    if facts.is_en_passant {
        out.push_str(" e.p.");
    }
    out
}

pub fn push_check_markers(entry: &mut String, gives_check: bool, is_checkmate: bool) {
    if gives_check {
        entry.push('+');
    }
    if is_checkmate {
        entry.push('#');
    }
}

/// Append `=X` to the entry of the half-move that reached the last rank.
pub fn append_promotion_suffix(entry: &mut String, kind: PieceKind) {
    entry.push('=');
    entry.push_str(kind.notation_letter());
}

/// PGN-style result token followed by the braced reason, e.g.
/// `1/2-1/2 {Draw by stalemate}`. `None` while the game is running.
pub fn terminal_entry(outcome: &GameOutcome) -> Option<String> {
    let result = outcome.result_token()?;
    let reason = outcome.reason_text()?;
    Some(format!("{result} {{{}}}", reason.trim_end_matches('.')))
}

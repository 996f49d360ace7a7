//! Move legality evaluation.
//!
//! `evaluate` answers "may this piece go from `source` to `target`" for the
//! current `GameState`, in this order: resolve the mover, turn check,
//! occupancy of the target, piece geometry, then the king-safety filter. Each
//! stage can only downgrade the verdict.
//!
//! Passing an `acting_piece` switches to hypothetical mode: the piece is
//! imagined on `source`, the turn and king-safety checks are skipped, and
//! castling and en passant are never admitted. Threat scanning uses this mode
//! without touching the board.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_to_board;
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::move_generation::move_effect::{MoveEffect, MoveVerdict};
use crate::moves::king_moves::{castle_side, castle_squares, king_step};
use crate::moves::knight_moves::knight_reaches;
use crate::moves::pawn_moves::{en_passant_victim, pawn_attacks, pawn_push, PawnPush};
use crate::moves::sliding_moves::slider_reaches;

pub fn evaluate(
    game_state: &GameState,
    source: Position,
    target: Position,
    acting_piece: Option<Piece>,
) -> MoveVerdict {
    let hypothetical = acting_piece.is_some();
    let Some(piece) = acting_piece.or_else(|| game_state.board.get(source)) else {
        return MoveVerdict::ILLEGAL;
    };

    if source == target {
        return MoveVerdict::ILLEGAL;
    }
    if !hypothetical && piece.color != game_state.side_to_move {
        return MoveVerdict::ILLEGAL;
    }

    let occupant = game_state.board.get(target);
    let captures = match occupant {
        Some(other) if other.color == piece.color => return MoveVerdict::ILLEGAL,
        Some(_) => true,
        None => false,
    };
    let provisional = if captures {
        MoveEffect::Capture
    } else {
        MoveEffect::Normal
    };

    let effect = match piece.kind {
        PieceKind::Knight => knight_reaches(source, target).then_some(provisional),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            slider_reaches(&game_state.board, piece.kind, source, target).then_some(provisional)
        }
        PieceKind::Pawn => pawn_effect(game_state, piece.color, source, target, captures, hypothetical),
        PieceKind::King => {
            if king_step(source, target) {
                Some(provisional)
            } else if hypothetical {
                None
            } else {
                castle_effect(game_state, piece.color, source, target)
            }
        }
    };

    let Some(effect) = effect else {
        return MoveVerdict::ILLEGAL;
    };
    let mut verdict = MoveVerdict::admissible(effect);
    if hypothetical {
        return verdict;
    }

    // King safety: the mover's own king must not be attacked afterwards.
    let mut scratch = game_state.board.clone();
    apply_to_board(&mut scratch, source, target, effect);
    if is_king_in_check(&scratch, piece.color) {
        return MoveVerdict::ILLEGAL;
    }

    verdict.gives_check = is_king_in_check(&scratch, piece.color.opposite());
    verdict
}

fn pawn_effect(
    game_state: &GameState,
    color: Color,
    source: Position,
    target: Position,
    captures: bool,
    hypothetical: bool,
) -> Option<MoveEffect> {
    let promotes = target.row() == color.promotion_row();

    if pawn_attacks(color, source, target) {
        if captures {
            return Some(if promotes {
                MoveEffect::Promotion { capture: true }
            } else {
                MoveEffect::Capture
            });
        }
        if hypothetical
            || game_state.en_passant_target != Some(target)
            || target.row() != color.en_passant_row()
        {
            return None;
        }
        let captured = en_passant_victim(source, target);
        let victim = game_state.board.get(captured)?;
        return (victim == Piece::new(color.opposite(), PieceKind::Pawn))
            .then_some(MoveEffect::EnPassant { captured });
    }

    match pawn_push(&game_state.board, color, source, target)? {
        PawnPush::Single if promotes => Some(MoveEffect::Promotion { capture: false }),
        PawnPush::Single => Some(MoveEffect::Normal),
        PawnPush::Double { passed } => Some(MoveEffect::DoublePawnPush { passed }),
    }
}

/// Castling preconditions: right still held, rook present on its corner,
/// squares between king and rook empty, and no square on the king's path
/// (origin, transit, destination) attacked.
fn castle_effect(
    game_state: &GameState,
    color: Color,
    source: Position,
    target: Position,
) -> Option<MoveEffect> {
    let side = castle_side(color, source, target)?;
    if !game_state.castling_rights.has(color, side) {
        return None;
    }

    let squares = castle_squares(color, side);
    let board = &game_state.board;
    if board.get(squares.rook_from) != Some(Piece::new(color, PieceKind::Rook)) {
        return None;
    }
    if squares.between.iter().any(|sq| !board.is_empty(*sq)) {
        return None;
    }
    if squares
        .king_path
        .iter()
        .any(|sq| is_square_attacked(board, *sq, color.opposite()))
    {
        return None;
    }

    Some(MoveEffect::Castle {
        side,
        rook_from: squares.rook_from,
        rook_to: squares.rook_to,
    })
}

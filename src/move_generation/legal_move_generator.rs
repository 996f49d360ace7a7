//! Full legal move listing.
//!
//! Candidate targets come from piece geometry; every candidate then goes
//! through `evaluate`, so the listing and single-move legality can never
//! disagree.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_evaluator::evaluate;
use crate::move_generation::move_effect::MoveVerdict;
use crate::moves::king_moves::{castle_squares, king_targets};
use crate::moves::knight_moves::knight_targets;
use crate::moves::sliding_moves::slider_targets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMove {
    pub source: Position,
    pub target: Position,
    pub piece: Piece,
    pub verdict: MoveVerdict,
}

/// Squares worth evaluating for `piece` on `source`. A superset of its
/// legal targets.
pub fn candidate_targets(game_state: &GameState, source: Position, piece: Piece) -> Vec<Position> {
    match piece.kind {
        PieceKind::Knight => knight_targets(source).collect(),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            slider_targets(&game_state.board, piece.kind, source)
        }
        PieceKind::Pawn => {
            let direction = piece.color.pawn_direction();
            [
                (direction, 0),
                (direction * 2, 0),
                (direction, -1),
                (direction, 1),
            ]
            .into_iter()
            .filter_map(|(d_row, d_col)| source.offset(d_row, d_col))
            .collect()
        }
        PieceKind::King => {
            let mut out: Vec<Position> = king_targets(source).collect();
            for side in [CastleSide::KingSide, CastleSide::QueenSide] {
                let squares = castle_squares(piece.color, side);
                if squares.king_from == source {
                    out.push(squares.king_to);
                }
            }
            out
        }
    }
}

/// Legal destinations of the piece on `source`, with their verdicts. Empty
/// when the square is empty or holds a piece of the side not to move.
pub fn legal_targets(game_state: &GameState, source: Position) -> Vec<(Position, MoveVerdict)> {
    let Some(piece) = game_state.board.get(source) else {
        return Vec::new();
    };
    if piece.color != game_state.side_to_move {
        return Vec::new();
    }

    candidate_targets(game_state, source, piece)
        .into_iter()
        .filter_map(|target| {
            let verdict = evaluate(game_state, source, target, None);
            verdict.legal.then_some((target, verdict))
        })
        .collect()
}

/// Every legal move of the side to move. Promotions appear once; the piece
/// choice is made separately.
pub fn legal_moves(game_state: &GameState) -> Vec<LegalMove> {
    let mut out = Vec::with_capacity(64);
    for (source, piece) in game_state.board.pieces_of(game_state.side_to_move) {
        for (target, verdict) in legal_targets(game_state, source) {
            out.push(LegalMove {
                source,
                target,
                piece,
                verdict,
            });
        }
    }
    out
}

pub fn has_legal_move(game_state: &GameState) -> bool {
    game_state
        .board
        .pieces_of(game_state.side_to_move)
        .any(|(source, piece)| {
            candidate_targets(game_state, source, piece)
                .into_iter()
                .any(|target| evaluate(game_state, source, target, None).legal)
        })
}

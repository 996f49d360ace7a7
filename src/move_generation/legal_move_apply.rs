use crate::errors::{EngineError, EngineResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::move_effect::MoveEffect;

/// Apply an evaluated move to a copy of `game_state`.
///
/// `promotion` replaces the pawn on arrival for `MoveEffect::Promotion`; with
/// `None` the pawn stays on the last rank until the caller promotes it.
pub fn apply_move(
    game_state: &GameState,
    source: Position,
    target: Position,
    effect: MoveEffect,
    promotion: Option<PieceKind>,
) -> EngineResult<GameState> {
    let moved = game_state
        .board
        .get(source)
        .ok_or_else(|| EngineError::IllegalMove(format!("no piece on {source}")))?;

    let mut next = game_state.clone();
    apply_to_board(&mut next.board, source, target, effect);

    if let (MoveEffect::Promotion { .. }, Some(kind)) = (effect, promotion) {
        next.board.set(target, Some(Piece::new(moved.color, kind)));
    }

    update_castling_rights(&mut next.castling_rights, moved, source, target);

    next.en_passant_target = match effect {
        MoveEffect::DoublePawnPush { passed } => Some(passed),
        _ => None,
    };

    if moved.kind == PieceKind::Pawn || effect.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moved.color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = moved.color.opposite();
    Ok(next)
}

/// Move the piece and carry out the auxiliary effect (rook relocation,
/// en-passant removal) on `board` only. Used directly by king-safety
/// simulation.
pub fn apply_to_board(board: &mut Board, source: Position, target: Position, effect: MoveEffect) {
    let moved = board.take(source);
    board.set(target, moved);

    match effect {
        MoveEffect::EnPassant { captured } => {
            board.set(captured, None);
        }
        MoveEffect::Castle {
            rook_from, rook_to, ..
        } => {
            let rook = board.take(rook_from);
            board.set(rook_to, rook);
        }
        _ => {}
    }
}

/// Castling right tied to a rook corner.
pub fn corner_right(square: Position) -> Option<(Color, CastleSide)> {
    match (square.row(), square.col()) {
        (7, 0) => Some((Color::White, CastleSide::QueenSide)),
        (7, 7) => Some((Color::White, CastleSide::KingSide)),
        (0, 0) => Some((Color::Black, CastleSide::QueenSide)),
        (0, 7) => Some((Color::Black, CastleSide::KingSide)),
        _ => None,
    }
}

fn update_castling_rights(
    rights: &mut CastlingRights,
    moved: Piece,
    source: Position,
    target: Position,
) {
    if moved.kind == PieceKind::King {
        rights.revoke_all(moved.color);
    }

    // Leaving a corner, or capturing onto one, ends that corner's right.
    for square in [source, target] {
        if let Some((color, side)) = corner_right(square) {
            rights.revoke(color, side);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).expect("test square should be on board")
    }

    #[test]
    fn double_step_opens_en_passant_window_and_flips_turn() {
        let game = GameState::new_game();
        let next = apply_move(
            &game,
            pos(6, 4),
            pos(4, 4),
            MoveEffect::DoublePawnPush { passed: pos(5, 4) },
            None,
        )
        .expect("e2-e4 should apply");
        assert_eq!(next.en_passant_target, Some(pos(5, 4)));
        assert_eq!(next.side_to_move, Color::Black);
        assert_eq!(next.halfmove_clock, 0);
    }

    #[test]
    fn castle_moves_the_rook_and_revokes_rights() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 1")
            .expect("FEN should parse");
        let next = apply_move(
            &game,
            pos(7, 4),
            pos(7, 6),
            MoveEffect::Castle {
                side: CastleSide::KingSide,
                rook_from: pos(7, 7),
                rook_to: pos(7, 5),
            },
            None,
        )
        .expect("castle should apply");
        assert_eq!(
            next.board.get(pos(7, 5)),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert!(next.board.is_empty(pos(7, 7)));
        assert!(!next.castling_rights.has(Color::White, CastleSide::KingSide));
        assert!(!next.castling_rights.has(Color::White, CastleSide::QueenSide));
        assert!(next.castling_rights.has(Color::Black, CastleSide::KingSide));
        assert_eq!(next.halfmove_clock, 4);
    }

    #[test]
    fn capturing_a_corner_rook_revokes_the_opponent_right() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let next = apply_move(&game, pos(7, 0), pos(0, 0), MoveEffect::Capture, None)
            .expect("Rxa8 should apply");
        assert!(!next.castling_rights.has(Color::Black, CastleSide::QueenSide));
        assert!(!next.castling_rights.has(Color::White, CastleSide::QueenSide));
        assert!(next.castling_rights.has(Color::Black, CastleSide::KingSide));
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let game = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1")
            .expect("FEN should parse");
        let next = apply_move(
            &game,
            pos(3, 4),
            pos(2, 3),
            MoveEffect::EnPassant { captured: pos(3, 3) },
            None,
        )
        .expect("exd6 should apply");
        assert!(next.board.is_empty(pos(3, 3)));
        assert_eq!(
            next.board.get(pos(2, 3)),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn promotion_choice_replaces_the_pawn() {
        let game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let next = apply_move(
            &game,
            pos(1, 0),
            pos(0, 0),
            MoveEffect::Promotion { capture: false },
            Some(PieceKind::Knight),
        )
        .expect("a8=N should apply");
        assert_eq!(
            next.board.get(pos(0, 0)),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
    }

    #[test]
    fn empty_source_square_is_an_error() {
        let game = GameState::new_game();
        assert!(apply_move(&game, pos(4, 4), pos(3, 4), MoveEffect::Normal, None).is_err());
    }
}

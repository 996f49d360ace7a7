//! Attacked-square sweep used by king safety, castling and check detection.
//!
//! Attack geometry ignores what stands on the target square and never
//! consults king safety, so it cannot recurse.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::king_moves::king_step;
use crate::moves::knight_moves::knight_reaches;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::sliding_moves::slider_reaches;

/// Whether `piece` standing on `source` attacks `target`.
pub fn piece_attacks(board: &Board, piece: Piece, source: Position, target: Position) -> bool {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, source, target),
        PieceKind::Knight => knight_reaches(source, target),
        PieceKind::King => king_step(source, target),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            slider_reaches(board, piece.kind, source, target)
        }
    }
}

pub fn is_square_attacked(board: &Board, square: Position, attacker_color: Color) -> bool {
    board
        .pieces_of(attacker_color)
        .any(|(source, piece)| piece_attacks(board, piece, source, square))
}

pub fn attackers_to_square(
    board: &Board,
    square: Position,
    attacker_color: Color,
) -> Vec<(Position, Piece)> {
    board
        .pieces_of(attacker_color)
        .filter(|(source, piece)| piece_attacks(board, *piece, *source, square))
        .collect()
}

/// Whether `color`'s king is attacked. A board without that king reports
/// `false`.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = board.king_position(color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).expect("test square should be on board")
    }

    #[test]
    fn starting_position_has_no_checks() {
        let game = GameState::new_game();
        assert!(!is_king_in_check(&game.board, Color::White));
        assert!(!is_king_in_check(&game.board, Color::Black));
    }

    #[test]
    fn pawn_attacks_empty_diagonal_square() {
        let game = GameState::new_game();
        // e2 pawn covers d3 and f3 even though both are empty.
        assert!(is_square_attacked(&game.board, pos(5, 3), Color::White));
        assert!(is_square_attacked(&game.board, pos(5, 5), Color::White));
        assert!(!is_square_attacked(&game.board, pos(4, 4), Color::White));
    }

    #[test]
    fn rook_check_is_blocked_by_interposed_piece() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/8/4RK2 w - - 0 1").expect("FEN should parse");
        assert!(is_king_in_check(&game.board, Color::Black));
        game.board
            .set(pos(3, 4), Some(Piece::new(Color::Black, PieceKind::Knight)));
        assert!(!is_king_in_check(&game.board, Color::Black));
    }

    #[test]
    fn attackers_lists_every_checking_piece() {
        let game =
            GameState::from_fen("4k3/8/3N4/8/8/8/8/4RK2 b - - 0 1").expect("FEN should parse");
        let attackers = attackers_to_square(&game.board, pos(0, 4), Color::White);
        assert_eq!(attackers.len(), 2);
    }

    #[test]
    fn missing_king_is_never_in_check() {
        let game = GameState::from_fen("8/8/8/8/8/8/8/4RK2 w - - 0 1").expect("FEN should parse");
        assert!(!is_king_in_check(&game.board, Color::Black));
    }
}

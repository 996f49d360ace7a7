use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Position};

/// Shape of a non-capturing pawn advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PawnPush {
    Single,
    /// Double step from the home rank; carries the square passed over.
    Double { passed: Position },
}

/// Diagonal forward step, the only way a pawn attacks.
#[inline]
pub fn pawn_attacks(color: Color, source: Position, target: Position) -> bool {
    let d_row = target.row() as i8 - source.row() as i8;
    d_row == color.pawn_direction() && source.col().abs_diff(target.col()) == 1
}

/// Forward advance onto empty squares: one step, or two from the start rank
/// with both squares empty. Straight-ahead moves never capture.
pub fn pawn_push(board: &Board, color: Color, source: Position, target: Position) -> Option<PawnPush> {
    if source.col() != target.col() || !board.is_empty(target) {
        return None;
    }

    let direction = color.pawn_direction();
    let one_step = source.offset(direction, 0)?;
    if one_step == target {
        return Some(PawnPush::Single);
    }

    if source.row() != color.pawn_start_row() || !board.is_empty(one_step) {
        return None;
    }
    let two_step = one_step.offset(direction, 0)?;
    (two_step == target).then_some(PawnPush::Double { passed: one_step })
}

/// Square holding the pawn removed by an en-passant capture landing on
/// `target`: same row as the capturer, same column as the target.
#[inline]
pub fn en_passant_victim(source: Position, target: Position) -> Position {
    Position::new_unchecked(source.row(), target.col())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Piece, PieceKind};

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).expect("test square should be on board")
    }

    #[test]
    fn white_pawn_double_step_from_home_rank() {
        let board = Board::starting();
        assert_eq!(
            pawn_push(&board, Color::White, pos(6, 4), pos(4, 4)),
            Some(PawnPush::Double { passed: pos(5, 4) })
        );
        assert_eq!(
            pawn_push(&board, Color::White, pos(6, 4), pos(5, 4)),
            Some(PawnPush::Single)
        );
    }

    #[test]
    fn double_step_blocked_by_intervening_piece() {
        let mut board = Board::starting();
        board.set(pos(5, 4), Some(Piece::new(Color::Black, PieceKind::Knight)));
        assert_eq!(pawn_push(&board, Color::White, pos(6, 4), pos(4, 4)), None);
    }

    #[test]
    fn pawns_never_move_backwards() {
        let board = Board::empty();
        assert_eq!(pawn_push(&board, Color::Black, pos(3, 4), pos(2, 4)), None);
        assert!(!pawn_attacks(Color::Black, pos(3, 4), pos(2, 5)));
        assert!(pawn_attacks(Color::Black, pos(3, 4), pos(4, 5)));
    }
}

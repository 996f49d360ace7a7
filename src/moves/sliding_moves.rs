//! Ray geometry shared by bishops, rooks and queens.
//!
//! A slider reaches a target when the move matches its line shape and no
//! square strictly between source and target is occupied.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceKind, Position};

/// Rays never need more than seven steps on an 8×8 board; the cap keeps a
/// malformed step from looping.
const MAX_RAY_STEPS: usize = 8;

pub const DIAGONAL_STEPS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ORTHOGONAL_STEPS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    Diagonal,
    Orthogonal,
    Either,
}

impl LineShape {
    pub const fn for_kind(kind: PieceKind) -> Option<Self> {
        match kind {
            PieceKind::Bishop => Some(LineShape::Diagonal),
            PieceKind::Rook => Some(LineShape::Orthogonal),
            PieceKind::Queen => Some(LineShape::Either),
            _ => None,
        }
    }

    fn allows(self, step: (i8, i8)) -> bool {
        let diagonal = step.0 != 0 && step.1 != 0;
        match self {
            LineShape::Diagonal => diagonal,
            LineShape::Orthogonal => !diagonal,
            LineShape::Either => true,
        }
    }
}

/// Unit step from `source` toward `target` when both lie on one rank, file or
/// diagonal.
pub fn line_step(source: Position, target: Position) -> Option<(i8, i8)> {
    if source == target {
        return None;
    }
    let d_row = target.row() as i8 - source.row() as i8;
    let d_col = target.col() as i8 - source.col() as i8;
    let aligned = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
    aligned.then(|| (d_row.signum(), d_col.signum()))
}

/// True when every square strictly between the two endpoints is empty.
/// Endpoints that are not aligned are never clear.
pub fn path_is_clear(board: &Board, source: Position, target: Position) -> bool {
    let Some((d_row, d_col)) = line_step(source, target) else {
        return false;
    };

    let mut current = source;
    for _ in 0..MAX_RAY_STEPS {
        let Some(next) = current.offset(d_row, d_col) else {
            return false;
        };
        if next == target {
            return true;
        }
        if !board.is_empty(next) {
            return false;
        }
        current = next;
    }
    false
}

pub fn slider_reaches(board: &Board, kind: PieceKind, source: Position, target: Position) -> bool {
    let Some(shape) = LineShape::for_kind(kind) else {
        return false;
    };
    match line_step(source, target) {
        Some(step) if shape.allows(step) => path_is_clear(board, source, target),
        _ => false,
    }
}

/// Squares a slider reaches from `source`, stopping at (and including) the
/// first occupied square on each ray.
pub fn slider_targets(board: &Board, kind: PieceKind, source: Position) -> Vec<Position> {
    let steps: &[(i8, i8)] = match LineShape::for_kind(kind) {
        Some(LineShape::Diagonal) => &DIAGONAL_STEPS,
        Some(LineShape::Orthogonal) => &ORTHOGONAL_STEPS,
        Some(LineShape::Either) => &[
            (-1, -1),
            (-1, 1),
            (1, -1),
            (1, 1),
            (-1, 0),
            (1, 0),
            (0, -1),
            (0, 1),
        ],
        None => return Vec::new(),
    };

    let mut out = Vec::with_capacity(27);
    for &(d_row, d_col) in steps {
        let mut current = source;
        while let Some(next) = current.offset(d_row, d_col) {
            out.push(next);
            if !board.is_empty(next) {
                break;
            }
            current = next;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, Piece};

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).expect("test square should be on board")
    }

    #[test]
    fn rook_from_d4_on_empty_board_has_fourteen_targets() {
        let board = Board::empty();
        assert_eq!(slider_targets(&board, PieceKind::Rook, pos(4, 3)).len(), 14);
        assert_eq!(slider_targets(&board, PieceKind::Queen, pos(4, 3)).len(), 27);
    }

    #[test]
    fn blocker_stops_the_ray() {
        let mut board = Board::empty();
        board.set(pos(4, 0), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        let a1 = pos(7, 0);
        assert!(slider_reaches(&board, PieceKind::Rook, a1, pos(4, 0)));
        assert!(!slider_reaches(&board, PieceKind::Rook, a1, pos(3, 0)));
    }

    #[test]
    fn bishop_cannot_move_orthogonally() {
        let board = Board::empty();
        assert!(!slider_reaches(&board, PieceKind::Bishop, pos(4, 3), pos(4, 6)));
        assert!(slider_reaches(&board, PieceKind::Bishop, pos(4, 3), pos(1, 6)));
    }

    #[test]
    fn unaligned_squares_have_no_line_step() {
        assert_eq!(line_step(pos(4, 3), pos(2, 4)), None);
        assert_eq!(line_step(pos(4, 3), pos(4, 3)), None);
    }
}

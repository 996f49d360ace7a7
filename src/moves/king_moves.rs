//! King geometry, including the castling shape.

use crate::game_state::chess_types::{CastleSide, Color, Position};

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// King origin column on the home rank.
pub const KING_ORIGIN_COL: u8 = 4;

#[inline]
pub fn king_step(source: Position, target: Position) -> bool {
    source != target
        && source.row().abs_diff(target.row()) <= 1
        && source.col().abs_diff(target.col()) <= 1
}

pub fn king_targets(source: Position) -> impl Iterator<Item = Position> {
    KING_OFFSETS
        .into_iter()
        .filter_map(move |(d_row, d_col)| source.offset(d_row, d_col))
}

/// Side of a castle when the move has castling shape for `color`: king on its
/// origin square moving two columns along the home rank.
pub fn castle_side(color: Color, source: Position, target: Position) -> Option<CastleSide> {
    let home = color.home_row();
    if source.row() != home || target.row() != home || source.col() != KING_ORIGIN_COL {
        return None;
    }
    match target.col() {
        6 => Some(CastleSide::KingSide),
        2 => Some(CastleSide::QueenSide),
        _ => None,
    }
}

/// Squares of a castle for `color` and `side`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastleSquares {
    pub king_from: Position,
    pub king_to: Position,
    pub rook_from: Position,
    pub rook_to: Position,
    /// Squares strictly between king and rook; all must be empty.
    pub between: Vec<Position>,
    /// Origin, transit and destination of the king; none may be attacked.
    pub king_path: Vec<Position>,
}

pub fn castle_squares(color: Color, side: CastleSide) -> CastleSquares {
    let row = color.home_row();
    let at = |col: u8| Position::new_unchecked(row, col);

    let rook_col = side.rook_origin_col();
    let (lo, hi) = if rook_col < KING_ORIGIN_COL {
        (rook_col + 1, KING_ORIGIN_COL)
    } else {
        (KING_ORIGIN_COL + 1, rook_col)
    };

    let king_to_col = side.king_target_col();
    let (path_lo, path_hi) = if king_to_col < KING_ORIGIN_COL {
        (king_to_col, KING_ORIGIN_COL)
    } else {
        (KING_ORIGIN_COL, king_to_col)
    };

    CastleSquares {
        king_from: at(KING_ORIGIN_COL),
        king_to: at(king_to_col),
        rook_from: at(rook_col),
        rook_to: at(side.rook_target_col()),
        between: (lo..hi).map(at).collect(),
        king_path: (path_lo..=path_hi).map(at).collect(),
    }
}

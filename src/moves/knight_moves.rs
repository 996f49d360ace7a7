//! Knight geometry.

use crate::game_state::chess_types::Position;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// True when `(|Δrow|, |Δcol|)` is a permutation of `(1, 2)`.
#[inline]
pub fn knight_reaches(source: Position, target: Position) -> bool {
    let d_row = source.row().abs_diff(target.row());
    let d_col = source.col().abs_diff(target.col());
    matches!((d_row, d_col), (1, 2) | (2, 1))
}

pub fn knight_targets(source: Position) -> impl Iterator<Item = Position> {
    KNIGHT_OFFSETS
        .into_iter()
        .filter_map(move |(d_row, d_col)| source.offset(d_row, d_col))
}

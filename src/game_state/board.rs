//! The 8×8 occupancy grid.
//!
//! Squares are stored top-down from Black's back rank, so `squares[0]` is the
//! eighth rank. Each square holds at most one `Piece`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard initial setup.
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.squares[color.home_row() as usize][col] = Some(Piece::new(color, *kind));
                board.squares[color.pawn_start_row() as usize][col] =
                    Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, position: Position) -> Option<Piece> {
        self.squares[position.row() as usize][position.col() as usize]
    }

    #[inline]
    pub fn set(&mut self, position: Position, occupant: Option<Piece>) {
        self.squares[position.row() as usize][position.col() as usize] = occupant;
    }

    #[inline]
    pub fn take(&mut self, position: Position) -> Option<Piece> {
        self.squares[position.row() as usize][position.col() as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, position: Position) -> bool {
        self.get(position).is_none()
    }

    /// All occupied squares, row 0 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// First king of `color` found in storage order. `None` on a corrupted
    /// board without a king.
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(pos, _)| pos)
    }

    /// Sorted non-king material of one side.
    pub fn minor_material(&self, color: Color) -> Vec<PieceKind> {
        let mut kinds: Vec<PieceKind> = self
            .pieces_of(color)
            .map(|(_, piece)| piece.kind)
            .filter(|kind| *kind != PieceKind::King)
            .collect();
        kinds.sort();
        kinds
    }
}

//! Core value types shared by every rules component.
//!
//! Coordinates follow the board's storage order: row 0 is the eighth rank and
//! row 7 the first rank, column 0 is the a-file.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row holding this side's king and rooks at the start of the game.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Row of the en-passant target square when this side is the capturer.
    #[inline]
    pub const fn en_passant_row(self) -> u8 {
        match self {
            Color::White => 2,
            Color::Black => 5,
        }
    }

    /// Row delta of a forward pawn step.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

/// Piece kind (color is carried separately by `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Letter used in move notation; pawns have none.
    pub const fn notation_letter(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }

    pub fn from_notation_letter(ch: char) -> Option<Self> {
        match ch {
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Material value in pawn units. Only used for arrow styling.
    pub const fn material_value(self) -> u8 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 10,
        }
    }

    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

/// An immutable occupant of a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

/// A board coordinate. Construction is range-checked, so every live
/// `Position` is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPosition"))]
pub struct Position {
    row: u8,
    col: u8,
}

/// Unchecked wire form of a `Position`; snapshots go back through `Position::new`.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawPosition {
    row: u8,
    col: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPosition> for Position {
    type Error = crate::errors::EngineError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.row, raw.col).ok_or_else(|| {
            crate::errors::EngineError::InvalidSquare(format!("row {} col {}", raw.row, raw.col))
        })
    }
}

impl Position {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Only for coordinates already known to be in range (tables, loops).
    #[inline]
    pub(crate) const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Square index `0..64` in row-major storage order.
    #[inline]
    pub const fn index(self) -> usize {
        (self.row as usize) * 8 + self.col as usize
    }

    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn file_char(self) -> char {
        char::from(b'a' + self.col)
    }

    #[inline]
    pub fn rank_char(self) -> char {
        char::from(b'0' + (8 - self.row))
    }

    /// Iterate all 64 squares, row 0 first.
    pub fn all() -> impl Iterator<Item = Position> {
        (0u8..64).map(|i| Position::new_unchecked(i / 8, i % 8))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            CastleSide::KingSide => 0,
            CastleSide::QueenSide => 1,
        }
    }

    pub const fn rook_origin_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    pub const fn king_target_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }

    pub const fn rook_target_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }

    pub const fn notation(self) -> &'static str {
        match self {
            CastleSide::KingSide => "O-O",
            CastleSide::QueenSide => "O-O-O",
        }
    }
}

/// Per-color, per-side castling eligibility. A right, once revoked, never
/// comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights {
    rights: [[bool; 2]; 2],
}

impl CastlingRights {
    pub const fn all() -> Self {
        Self {
            rights: [[true; 2]; 2],
        }
    }

    pub const fn none() -> Self {
        Self {
            rights: [[false; 2]; 2],
        }
    }

    #[inline]
    pub const fn has(&self, color: Color, side: CastleSide) -> bool {
        self.rights[color.index()][side.index()]
    }

    #[inline]
    pub fn grant(&mut self, color: Color, side: CastleSide) {
        self.rights[color.index()][side.index()] = true;
    }

    #[inline]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.rights[color.index()][side.index()] = false;
    }

    #[inline]
    pub fn revoke_all(&mut self, color: Color) {
        self.rights[color.index()] = [false; 2];
    }

    /// Four-bit packing (`K Q k q` from low to high) used for hashing.
    pub fn bits(&self) -> u8 {
        let mut out = 0u8;
        for (shift, (color, side)) in [
            (Color::White, CastleSide::KingSide),
            (Color::White, CastleSide::QueenSide),
            (Color::Black, CastleSide::KingSide),
            (Color::Black, CastleSide::QueenSide),
        ]
        .into_iter()
        .enumerate()
        {
            if self.has(color, side) {
                out |= 1 << shift;
            }
        }
        out
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_rejects_out_of_range_coordinates() {
        assert!(Position::new(8, 0).is_none());
        assert!(Position::new(0, 8).is_none());
        assert!(Position::new(7, 7).is_some());
    }

    #[test]
    fn row_zero_is_the_eighth_rank() {
        let a8 = Position::new(0, 0).expect("a8 should be on board");
        let h1 = Position::new(7, 7).expect("h1 should be on board");
        assert_eq!(a8.to_string(), "a8");
        assert_eq!(h1.to_string(), "h1");
    }

    #[test]
    fn offset_stops_at_board_edge() {
        let h1 = Position::new(7, 7).expect("h1 should be on board");
        assert!(h1.offset(1, 0).is_none());
        assert_eq!(h1.offset(-1, -1), Position::new(6, 6));
    }

    #[test]
    fn castling_rights_bits_track_revocations() {
        let mut rights = CastlingRights::all();
        assert_eq!(rights.bits(), 0b1111);
        rights.revoke(Color::White, CastleSide::QueenSide);
        assert_eq!(rights.bits(), 0b1101);
        rights.revoke_all(Color::Black);
        assert_eq!(rights.bits(), 0b0001);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn position_deserialization_is_range_checked() {
        let e4: Position = serde_json::from_str(r#"{"row":4,"col":4}"#).expect("e4 should deserialize");
        assert_eq!(e4.to_string(), "e4");
        assert!(serde_json::from_str::<Position>(r#"{"row":9,"col":12}"#).is_err());
        assert!(serde_json::from_str::<Position>(r#"{"row":0,"col":8}"#).is_err());
    }
}

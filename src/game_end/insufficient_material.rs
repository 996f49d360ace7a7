//! Insufficient-material policy.
//!
//! Only a fixed table of material signatures ends the game. Anything not in
//! the table counts as sufficient, however sparse: a lone king and bishop
//! against a bare king plays on.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind};

use PieceKind::{Bishop, Knight};

/// Non-king material pairs that are drawn, either side holding either half.
const DRAWN_SIGNATURES: [(&[PieceKind], &[PieceKind]); 5] = [
    (&[], &[]),
    (&[Knight], &[]),
    (&[Bishop], &[Knight]),
    (&[Knight, Knight], &[]),
    (&[Knight], &[Knight]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MaterialPolicy {
    #[default]
    EnumeratedSignatures,
}

impl MaterialPolicy {
    pub fn is_insufficient(self, board: &Board) -> bool {
        match self {
            MaterialPolicy::EnumeratedSignatures => enumerated_signature_is_drawn(
                &board.minor_material(Color::White),
                &board.minor_material(Color::Black),
            ),
        }
    }
}

/// `white` and `black` are sorted non-king material lists.
pub fn enumerated_signature_is_drawn(white: &[PieceKind], black: &[PieceKind]) -> bool {
    DRAWN_SIGNATURES
        .iter()
        .any(|(a, b)| (*a == white && *b == black) || (*a == black && *b == white))
}

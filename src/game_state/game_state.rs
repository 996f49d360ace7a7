//! Position snapshot consumed by the legality evaluator.
//!
//! `GameState` holds everything the move rules need to decide legality: the
//! board, the side to move, castling rights, the en-passant window and the
//! move clocks. It is cheap to clone, so simulations work on scratch copies
//! and never touch the live game.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::EngineResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,

    /// Square an enemy pawn just passed over with a double step. Only set for
    /// the single half-move right after that step.
    pub en_passant_target: Option<Position>,

    /// Consecutive half-moves with neither a pawn move nor a capture.
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn new_game() -> Self {
        Self {
            board: Board::starting(),
            castling_rights: CastlingRights::all(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }
}

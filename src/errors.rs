//! Crate-wide error type.
//!
//! Illegal moves are not errors: `GameEngine::propose_move` answers them with
//! `false`. `EngineError` covers malformed external input (square text, FEN,
//! long-algebraic moves) and API misuse reported by the `try_*` entry points.

use crate::game_state::chess_types::PieceKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Square text outside `a1..h8`.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// FEN string that could not be parsed.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Long-algebraic move text that could not be parsed.
    #[error("invalid long algebraic move: {0}")]
    InvalidLongAlgebraic(String),

    /// PGN text that could not be parsed.
    #[error("invalid PGN: {0}")]
    InvalidPgn(String),

    /// A well-formed move that the rules reject.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("no promotion is pending")]
    NoPendingPromotion,

    #[error("a pawn cannot promote to {0:?}")]
    InvalidPromotionPiece(PieceKind),

    #[error("a promotion must be chosen before the next move")]
    PromotionPending,

    #[error("the game is already over")]
    GameOver,

    #[error("no draw offer is pending")]
    NoPendingDrawOffer,

    #[error("no draw can be claimed in this position")]
    NoClaimableDraw,
}

pub type EngineResult<T> = Result<T, EngineError>;

//! Result types of the legality evaluator.
//!
//! A `MoveVerdict` is returned by value and consumed by the commit step, so
//! the side effects of a special move (rook relocation, captured pawn removal,
//! pending promotion) never live in ambient state.

use crate::game_state::chess_types::{CastleSide, Position};

/// Board side effects of an admissible move beyond moving the piece itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveEffect {
    #[default]
    Normal,
    Capture,
    /// Pawn double step; `passed` opens the en-passant window.
    DoublePawnPush { passed: Position },
    /// The captured pawn stands on `captured`, not on the target square.
    EnPassant { captured: Position },
    Castle {
        side: CastleSide,
        rook_from: Position,
        rook_to: Position,
    },
    /// Pawn reaching the last rank; the new piece is chosen afterwards.
    Promotion { capture: bool },
}

impl MoveEffect {
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            MoveEffect::Capture
                | MoveEffect::EnPassant { .. }
                | MoveEffect::Promotion { capture: true }
        )
    }

    pub const fn castle_side(self) -> Option<CastleSide> {
        match self {
            MoveEffect::Castle { side, .. } => Some(side),
            _ => None,
        }
    }
}

/// Outcome of evaluating one candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveVerdict {
    pub legal: bool,
    pub is_capture: bool,
    pub gives_check: bool,
    pub effect: MoveEffect,
}

impl MoveVerdict {
    pub const ILLEGAL: MoveVerdict = MoveVerdict {
        legal: false,
        is_capture: false,
        gives_check: false,
        effect: MoveEffect::Normal,
    };

    pub(crate) const fn admissible(effect: MoveEffect) -> Self {
        MoveVerdict {
            legal: true,
            is_capture: effect.is_capture(),
            gives_check: false,
            effect,
        }
    }
}

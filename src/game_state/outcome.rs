//! Game outcome and draw-offer state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::Color;

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EndReason {
    Checkmate,
    Stalemate,
    FivefoldRepetition,
    SeventyFiveMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoveRule,
    Agreement,
    Resignation,
}

impl EndReason {
    /// Draw reasons read the same regardless of who moved last.
    pub const fn draw_text(self) -> Option<&'static str> {
        match self {
            EndReason::Stalemate => Some("Draw by stalemate."),
            EndReason::FivefoldRepetition => Some("Draw by fivefold repetition."),
            EndReason::SeventyFiveMoveRule => Some("Draw by seventy-five-move rule."),
            EndReason::InsufficientMaterial => Some("Draw by insufficient material."),
            EndReason::ThreefoldRepetition => Some("Draw by threefold repetition."),
            EndReason::FiftyMoveRule => Some("Draw by fifty-move rule."),
            EndReason::Agreement => Some("Draw by agreement."),
            EndReason::Checkmate | EndReason::Resignation => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameOutcome {
    #[default]
    InProgress,
    Over {
        reason: EndReason,
        /// `None` for every draw.
        winner: Option<Color>,
    },
}

impl GameOutcome {
    pub const fn draw(reason: EndReason) -> Self {
        GameOutcome::Over {
            reason,
            winner: None,
        }
    }

    pub const fn win(reason: EndReason, winner: Color) -> Self {
        GameOutcome::Over {
            reason,
            winner: Some(winner),
        }
    }

    #[inline]
    pub const fn is_over(&self) -> bool {
        matches!(self, GameOutcome::Over { .. })
    }

    pub const fn reason(&self) -> Option<EndReason> {
        match self {
            GameOutcome::InProgress => None,
            GameOutcome::Over { reason, .. } => Some(*reason),
        }
    }

    pub const fn winner(&self) -> Option<Color> {
        match self {
            GameOutcome::InProgress => None,
            GameOutcome::Over { winner, .. } => *winner,
        }
    }

    /// End-of-game banner text, e.g. `Draw by stalemate.` or `White resigns.`
    pub fn reason_text(&self) -> Option<String> {
        let GameOutcome::Over { reason, winner } = *self else {
            return None;
        };
        if let Some(text) = reason.draw_text() {
            return Some(text.to_owned());
        }
        let winner = winner?;
        Some(match reason {
            EndReason::Resignation => format!("{} resigns.", winner.opposite().name()),
            _ => format!("{} wins by checkmate.", winner.name()),
        })
    }

    /// PGN result token: `1-0`, `0-1`, `1/2-1/2`, or `*` while running.
    pub const fn pgn_result(&self) -> &'static str {
        match self {
            GameOutcome::InProgress => "*",
            GameOutcome::Over { winner: None, .. } => "1/2-1/2",
            GameOutcome::Over {
                winner: Some(Color::White),
                ..
            } => "1-0",
            GameOutcome::Over {
                winner: Some(Color::Black),
                ..
            } => "0-1",
        }
    }

    pub const fn result_token(&self) -> Option<&'static str> {
        if self.is_over() {
            Some(self.pgn_result())
        } else {
            None
        }
    }
}

/// An open draw offer. Only the other side may answer it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PendingDrawOffer {
    pub offered_by: Color,
}

impl PendingDrawOffer {
    #[inline]
    pub const fn responder(&self) -> Color {
        self.offered_by.opposite()
    }
}

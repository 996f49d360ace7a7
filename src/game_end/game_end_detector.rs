//! Game-end detection after a committed move.
//!
//! Automatic endings are checked in priority order, first match wins:
//! checkmate, stalemate, fivefold repetition, seventy-five-move rule,
//! insufficient material. Threefold repetition and the fifty-move rule are
//! only ever claimable.

use crate::game_state::chess_rules::EngineConfig;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::game_state::outcome::{EndReason, GameOutcome};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_legal_move;

/// `repetition_count` is the occurrence count of the current position.
pub fn detect_game_end(game_state: &GameState, repetition_count: u32, config: &EngineConfig) -> GameOutcome {
    let to_move = game_state.side_to_move;

    if !has_legal_move(game_state) {
        return if is_king_in_check(&game_state.board, to_move) {
            GameOutcome::win(EndReason::Checkmate, to_move.opposite())
        } else {
            GameOutcome::draw(EndReason::Stalemate)
        };
    }

    if repetition_count >= config.automatic_repetition_count {
        return GameOutcome::draw(EndReason::FivefoldRepetition);
    }
    if game_state.halfmove_clock >= config.automatic_halfmove_limit {
        return GameOutcome::draw(EndReason::SeventyFiveMoveRule);
    }
    if config.material_policy.is_insufficient(&game_state.board) {
        return GameOutcome::draw(EndReason::InsufficientMaterial);
    }

    GameOutcome::InProgress
}

/// Draw the side to move could claim now. Repetition wins the tie.
pub fn claimable_draw(game_state: &GameState, repetition_count: u32, config: &EngineConfig) -> Option<EndReason> {
    if repetition_count >= config.claim_repetition_count {
        Some(EndReason::ThreefoldRepetition)
    } else if game_state.halfmove_clock >= config.claim_halfmove_limit {
        Some(EndReason::FiftyMoveRule)
    } else {
        None
    }
}

/// True when `color` is checkmated in `game_state` (and it is their move).
pub fn is_checkmate(game_state: &GameState, color: Color) -> bool {
    game_state.side_to_move == color
        && is_king_in_check(&game_state.board, color)
        && !has_legal_move(game_state)
}

//! Perft node counting over the legal move generator.
//!
//! Each promotion is expanded into its four piece choices so counts match the
//! published reference tables.

use crate::errors::EngineResult;
use crate::game_state::chess_types::PROMOTION_KINDS;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{has_legal_move, legal_moves, LegalMove};
use crate::move_generation::move_effect::MoveEffect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(game_state: &GameState, depth: u8) -> EngineResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in legal_moves(game_state) {
        for child in expand(game_state, &mv)? {
            if depth == 1 {
                total.merge(leaf_counts(&mv, &child));
            } else {
                total.merge(perft(&child, depth - 1)?);
            }
        }
    }
    Ok(total)
}

/// Leaf count only, without per-move classification.
pub fn perft_nodes(game_state: &GameState, depth: u8) -> EngineResult<usize> {
    if depth == 0 {
        return Ok(1);
    }
    let mut nodes = 0usize;
    for mv in legal_moves(game_state) {
        for child in expand(game_state, &mv)? {
            nodes += if depth == 1 { 1 } else { perft_nodes(&child, depth - 1)? };
        }
    }
    Ok(nodes)
}

fn expand(game_state: &GameState, mv: &LegalMove) -> EngineResult<Vec<GameState>> {
    match mv.verdict.effect {
        MoveEffect::Promotion { .. } => PROMOTION_KINDS
            .iter()
            .map(|kind| apply_move(game_state, mv.source, mv.target, mv.verdict.effect, Some(*kind)))
            .collect(),
        effect => Ok(vec![apply_move(game_state, mv.source, mv.target, effect, None)?]),
    }
}

fn leaf_counts(mv: &LegalMove, child: &GameState) -> PerftCounts {
    let effect = mv.verdict.effect;
    // Under-promotions can give check where the pawn did not.
    let gives_check = is_king_in_check(&child.board, child.side_to_move);
    PerftCounts {
        nodes: 1,
        captures: usize::from(effect.is_capture()),
        en_passant: usize::from(matches!(effect, MoveEffect::EnPassant { .. })),
        castles: usize::from(matches!(effect, MoveEffect::Castle { .. })),
        promotions: usize::from(matches!(effect, MoveEffect::Promotion { .. })),
        checks: usize::from(gives_check),
        checkmates: usize::from(gives_check && !has_legal_move(child)),
    }
}

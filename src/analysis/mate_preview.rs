//! Mate-in-one preview for a candidate move.
//!
//! Before a dragged piece is dropped, each reachable square is classified:
//! does landing there mate, and does it hand the opponent a mate on the very
//! next move. Promotions are previewed as queen promotions.

use crate::game_end::game_end_detector::is_checkmate;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_evaluator::evaluate;
use crate::move_generation::legal_move_generator::{legal_moves, legal_targets};
use crate::move_generation::move_effect::{MoveEffect, MoveVerdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetMarks {
    pub reachable: bool,
    pub capture: bool,
    pub gives_check: bool,
    /// Landing here checkmates the opponent.
    pub mate_one: bool,
    /// After landing here the opponent has a mating reply.
    pub mate_one_danger: bool,
}

/// Classify moving the piece on `source` to `target`. All marks are false
/// when the move is illegal.
pub fn classify_target(game_state: &GameState, source: Position, target: Position) -> TargetMarks {
    let verdict = evaluate(game_state, source, target, None);
    if !verdict.legal {
        return TargetMarks::default();
    }
    classify_verdict(game_state, source, target, verdict)
}

/// Marks for every legal destination of the piece on `source`.
pub fn preview_targets(game_state: &GameState, source: Position) -> Vec<(Position, TargetMarks)> {
    legal_targets(game_state, source)
        .into_iter()
        .map(|(target, verdict)| (target, classify_verdict(game_state, source, target, verdict)))
        .collect()
}

fn classify_verdict(
    game_state: &GameState,
    source: Position,
    target: Position,
    verdict: MoveVerdict,
) -> TargetMarks {
    let mover = game_state.side_to_move;
    let mut marks = TargetMarks {
        reachable: true,
        capture: verdict.is_capture,
        gives_check: verdict.gives_check,
        ..TargetMarks::default()
    };

    let Ok(next) = apply_move(game_state, source, target, verdict.effect, preview_promotion(verdict.effect)) else {
        return marks;
    };

    marks.mate_one = is_checkmate(&next, mover.opposite());
    if !marks.mate_one {
        marks.mate_one_danger = has_mating_reply(&next, mover);
    }
    marks
}

/// Whether the side to move in `game_state` can checkmate `victim` at once.
pub fn has_mating_reply(game_state: &GameState, victim: Color) -> bool {
    legal_moves(game_state).into_iter().any(|reply| {
        let choices: &[Option<PieceKind>] = match reply.verdict.effect {
            MoveEffect::Promotion { .. } => &[
                Some(PieceKind::Queen),
                Some(PieceKind::Rook),
                Some(PieceKind::Bishop),
                Some(PieceKind::Knight),
            ],
            _ => &[None],
        };
        choices.iter().any(|promotion| {
            apply_move(game_state, reply.source, reply.target, reply.verdict.effect, *promotion)
                .map(|after| is_checkmate(&after, victim))
                .unwrap_or(false)
        })
    })
}

fn preview_promotion(effect: MoveEffect) -> Option<PieceKind> {
    matches!(effect, MoveEffect::Promotion { .. }).then_some(PieceKind::Queen)
}

#[cfg(test)]
mod tests {
    use super::{classify_target, has_mating_reply, preview_targets};
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_position;

    fn sq(text: &str) -> Position {
        algebraic_to_position(text).expect("square should parse")
    }

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn back_rank_mate_is_marked() {
        let game = state("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let marks = classify_target(&game, sq("a1"), sq("a8"));
        assert!(marks.reachable);
        assert!(marks.gives_check);
        assert!(marks.mate_one);
        assert!(!marks.mate_one_danger);

        let quiet = classify_target(&game, sq("a1"), sq("a7"));
        assert!(quiet.reachable);
        assert!(!quiet.mate_one);
    }

    #[test]
    fn blunder_into_mate_is_marked() {
        // Before 2...Qh4#: white to play g2-g4 hands black the mate.
        let game = state("rnbqkbnr/pppp1ppp/8/4p3/8/5P2/PPPPP1PP/RNBQKBNR w KQkq - 0 2");
        assert!(classify_target(&game, sq("g2"), sq("g4")).mate_one_danger);
        assert!(!classify_target(&game, sq("e2"), sq("e3")).mate_one_danger);
    }

    #[test]
    fn promotion_is_previewed_as_a_queen() {
        let game = state("k7/2P5/1K6/8/8/8/8/8 w - - 0 1");
        // c8=Q is mate: the queen covers the back rank and b7 is guarded.
        assert!(classify_target(&game, sq("c7"), sq("c8")).mate_one);
    }

    #[test]
    fn illegal_targets_are_unmarked() {
        let game = GameState::new_game();
        let marks = classify_target(&game, sq("e2"), sq("e5"));
        assert!(!marks.reachable && !marks.capture && !marks.mate_one);
    }

    #[test]
    fn preview_covers_every_legal_target() {
        let game = GameState::new_game();
        let previews = preview_targets(&game, sq("g1"));
        assert_eq!(previews.len(), 2);
        assert!(previews.iter().all(|(_, marks)| marks.reachable && !marks.capture));
    }

    #[test]
    fn promotion_replies_are_considered() {
        // a2-a1 promoting to a queen or rook mates on the back rank.
        let game = state("6k1/8/8/8/8/8/p4PPP/6K1 b - - 0 1");
        assert!(has_mating_reply(&game, Color::White));
        assert!(!has_mating_reply(&GameState::new_game(), Color::Black));
    }
}

//! UI view models built from the pure move and threat queries.
//!
//! Nothing here touches game state; the board UI asks for a fresh set every
//! time the selection changes.

use std::collections::BTreeSet;

use crate::analysis::mate_preview::TargetMarks;
use crate::game_state::chess_types::Position;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::legal_targets;

/// Squares to highlight for the currently selected piece.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHighlights {
    pub possible: BTreeSet<Position>,
    pub captures: BTreeSet<Position>,
    pub checks: BTreeSet<Position>,
}

pub fn move_highlights(game_state: &GameState, source: Position) -> MoveHighlights {
    let mut out = MoveHighlights::default();
    for (target, verdict) in legal_targets(game_state, source) {
        out.possible.insert(target);
        if verdict.is_capture {
            out.captures.insert(target);
        }
        if verdict.gives_check {
            out.checks.insert(target);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SquareHighlight {
    /// Reachable.
    Shaded,
    /// Reachable with a capture.
    Killer,
    /// Mates at once.
    WinningMate,
    /// Allows a mate in reply.
    Danger,
}

/// Single highlight for a square: danger, then mate, then capture, then
/// plain reach.
pub fn square_highlight(marks: &TargetMarks) -> Option<SquareHighlight> {
    if marks.mate_one_danger {
        Some(SquareHighlight::Danger)
    } else if marks.mate_one {
        Some(SquareHighlight::WinningMate)
    } else if marks.capture {
        Some(SquareHighlight::Killer)
    } else if marks.reachable {
        Some(SquareHighlight::Shaded)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_position;

    fn sq(text: &str) -> Position {
        algebraic_to_position(text).expect("square should parse")
    }

    #[test]
    fn highlights_split_captures_and_checks() {
        let game = GameState::from_fen("4k3/8/8/3p4/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        let highlights = move_highlights(&game, sq("d1"));
        assert!(highlights.possible.contains(&sq("d5")));
        assert!(!highlights.possible.contains(&sq("d6")));
        assert_eq!(highlights.captures, BTreeSet::from([sq("d5")]));
        assert!(highlights.checks.contains(&sq("a4")));
        assert!(highlights.checks.contains(&sq("h5")));
        assert!(highlights.possible.is_superset(&highlights.checks));
    }

    #[test]
    fn repeated_queries_do_not_accumulate() {
        let game = GameState::new_game();
        let first = move_highlights(&game, sq("b1"));
        let second = move_highlights(&game, sq("b1"));
        assert_eq!(first, second);
        assert_eq!(first.possible.len(), 2);
    }

    #[test]
    fn precedence_is_danger_mate_killer_shaded() {
        let all = TargetMarks {
            reachable: true,
            capture: true,
            gives_check: true,
            mate_one: true,
            mate_one_danger: true,
        };
        assert_eq!(square_highlight(&all), Some(SquareHighlight::Danger));
        let mate = TargetMarks {
            mate_one_danger: false,
            ..all
        };
        assert_eq!(square_highlight(&mate), Some(SquareHighlight::WinningMate));
        let killer = TargetMarks { mate_one: false, ..mate };
        assert_eq!(square_highlight(&killer), Some(SquareHighlight::Killer));
        let shaded = TargetMarks { capture: false, ..killer };
        assert_eq!(square_highlight(&shaded), Some(SquareHighlight::Shaded));
        assert_eq!(square_highlight(&TargetMarks::default()), None);
    }
}

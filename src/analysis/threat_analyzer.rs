//! Read-only threat and protection scanning.
//!
//! All reach tests run the legality evaluator in hypothetical mode, so pins
//! and whose turn it is do not matter here: a pinned bishop still "threatens"
//! what lies on its diagonal.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_evaluator::evaluate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threat {
    pub attacker: Position,
    pub attacker_piece: Piece,
    pub target: Position,
    pub target_piece: Piece,
}

/// Overlay arrow colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKind {
    /// Blue: a threat by the side to move.
    Threat,
    /// Cyan: a threat on a piece nobody defends.
    Unprotected,
    /// Gold: a defender covering a threatened piece.
    Protector,
    /// Red: a threat on a king.
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    pub from: Position,
    pub to: Position,
    pub kind: ArrowKind,
    /// Material value of the piece on `to`, in pawn units.
    pub thickness: u8,
}

/// Every (attacker, defender) pair where a `color` piece could capture an
/// enemy piece.
pub fn threats_by(game_state: &GameState, color: Color) -> Vec<Threat> {
    let board = &game_state.board;
    let mut out = Vec::new();
    for (attacker, attacker_piece) in board.pieces_of(color) {
        for (target, target_piece) in board.pieces_of(color.opposite()) {
            if evaluate(game_state, attacker, target, Some(attacker_piece)).legal {
                out.push(Threat {
                    attacker,
                    attacker_piece,
                    target,
                    target_piece,
                });
            }
        }
    }
    out
}

/// Threats against `color`'s pieces.
#[inline]
pub fn threats_on(game_state: &GameState, color: Color) -> Vec<Threat> {
    threats_by(game_state, color.opposite())
}

/// Same-color pieces that could recapture on `square` if the piece standing
/// there were taken. Empty for an empty square.
pub fn protectors(game_state: &GameState, square: Position) -> Vec<(Position, Piece)> {
    let Some(defended) = game_state.board.get(square) else {
        return Vec::new();
    };

    // Recolor the defended piece so its own side may "capture" it.
    let mut scratch = game_state.clone();
    scratch
        .board
        .set(square, Some(Piece::new(defended.color.opposite(), defended.kind)));

    game_state
        .board
        .pieces_of(defended.color)
        .filter(|(source, _)| *source != square)
        .filter(|(source, piece)| evaluate(&scratch, *source, square, Some(*piece)).legal)
        .collect()
}

/// Arrows for the overlay, seen from the side to move: its threats (red on
/// the enemy king, cyan when the target is undefended, blue otherwise), red
/// arrows for checks against it, and gold arrows from each defender of one
/// of its threatened pieces.
pub fn threat_arrows(game_state: &GameState) -> Vec<Arrow> {
    let mover = game_state.side_to_move;
    let mut out = Vec::new();

    for threat in threats_by(game_state, mover) {
        let kind = if threat.target_piece.kind == PieceKind::King {
            ArrowKind::Check
        } else if protectors(game_state, threat.target).is_empty() {
            ArrowKind::Unprotected
        } else {
            ArrowKind::Threat
        };
        out.push(arrow(threat.attacker, threat.target, kind, threat.target_piece));
    }

    for threat in threats_on(game_state, mover) {
        if threat.target_piece.kind == PieceKind::King {
            out.push(arrow(threat.attacker, threat.target, ArrowKind::Check, threat.target_piece));
            continue;
        }
        for (defender, _) in protectors(game_state, threat.target) {
            let protector_arrow = arrow(defender, threat.target, ArrowKind::Protector, threat.target_piece);
            if !out.contains(&protector_arrow) {
                out.push(protector_arrow);
            }
        }
    }

    out
}

fn arrow(from: Position, to: Position, kind: ArrowKind, target_piece: Piece) -> Arrow {
    Arrow {
        from,
        to,
        kind,
        thickness: target_piece.kind.material_value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_position;

    fn sq(text: &str) -> Position {
        algebraic_to_position(text).expect("square should parse")
    }

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn no_threats_in_the_starting_position() {
        let game = GameState::new_game();
        assert!(threats_by(&game, Color::White).is_empty());
        assert!(threats_on(&game, Color::White).is_empty());
    }

    #[test]
    fn pawn_threatens_diagonally_only() {
        // White pawn e4 against knights on d5 and e5.
        let game = state("4k3/8/8/3nn3/4P3/8/8/4K3 w - - 0 1");
        let threats = threats_by(&game, Color::White);
        assert_eq!(threats.len(), 1);
        assert_eq!(threats[0].target, sq("d5"));
        assert_eq!(threats[0].target_piece.kind, PieceKind::Knight);
    }

    #[test]
    fn pinned_piece_still_threatens() {
        // The e2 bishop is pinned by the e8 rook but still eyes b5.
        let game = state("4r1k1/8/8/1n6/8/8/4B3/4K3 w - - 0 1");
        assert!(threats_by(&game, Color::White)
            .iter()
            .any(|t| t.attacker == sq("e2") && t.target == sq("b5")));
    }

    #[test]
    fn protectors_include_pawns_and_sliders_but_not_the_piece_itself() {
        let game = state("4k3/8/8/8/3N4/2P5/8/3RK3 w - - 0 1");
        let mut found: Vec<Position> = protectors(&game, sq("d4")).into_iter().map(|(p, _)| p).collect();
        found.sort();
        let mut expected = vec![sq("c3"), sq("d1")];
        expected.sort();
        assert_eq!(found, expected);
        assert!(protectors(&game, sq("e4")).is_empty());
    }

    #[test]
    fn arrows_are_classified_and_weighted() {
        // Bh5 eyes the king on e8; Nd4 hits a lone rook on c6.
        let game = state("4k3/8/2r5/7B/3N4/8/8/4K3 w - - 0 1");
        let arrows = threat_arrows(&game);

        let check = arrows
            .iter()
            .find(|a| a.from == sq("h5") && a.to == sq("e8"))
            .expect("bishop should check the king");
        assert_eq!(check.kind, ArrowKind::Check);
        assert_eq!(check.thickness, 10);

        let on_rook = arrows
            .iter()
            .find(|a| a.from == sq("d4") && a.to == sq("c6"))
            .expect("knight should hit the rook");
        assert_eq!(on_rook.kind, ArrowKind::Unprotected);
        assert_eq!(on_rook.thickness, 5);
    }

    #[test]
    fn defended_targets_get_blue_arrows_and_defenders_get_gold() {
        // White knight d4 attacks a c6 knight defended by the b7 pawn; the
        // black rook d8 hits the d4 knight, defended by the e3 pawn.
        let game = state("3rk3/1p6/2n5/8/3N4/4P3/8/4K3 w - - 0 1");
        let arrows = threat_arrows(&game);

        let on_knight = arrows
            .iter()
            .find(|a| a.from == sq("d4") && a.to == sq("c6"))
            .expect("knight should hit the knight");
        assert_eq!(on_knight.kind, ArrowKind::Threat);
        assert_eq!(on_knight.thickness, 3);

        assert!(arrows
            .iter()
            .any(|a| a.from == sq("e3") && a.to == sq("d4") && a.kind == ArrowKind::Protector));
    }
}

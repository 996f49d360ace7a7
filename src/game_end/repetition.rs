//! Position signatures and the repetition table.
//!
//! A signature is a Zobrist key over piece placement, side to move, castling
//! rights and the en-passant file. The file only contributes when the side to
//! move can actually capture en passant, so a double step nobody can answer
//! does not make an otherwise identical position look new.
//!
//! Keys come from a fixed-seed `StdRng`, so signatures are stable across runs.

use std::collections::HashMap;
use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_evaluator::evaluate;
use crate::move_generation::move_effect::MoveEffect;

const SIGNATURE_SEED: u64 = 0x706c_756d_7275_6c65;

/// One random key per (piece, square) pair, plus keys for the side to move,
/// each castling-rights mask and each en-passant file.
struct SignatureKeys {
    placement: [[u64; 64]; 12],
    black_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

impl SignatureKeys {
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(SIGNATURE_SEED);
        Self {
            placement: std::array::from_fn(|_| std::array::from_fn(|_| rng.random())),
            black_to_move: rng.random(),
            castling: std::array::from_fn(|_| rng.random()),
            en_passant_file: std::array::from_fn(|_| rng.random()),
        }
    }

    #[inline]
    fn placement(&self, piece: Piece, square: Position) -> u64 {
        self.placement[piece.color.index() * 6 + piece.kind.index()][square.index()]
    }
}

fn keys() -> &'static SignatureKeys {
    static KEYS: OnceLock<SignatureKeys> = OnceLock::new();
    KEYS.get_or_init(SignatureKeys::generate)
}

/// File of the en-passant target when the side to move has a legal capture
/// onto it.
pub fn capturable_en_passant_file(game_state: &GameState) -> Option<u8> {
    let target = game_state.en_passant_target?;
    let mover = game_state.side_to_move;
    // Capturing pawns stand one row behind the target, from the mover's view.
    let capture_row_delta = -mover.pawn_direction();

    [-1i8, 1]
        .into_iter()
        .filter_map(|d_col| target.offset(capture_row_delta, d_col))
        .filter(|source| game_state.board.get(*source) == Some(Piece::new(mover, PieceKind::Pawn)))
        .any(|source| {
            let verdict = evaluate(game_state, source, target, None);
            verdict.legal && matches!(verdict.effect, MoveEffect::EnPassant { .. })
        })
        .then_some(target.col())
}

pub fn position_signature(game_state: &GameState) -> u64 {
    let keys = keys();
    let placement = game_state
        .board
        .pieces()
        .fold(0u64, |key, (square, piece)| key ^ keys.placement(piece, square));

    let mut key = placement ^ keys.castling[game_state.castling_rights.bits() as usize];
    if game_state.side_to_move == Color::Black {
        key ^= keys.black_to_move;
    }
    if let Some(file) = capturable_en_passant_file(game_state) {
        key ^= keys.en_passant_file[file as usize];
    }
    key
}

/// Occurrence count per position signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RepetitionTable {
    counts: HashMap<u64, u32>,
    /// Ledger length covered by the last recorded position.
    recorded_through: usize,
}

impl RepetitionTable {
    /// Table seeded with the game's initial position.
    pub fn starting_at(game_state: &GameState) -> Self {
        let mut table = Self::default();
        table.counts.insert(position_signature(game_state), 1);
        table
    }

    /// Count `game_state`, reached after `ledger_len` ledger entries, once.
    /// Calling again for the same ledger length does not count twice.
    pub fn record(&mut self, game_state: &GameState, ledger_len: usize) -> u32 {
        let signature = position_signature(game_state);
        if ledger_len <= self.recorded_through {
            return self.count_of(signature);
        }

        let count = self.counts.entry(signature).or_insert(0);
        *count += 1;
        self.recorded_through = ledger_len;
        trace!(signature, count = *count, ledger_len, "position recorded");
        *count
    }

    #[inline]
    pub fn count_of(&self, signature: u64) -> u32 {
        self.counts.get(&signature).copied().unwrap_or(0)
    }

    pub fn count(&self, game_state: &GameState) -> u32 {
        self.count_of(position_signature(game_state))
    }

    #[inline]
    pub fn recorded_through(&self) -> usize {
        self.recorded_through
    }
}

#[cfg(test)]
mod tests {
    use super::{capturable_en_passant_file, position_signature, RepetitionTable};
    use crate::game_state::game_state::GameState;

    fn signature(fen: &str) -> u64 {
        position_signature(&GameState::from_fen(fen).expect("FEN should parse"))
    }

    #[test]
    fn starting_position_signature_is_deterministic() {
        assert_eq!(
            position_signature(&GameState::new_game()),
            position_signature(&GameState::new_game())
        );
    }

    #[test]
    fn side_to_move_changes_signature() {
        assert_ne!(
            signature("4k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            signature("4k3/8/8/8/8/8/8/4K3 b - - 0 1")
        );
    }

    #[test]
    fn castling_rights_change_signature() {
        assert_ne!(
            signature("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1"),
            signature("4k3/8/8/8/8/8/8/R3K2R w - - 0 1")
        );
    }

    #[test]
    fn en_passant_file_counts_only_when_capturable() {
        // No black pawn can take on e3.
        assert_eq!(
            signature("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1"),
            signature("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1")
        );
        // The d4 pawn can.
        let with_ep = GameState::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        assert_eq!(capturable_en_passant_file(&with_ep), Some(4));
        assert_ne!(
            position_signature(&with_ep),
            signature("4k3/8/8/8/3pP3/8/8/4K3 b - - 0 1")
        );
    }

    #[test]
    fn pinned_capturer_does_not_open_en_passant() {
        // Taking on e3 would expose the black king on a4 to the rook on h4.
        let state = GameState::from_fen("8/8/8/8/k2pP2R/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        assert_eq!(capturable_en_passant_file(&state), None);
    }

    #[test]
    fn record_counts_each_ledger_length_once() {
        let state = GameState::new_game();
        let mut table = RepetitionTable::starting_at(&state);
        assert_eq!(table.count(&state), 1);
        assert_eq!(table.record(&state, 4), 2);
        assert_eq!(table.record(&state, 4), 2);
        assert_eq!(table.record(&state, 8), 3);
        assert_eq!(table.recorded_through(), 8);
    }
}

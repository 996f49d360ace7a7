//! Canonical chess-rule constants and the engine's rule configuration.
//!
//! Stores the standard starting position FEN and the draw thresholds that
//! the game-end detector consults after every committed move.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::game_end::insufficient_material::MaterialPolicy;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Draw thresholds and material policy for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Occurrences of a position after which a draw may be claimed.
    pub claim_repetition_count: u32,
    /// Occurrences of a position that end the game automatically.
    pub automatic_repetition_count: u32,
    /// Quiet half-moves after which a draw may be claimed.
    pub claim_halfmove_limit: u16,
    /// Quiet half-moves that end the game automatically.
    pub automatic_halfmove_limit: u16,
    pub material_policy: MaterialPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            claim_repetition_count: 3,
            automatic_repetition_count: 5,
            claim_halfmove_limit: 100,
            automatic_halfmove_limit: 150,
            material_policy: MaterialPolicy::EnumeratedSignatures,
        }
    }
}

impl EngineConfig {
    pub fn with_claim_repetition_count(mut self, count: u32) -> Self {
        self.claim_repetition_count = count;
        self
    }

    pub fn with_automatic_repetition_count(mut self, count: u32) -> Self {
        self.automatic_repetition_count = count;
        self
    }

    pub fn with_claim_halfmove_limit(mut self, limit: u16) -> Self {
        self.claim_halfmove_limit = limit;
        self
    }

    pub fn with_automatic_halfmove_limit(mut self, limit: u16) -> Self {
        self.automatic_halfmove_limit = limit;
        self
    }

    pub fn with_material_policy(mut self, policy: MaterialPolicy) -> Self {
        self.material_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;

    #[test]
    fn default_thresholds_follow_fide_claim_and_automatic_limits() {
        let config = EngineConfig::default();
        assert_eq!(config.claim_repetition_count, 3);
        assert_eq!(config.automatic_repetition_count, 5);
        assert_eq!(config.claim_halfmove_limit, 100);
        assert_eq!(config.automatic_halfmove_limit, 150);
    }

    #[test]
    fn builder_overrides_single_threshold() {
        let config = EngineConfig::default().with_automatic_halfmove_limit(20);
        assert_eq!(config.automatic_halfmove_limit, 20);
        assert_eq!(config.claim_halfmove_limit, 100);
    }
}

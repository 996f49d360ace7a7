//! The owning game engine.
//!
//! `GameEngine` is the single mutable owner of one game: the position, the
//! move ledger, the repetition table, a pending draw offer, a pending
//! promotion and the outcome. Every UI action goes through it and runs to
//! completion before the next one is accepted.
//!
//! The bool-returning methods are the UI-facing surface: an illegal move or a
//! misplaced action answers `false` and leaves the game untouched. The
//! `try_*` variants report the same refusals as `EngineError`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{EngineError, EngineResult};
use crate::game_end::game_end_detector::{claimable_draw, detect_game_end};
use crate::game_end::repetition::RepetitionTable;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::EngineConfig;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::outcome::{EndReason, GameOutcome, PendingDrawOffer};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_evaluator::evaluate;
use crate::move_generation::legal_move_generator::legal_targets;
use crate::move_generation::move_effect::{MoveEffect, MoveVerdict};
use crate::moves::king_moves::castle_squares;
use crate::notation::ledger_parser::{parse_ledger_entry, LedgerMove};
use crate::notation::move_notation::{
    append_promotion_suffix, encode_move, push_check_markers, terminal_entry, MoveFacts,
};
use crate::utils::long_algebraic::{move_to_long_algebraic, parse_long_algebraic};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameEngine {
    initial: GameState,
    state: GameState,
    ledger: Vec<String>,
    repetitions: RepetitionTable,
    draw_offer: Option<PendingDrawOffer>,
    /// Square of a pawn that reached the last rank and awaits its new piece.
    pending_promotion: Option<Position>,
    outcome: GameOutcome,
    config: EngineConfig,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::from_state(GameState::new_game(), config)
    }

    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        Self::from_fen_with_config(fen, EngineConfig::default())
    }

    pub fn from_fen_with_config(fen: &str, config: EngineConfig) -> EngineResult<Self> {
        Ok(Self::from_state(GameState::from_fen(fen)?, config))
    }

    fn from_state(state: GameState, config: EngineConfig) -> Self {
        Self {
            repetitions: RepetitionTable::starting_at(&state),
            initial: state.clone(),
            state,
            ledger: Vec::new(),
            draw_offer: None,
            pending_promotion: None,
            outcome: GameOutcome::InProgress,
            config,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Position the game started from.
    #[inline]
    pub fn initial_state(&self) -> &GameState {
        &self.initial
    }

    #[inline]
    pub fn ledger(&self) -> &[String] {
        &self.ledger
    }

    #[inline]
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    pub fn reason_text(&self) -> Option<String> {
        self.outcome.reason_text()
    }

    #[inline]
    pub fn draw_offer(&self) -> Option<PendingDrawOffer> {
        self.draw_offer
    }

    #[inline]
    pub fn pending_promotion(&self) -> Option<Position> {
        self.pending_promotion
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn to_fen(&self) -> String {
        self.state.get_fen()
    }

    /// Occurrences of the current position so far, the current one included.
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.count(&self.state)
    }

    /// Legal destinations for the piece on `source`. Empty once the game is
    /// over or while a promotion is pending.
    pub fn legal_targets(&self, source: Position) -> Vec<Position> {
        if self.is_over() || self.pending_promotion.is_some() {
            return Vec::new();
        }
        legal_targets(&self.state, source)
            .into_iter()
            .map(|(target, _)| target)
            .collect()
    }

    /// Validate and commit a move. `false` leaves the game unchanged.
    pub fn propose_move(&mut self, source: Position, target: Position) -> bool {
        match self.try_propose_move(source, target) {
            Ok(()) => true,
            Err(EngineError::IllegalMove(reason)) => {
                debug!(%source, %target, %reason, "move rejected");
                false
            }
            Err(err) => {
                warn!(%source, %target, %err, "move refused");
                false
            }
        }
    }

    pub fn try_propose_move(&mut self, source: Position, target: Position) -> EngineResult<()> {
        self.ensure_accepting_moves()?;

        let verdict = evaluate(&self.state, source, target, None);
        if !verdict.legal {
            return Err(EngineError::IllegalMove(format!("{source}{target}")));
        }
        self.commit(source, target, verdict)
    }

    /// Choose the piece for a pawn waiting on the last rank.
    pub fn promote(&mut self, kind: PieceKind) -> bool {
        match self.try_promote(kind) {
            Ok(()) => true,
            Err(err) => {
                warn!(?kind, %err, "promotion refused");
                false
            }
        }
    }

    pub fn try_promote(&mut self, kind: PieceKind) -> EngineResult<()> {
        let square = self.pending_promotion.ok_or(EngineError::NoPendingPromotion)?;
        if !kind.is_promotion_target() {
            return Err(EngineError::InvalidPromotionPiece(kind));
        }
        let pawn = self
            .state
            .board
            .get(square)
            .ok_or(EngineError::NoPendingPromotion)?;

        self.state.board.set(square, Some(Piece::new(pawn.color, kind)));
        self.pending_promotion = None;

        let gives_check = is_king_in_check(&self.state.board, pawn.color.opposite());
        let outcome = self.record_position();

        if let Some(entry) = self.ledger.last_mut() {
            append_promotion_suffix(entry, kind);
            push_check_markers(entry, gives_check, outcome.reason() == Some(EndReason::Checkmate));
            debug!(entry = entry.as_str(), side = pawn.color.name(), "promotion committed");
        }
        self.conclude(outcome);
        Ok(())
    }

    /// Apply a move given as `e2e4` / `e7e8q`. A promotion letter resolves
    /// the promotion straight away.
    pub fn play_long_algebraic(&mut self, text: &str) -> EngineResult<()> {
        let mv = parse_long_algebraic(text)?;
        self.ensure_accepting_moves()?;

        let verdict = evaluate(&self.state, mv.source, mv.target, None);
        if !verdict.legal {
            return Err(EngineError::IllegalMove(text.to_owned()));
        }
        let promotes = matches!(verdict.effect, MoveEffect::Promotion { .. });
        if mv.promotion.is_some() && !promotes {
            return Err(EngineError::IllegalMove(text.to_owned()));
        }

        self.commit(mv.source, mv.target, verdict)?;
        if let Some(kind) = mv.promotion {
            self.try_promote(kind)?;
        }
        Ok(())
    }

    /// Play a sequence of long-algebraic moves, stopping at the first error.
    pub fn replay<I, S>(&mut self, moves: I) -> EngineResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for mv in moves {
            self.play_long_algebraic(mv.as_ref())?;
        }
        Ok(())
    }

    fn ensure_accepting_moves(&self) -> EngineResult<()> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        if self.pending_promotion.is_some() {
            return Err(EngineError::PromotionPending);
        }
        Ok(())
    }

    fn commit(&mut self, source: Position, target: Position, verdict: MoveVerdict) -> EngineResult<()> {
        let piece = self
            .state
            .board
            .get(source)
            .ok_or_else(|| EngineError::IllegalMove(format!("no piece on {source}")))?;
        let next = apply_move(&self.state, source, target, verdict.effect, None)?;

        if let Some(offer) = self.draw_offer.take() {
            debug!(offered_by = offer.offered_by.name(), "draw offer lapsed");
        }
        self.state = next;

        let mut facts = MoveFacts {
            source,
            target,
            piece: piece.kind,
            is_capture: verdict.is_capture,
            gives_check: false,
            is_checkmate: false,
            is_en_passant: matches!(verdict.effect, MoveEffect::EnPassant { .. }),
            castle: verdict.effect.castle_side(),
        };

        // Check markers and game-end detection wait for the promotion piece.
        if matches!(verdict.effect, MoveEffect::Promotion { .. }) {
            self.pending_promotion = Some(target);
            self.ledger.push(encode_move(&facts));
            debug!(%target, side = piece.color.name(), "awaiting promotion");
            return Ok(());
        }

        let outcome = self.record_position_after(self.ledger.len() + 1);
        facts.gives_check = verdict.gives_check;
        facts.is_checkmate = outcome.reason() == Some(EndReason::Checkmate);
        let entry = encode_move(&facts);
        debug!(entry = entry.as_str(), side = piece.color.name(), "move committed");
        self.ledger.push(entry);
        self.conclude(outcome);
        Ok(())
    }

    fn record_position(&mut self) -> GameOutcome {
        self.record_position_after(self.ledger.len())
    }

    fn record_position_after(&mut self, ledger_len: usize) -> GameOutcome {
        let count = self.repetitions.record(&self.state, ledger_len);
        detect_game_end(&self.state, count, &self.config)
    }

    fn conclude(&mut self, outcome: GameOutcome) {
        if !outcome.is_over() {
            return;
        }
        self.outcome = outcome;
        self.draw_offer = None;
        info!(
            reason = ?outcome.reason(),
            winner = ?outcome.winner(),
            "game over"
        );
        if outcome.reason() != Some(EndReason::Checkmate) {
            if let Some(entry) = terminal_entry(&outcome) {
                self.ledger.push(entry);
            }
        }
    }

    /// Offer a draw on behalf of `by`; the other side may accept or decline.
    pub fn offer_draw(&mut self, by: Color) -> bool {
        if self.is_over() {
            warn!(by = by.name(), "draw offered after game end");
            return false;
        }
        self.draw_offer = Some(PendingDrawOffer { offered_by: by });
        debug!(by = by.name(), "draw offered");
        true
    }

    pub fn accept_draw_offer(&mut self) -> bool {
        match self.try_accept_draw_offer() {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "draw acceptance refused");
                false
            }
        }
    }

    pub fn try_accept_draw_offer(&mut self) -> EngineResult<()> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        let offer = self.draw_offer.take().ok_or(EngineError::NoPendingDrawOffer)?;
        debug!(responder = offer.responder().name(), "draw offer accepted");
        self.conclude(GameOutcome::draw(EndReason::Agreement));
        Ok(())
    }

    pub fn decline_draw_offer(&mut self) -> bool {
        match self.draw_offer.take() {
            Some(offer) => {
                debug!(responder = offer.responder().name(), "draw offer declined");
                true
            }
            None => {
                warn!("decline without a pending draw offer");
                false
            }
        }
    }

    pub fn can_claim_draw(&self) -> bool {
        !self.is_over()
            && self.pending_promotion.is_none()
            && claimable_draw(&self.state, self.repetition_count(), &self.config).is_some()
    }

    pub fn claim_draw(&mut self) -> bool {
        match self.try_claim_draw() {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "draw claim refused");
                false
            }
        }
    }

    pub fn try_claim_draw(&mut self) -> EngineResult<()> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        if self.pending_promotion.is_some() {
            return Err(EngineError::PromotionPending);
        }
        let reason = claimable_draw(&self.state, self.repetition_count(), &self.config)
            .ok_or(EngineError::NoClaimableDraw)?;
        self.conclude(GameOutcome::draw(reason));
        Ok(())
    }

    pub fn resign(&mut self, color: Color) -> bool {
        if self.is_over() {
            warn!(color = color.name(), "resignation after game end");
            return false;
        }
        self.conclude(GameOutcome::win(EndReason::Resignation, color.opposite()));
        true
    }

    /// Ledger moves paired with the color that played them. Result entries
    /// are skipped.
    fn parsed_ledger(&self) -> impl Iterator<Item = (Color, LedgerMove)> + '_ {
        let first = self.initial.side_to_move;
        self.ledger
            .iter()
            .filter_map(|entry| parse_ledger_entry(entry))
            .enumerate()
            .map(move |(ply, mv)| {
                let color = if ply % 2 == 0 { first } else { first.opposite() };
                (color, mv)
            })
    }

    /// Moves played so far as `e2e4`, `e1g1`, `e7e8q`.
    pub fn long_algebraic_history(&self) -> Vec<String> {
        self.parsed_ledger()
            .map(|(color, mv)| match mv {
                LedgerMove::Castle(side) => {
                    let squares = castle_squares(color, side);
                    move_to_long_algebraic(squares.king_from, squares.king_to, None)
                }
                LedgerMove::Move {
                    source,
                    target,
                    promotion,
                    ..
                } => move_to_long_algebraic(source, target, promotion),
            })
            .collect()
    }

    /// Whether the piece that started the game on `origin` has moved or been
    /// captured there, judged from the ledger alone.
    pub fn piece_has_moved(&self, origin: Position) -> bool {
        self.parsed_ledger().any(|(color, mv)| match mv {
            LedgerMove::Castle(side) => {
                let squares = castle_squares(color, side);
                origin == squares.king_from || origin == squares.rook_from
            }
            LedgerMove::Move { source, target, .. } => origin == source || origin == target,
        })
    }
}

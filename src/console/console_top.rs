//! Interactive console front-end and command loop.
//!
//! Reads one command per line, applies it to a `GameEngine`, and writes the
//! result. Moves are typed in coordinate form (`e2e4`, `e7e8q`); everything
//! else is a keyword command (`help` lists them).

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use crate::analysis::highlights::{move_highlights, square_highlight, SquareHighlight};
use crate::analysis::mate_preview::preview_targets;
use crate::analysis::threat_analyzer::{threat_arrows, ArrowKind};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::EngineConfig;
use crate::game_state::chess_types::*;
use crate::game_state::game_engine::GameEngine;
use crate::utils::algebraic::algebraic_to_position;
use crate::utils::pgn::write_pgn;
use crate::utils::render_game_state::render_board;

const HELP_TEXT: &str = "\
commands:
  <move>            play a move, e.g. e2e4 or e7e8q
  promote <q|r|b|n> choose the piece for a pending promotion
  moves <square>    legal targets of the piece on <square>
  threats           threat and protection arrows for the side to move
  board | fen | ledger | history | pgn
  offer | accept | decline | claim | resign
  new [fen]         start a new game
  quit";

pub fn run_stdio_loop(engine: GameEngine) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut console = ConsoleState::new(engine);

    writeln!(stdout, "{}", render_board(console.engine.board()))?;
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = console.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct ConsoleState {
    engine: GameEngine,
    config: EngineConfig,
}

impl ConsoleState {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            config: *engine.config(),
            engine,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Handle one line; `Ok(true)` asks the loop to stop.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let mover = self.engine.side_to_move();

        match cmd {
            "help" | "?" => writeln!(out, "{HELP_TEXT}")?,
            "quit" | "exit" => return Ok(true),
            "board" => writeln!(out, "{}", render_board(self.engine.board()))?,
            "fen" => writeln!(out, "{}", self.engine.to_fen())?,
            "ledger" => writeln!(out, "{}", self.engine.ledger().join(" "))?,
            "history" => writeln!(out, "{}", self.engine.long_algebraic_history().join(" "))?,
            "pgn" => write!(out, "{}", write_pgn(&self.engine, &BTreeMap::new()))?,
            "moves" => match parts.next().map(algebraic_to_position) {
                Some(Ok(square)) => self.write_moves(square, out)?,
                _ => writeln!(out, "usage: moves <square>")?,
            },
            "threats" => self.write_threats(out)?,
            "promote" => {
                let kind = parts
                    .next()
                    .and_then(|text| text.chars().next())
                    .and_then(|ch| PieceKind::from_notation_letter(ch.to_ascii_uppercase()));
                match kind {
                    Some(kind) => {
                        let result = self.engine.try_promote(kind);
                        self.report(result, out)?;
                    }
                    None => writeln!(out, "usage: promote <q|r|b|n>")?,
                }
            }
            "offer" => {
                if self.engine.offer_draw(mover) {
                    writeln!(out, "{} offers a draw", mover.name())?;
                }
            }
            "accept" => {
                let result = self.engine.try_accept_draw_offer();
                self.report(result, out)?;
            }
            "decline" => {
                if !self.engine.decline_draw_offer() {
                    writeln!(out, "error: {}", EngineError::NoPendingDrawOffer)?;
                }
            }
            "claim" => {
                let result = self.engine.try_claim_draw();
                self.report(result, out)?;
            }
            "resign" => {
                if self.engine.resign(mover) {
                    self.write_status(out)?;
                }
            }
            "new" => {
                let fen = parts.collect::<Vec<_>>().join(" ");
                let created = if fen.is_empty() {
                    Ok(GameEngine::with_config(self.config))
                } else {
                    GameEngine::from_fen_with_config(&fen, self.config)
                };
                match created {
                    Ok(engine) => {
                        self.engine = engine;
                        writeln!(out, "{}", render_board(self.engine.board()))?;
                    }
                    Err(err) => writeln!(out, "error: {err}")?,
                }
            }
            _ => {
                let result = self.engine.play_long_algebraic(trimmed);
                self.report(result, out)?;
            }
        }

        Ok(false)
    }

    fn report(&self, result: EngineResult<()>, out: &mut impl Write) -> io::Result<()> {
        match result {
            Ok(()) => self.write_status(out),
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    fn write_status(&self, out: &mut impl Write) -> io::Result<()> {
        if let Some(entry) = self.engine.ledger().last() {
            writeln!(out, "{entry}")?;
        }
        writeln!(out, "{}", render_board(self.engine.board()))?;
        if let Some(square) = self.engine.pending_promotion() {
            writeln!(out, "pawn on {square} awaits promotion (promote q|r|b|n)")?;
        } else if let Some(reason) = self.engine.reason_text() {
            writeln!(out, "{reason}")?;
        } else {
            if self.engine.can_claim_draw() {
                writeln!(out, "{} may claim a draw", self.engine.side_to_move().name())?;
            }
            writeln!(out, "{} to move", self.engine.side_to_move().name())?;
        }
        Ok(())
    }

    fn write_moves(&self, square: Position, out: &mut impl Write) -> io::Result<()> {
        let highlights = move_highlights(self.engine.state(), square);
        if highlights.possible.is_empty() {
            return writeln!(out, "no legal moves from {square}");
        }
        for (target, marks) in preview_targets(self.engine.state(), square) {
            let label = match square_highlight(&marks) {
                Some(SquareHighlight::Danger) => "allows mate",
                Some(SquareHighlight::WinningMate) => "mates",
                Some(SquareHighlight::Killer) => "captures",
                Some(SquareHighlight::Shaded) | None => "",
            };
            let check = if highlights.checks.contains(&target) { "+" } else { "" };
            writeln!(out, "{square}{target}{check} {label}")?;
        }
        Ok(())
    }

    fn write_threats(&self, out: &mut impl Write) -> io::Result<()> {
        for arrow in threat_arrows(self.engine.state()) {
            let kind = match arrow.kind {
                ArrowKind::Threat => "threat",
                ArrowKind::Unprotected => "unprotected",
                ArrowKind::Protector => "protector",
                ArrowKind::Check => "check",
            };
            writeln!(out, "{}->{} {kind} ({})", arrow.from, arrow.to, arrow.thickness)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ConsoleState;
    use crate::game_state::game_engine::GameEngine;
    use crate::game_state::outcome::EndReason;

    fn run(console: &mut ConsoleState, line: &str) -> String {
        let mut out = Vec::new();
        console
            .handle_command(line, &mut out)
            .expect("writing to a Vec should not fail");
        String::from_utf8(out).expect("console output should be UTF-8")
    }

    #[test]
    fn moves_and_queries() {
        let mut console = ConsoleState::new(GameEngine::new());
        assert!(run(&mut console, "e2e4").starts_with("e2-e4\n"));
        assert!(run(&mut console, "e2e4").starts_with("error: illegal move"));
        assert_eq!(run(&mut console, "history"), "e2e4\n");
        assert!(run(&mut console, "moves g8").contains("g8f6"));
        assert!(run(&mut console, "pgn").contains("1. e2-e4 *"));
    }

    #[test]
    fn draw_commands() {
        let mut console = ConsoleState::new(GameEngine::new());
        assert_eq!(run(&mut console, "offer"), "White offers a draw\n");
        assert!(run(&mut console, "accept").contains("Draw by agreement."));
        assert_eq!(console.engine().outcome().reason(), Some(EndReason::Agreement));
        assert!(run(&mut console, "claim").starts_with("error:"));
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut console = ConsoleState::new(GameEngine::new());
        let mut out = Vec::new();
        assert!(console.handle_command("quit", &mut out).expect("quit should succeed"));
        assert!(!console.handle_command("", &mut out).expect("blank should succeed"));
    }
}

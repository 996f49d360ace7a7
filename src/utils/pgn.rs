//! PGN read/write utilities for game history interchange.
//!
//! Movetext is written from the engine ledger (long algebraic with piece
//! letters, e.g. `Ng1-f3`). A result annotation such as
//! `1/2-1/2 {Draw by stalemate}` becomes the trailing comment and result
//! token. Reading replays the movetext through a fresh engine.

use std::collections::BTreeMap;

use chrono::Local;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::game_engine::GameEngine;
use crate::moves::king_moves::castle_squares;
use crate::notation::ledger_parser::{parse_ledger_entry, LedgerMove};
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub engine: GameEngine,
    pub result: String,
}

/// Seven-tag roster plus `SetUp`/`FEN` for non-standard starts. Entries in
/// `extra_headers` override the defaults.
pub fn write_pgn(engine: &GameEngine, extra_headers: &BTreeMap<String, String>) -> String {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Plum Rules Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), engine.outcome().pgn_result().to_owned());

    let initial_fen = engine.initial_state().get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    for (key, value) in extra_headers {
        headers.insert(key.clone(), value.clone());
    }

    write_pgn_with_headers(engine, &headers)
}

pub fn write_pgn_with_headers(engine: &GameEngine, headers: &BTreeMap<String, String>) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let initial = engine.initial_state();
    let black_first = initial.side_to_move == Color::Black;
    let first_move_number = usize::from(initial.fullmove_number.max(1));

    let mut movetext_parts = Vec::<String>::with_capacity(engine.ledger().len() + 2);
    let mut ply = usize::from(black_first);
    let mut comment = None;
    for entry in engine.ledger() {
        if parse_ledger_entry(entry).is_none() {
            comment = entry.split_once(' ').map(|(_, reason)| reason.to_owned());
            continue;
        }
        let move_number = first_move_number + ply / 2;
        if ply % 2 == 0 {
            movetext_parts.push(format!("{}. {}", move_number, entry));
        } else if movetext_parts.is_empty() {
            movetext_parts.push(format!("{}... {}", move_number, entry));
        } else {
            movetext_parts.push(entry.clone());
        }
        ply += 1;
    }

    if let Some(comment) = comment {
        movetext_parts.push(comment);
    }
    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

/// Parse PGN written by `write_pgn` (or any PGN whose moves are coordinate
/// long algebraic, with or without piece letters and separators).
pub fn read_pgn(pgn: &str) -> EngineResult<PgnGame> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let mut engine = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        let fen = headers
            .get("FEN")
            .ok_or_else(|| EngineError::InvalidFen("SetUp is 1 but the FEN header is missing".to_owned()))?;
        GameEngine::from_fen(fen)?
    } else {
        GameEngine::new()
    };

    let mut result = "*".to_owned();
    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        if is_move_number_token(token) {
            continue;
        }

        let cleaned = trim_annotation_suffix(token);
        if is_result_token(cleaned) {
            result = normalize_result(cleaned).to_owned();
            break;
        }
        if cleaned == "e.p." {
            continue;
        }

        let long_algebraic = token_to_long_algebraic(cleaned, &engine)?;
        engine.play_long_algebraic(&long_algebraic)?;
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        engine,
        result,
    })
}

fn token_to_long_algebraic(token: &str, engine: &GameEngine) -> EngineResult<String> {
    match parse_ledger_entry(token) {
        Some(LedgerMove::Castle(side)) => {
            let squares = castle_squares(engine.side_to_move(), side);
            Ok(move_to_long_algebraic(squares.king_from, squares.king_to, None))
        }
        Some(LedgerMove::Move {
            source,
            target,
            promotion,
            ..
        }) => Ok(move_to_long_algebraic(source, target, promotion)),
        // Bare coordinate form such as `e2e4` or `e7e8q`.
        None => Ok(token.to_owned()),
    }
}

fn parse_header_line(line: &str) -> EngineResult<(String, String)> {
    let invalid = || EngineError::InvalidPgn(format!("invalid header line: {line}"));
    if !line.starts_with('[') || !line.ends_with(']') {
        return Err(invalid());
    }
    let inner = &line[1..line.len() - 1];
    let mut parts = inner.splitn(2, ' ');
    let key = parts.next().ok_or_else(invalid)?.trim();
    let value_raw = parts.next().ok_or_else(invalid)?.trim();

    if !value_raw.starts_with('"') || !value_raw.ends_with('"') || value_raw.len() < 2 {
        return Err(invalid());
    }
    let value = value_raw[1..value_raw.len() - 1].replace("\\\"", "\"");
    Ok((key.to_owned(), value))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

fn is_move_number_token(token: &str) -> bool {
    if token.contains("...") {
        let head = token.split("...").next().unwrap_or_default();
        return !head.is_empty() && head.chars().all(|c| c.is_ascii_digit());
    }
    if token.ends_with('.') {
        return token
            .trim_end_matches('.')
            .chars()
            .all(|c| c.is_ascii_digit());
    }
    false
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::{read_pgn, write_pgn, write_pgn_with_headers};
    use std::collections::BTreeMap;

    use crate::game_state::chess_types::Color;
    use crate::game_state::game_engine::GameEngine;

    #[test]
    fn pgn_round_trip_start_position_history() {
        let mut engine = GameEngine::new();
        engine
            .replay(["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "g8f6", "e1g1"])
            .expect("opening should replay");

        let pgn = write_pgn(&engine, &BTreeMap::new());
        assert!(pgn.contains("[Result \"*\"]"));
        assert!(pgn.contains("1. e2-e4 e7-e5 2. Ng1-f3 Nb8-c6 3. Bf1-b5 Ng8-f6 4. O-O *"));
        assert!(!pgn.contains("[SetUp"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.engine.to_fen(), engine.to_fen());
        assert_eq!(parsed.engine.ledger(), engine.ledger());
        assert_eq!(parsed.result, "*");
    }

    #[test]
    fn finished_game_carries_reason_comment_and_result() {
        let mut engine = GameEngine::new();
        engine.replay(["e2e4", "e7e5"]).expect("moves should replay");
        engine.resign(Color::Black);

        let mut extra = BTreeMap::new();
        extra.insert("Event".to_owned(), "Club \"Open\"".to_owned());
        let pgn = write_pgn(&engine, &extra);
        assert!(pgn.contains("[Event \"Club \\\"Open\\\"\"]"));
        assert!(pgn.contains("[Result \"1-0\"]"));
        assert!(pgn.ends_with("1. e2-e4 e7-e5 {Black resigns} 1-0\n"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.result, "1-0");
        assert_eq!(parsed.headers.get("Event").map(String::as_str), Some("Club \"Open\""));
    }

    #[test]
    fn pgn_round_trip_custom_fen_setup() {
        let mut engine =
            GameEngine::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 7").expect("FEN should parse");
        engine.replay(["e8d7", "e2e4"]).expect("moves should replay");

        let mut headers = BTreeMap::<String, String>::new();
        headers.insert("Result".to_owned(), "*".to_owned());
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), engine.initial_state().get_fen());

        let pgn = write_pgn_with_headers(&engine, &headers);
        assert!(pgn.contains("7... Ke8-d7 8. e2-e4 *"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.engine.initial_state(), engine.initial_state());
        assert_eq!(parsed.engine.to_fen(), engine.to_fen());
    }

    #[test]
    fn en_passant_suffix_survives_a_round_trip() {
        let mut engine = GameEngine::new();
        engine
            .replay(["e2e4", "a7a6", "e4e5", "d7d5", "e5d6"])
            .expect("moves should replay");
        let pgn = write_pgn(&engine, &BTreeMap::new());
        assert!(pgn.contains("3. e5xd6 e.p. *"));
        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.engine.to_fen(), engine.to_fen());
    }

    #[test]
    fn coordinate_movetext_is_accepted() {
        let parsed = read_pgn("1. e2e4 e7e5 2. g1f3 *\n").expect("PGN should parse");
        assert_eq!(parsed.engine.long_algebraic_history(), ["e2e4", "e7e5", "g1f3"]);
    }

    #[test]
    fn illegal_movetext_is_an_error() {
        assert!(read_pgn("1. e2e5 *\n").is_err());
        assert!(read_pgn("[Event \"x]\n1. e2e4 *\n").is_err());
    }
}

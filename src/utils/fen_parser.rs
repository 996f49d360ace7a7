//! FEN-to-GameState parser.
//!
//! FEN lists ranks from the eighth down, which is exactly the board's row
//! order, so the n-th rank string fills row n.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::algebraic_to_position;

pub fn parse_fen(fen: &str) -> EngineResult<GameState> {
    let invalid = |msg: &str| EngineError::InvalidFen(format!("{msg}: {fen}"));
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let side_to_move = parse_side_to_move(side_part)?;
    Ok(GameState {
        board: parse_board(board_part)?,
        side_to_move,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_target: parse_en_passant_square(en_passant_part, side_to_move)?,
        halfmove_clock: halfmove_part
            .parse::<u16>()
            .map_err(|_| invalid("invalid halfmove clock"))?,
        fullmove_number: fullmove_part
            .parse::<u16>()
            .map_err(|_| invalid("invalid fullmove number"))?,
    })
}

fn parse_board(board_part: &str) -> EngineResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(EngineError::InvalidFen(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    let mut board = Board::empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(EngineError::InvalidFen(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                col = col.saturating_add(empty_count as u8);
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or_else(|| {
                EngineError::InvalidFen(format!("invalid piece character '{ch}'"))
            })?;
            let position = Position::new(row as u8, col).ok_or_else(|| {
                EngineError::InvalidFen(format!("rank {} has too many files", 8 - row))
            })?;
            board.set(position, Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err(EngineError::InvalidFen(format!(
                "rank {} does not sum to 8 files",
                8 - row
            )));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> EngineResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(EngineError::InvalidFen(format!(
            "invalid side-to-move field: {side_part}"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> EngineResult<CastlingRights> {
    let mut rights = CastlingRights::none();
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        let (color, side) = match ch {
            'K' => (Color::White, CastleSide::KingSide),
            'Q' => (Color::White, CastleSide::QueenSide),
            'k' => (Color::Black, CastleSide::KingSide),
            'q' => (Color::Black, CastleSide::QueenSide),
            _ => {
                return Err(EngineError::InvalidFen(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        };
        rights.grant(color, side);
    }

    Ok(rights)
}

/// The target must sit on the third rank behind a pawn that just moved, which
/// is rank 6 with White to move and rank 3 with Black to move.
fn parse_en_passant_square(
    en_passant_part: &str,
    side_to_move: Color,
) -> EngineResult<Option<Position>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    let invalid = || EngineError::InvalidFen(format!("invalid en-passant square: {en_passant_part}"));
    let square = algebraic_to_position(en_passant_part).map_err(|_| invalid())?;
    if square.row() != side_to_move.en_passant_row() {
        return Err(invalid());
    }
    Ok(Some(square))
}

pub fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}

//! Square text conversions.
//!
//! Converts between coordinates such as `e4` and engine `Position`s. Row 0 is
//! the eighth rank, so `a8` is `(0, 0)` and `h1` is `(7, 7)`.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::Position;

/// Convert algebraic text (for example: "e4") to a position.
pub fn algebraic_to_position(square: &str) -> EngineResult<Position> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(EngineError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(EngineError::InvalidSquare(square.to_owned()));
    }

    Position::new(8 - (rank - b'0'), file - b'a')
        .ok_or_else(|| EngineError::InvalidSquare(square.to_owned()))
}

/// Convert a position to algebraic text (for example: "e4").
#[inline]
pub fn position_to_algebraic(position: Position) -> String {
    position.to_string()
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_position, position_to_algebraic};
    use crate::game_state::chess_types::Position;

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_position("a8").expect("a8 should parse"), Position::new(0, 0).expect("on board"));
        assert_eq!(algebraic_to_position("h1").expect("h1 should parse"), Position::new(7, 7).expect("on board"));
        let e4 = algebraic_to_position("e4").expect("e4 should parse");
        assert_eq!((e4.row(), e4.col()), (4, 4));
        assert_eq!(position_to_algebraic(e4), "e4");
    }

    #[test]
    fn rejects_out_of_range_text() {
        assert!(algebraic_to_position("i1").is_err());
        assert!(algebraic_to_position("a9").is_err());
        assert!(algebraic_to_position("a0").is_err());
        assert!(algebraic_to_position("e").is_err());
        assert!(algebraic_to_position("e44").is_err());
    }
}

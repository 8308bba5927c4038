//! Square conversions between `(row, col)` coordinates and algebraic names.
//!
//! Row 0 is rank 8 (black's back rank) and row 7 is rank 1, so `e2` is
//! `(6, 4)`. Used by notation, repetition keys, and the text front end.

use crate::game_state::chess_types::Square;

pub const FILES: &[u8; 8] = b"abcdefgh";
pub const RANKS: &[u8; 8] = b"87654321";

/// File letter for a column.
#[inline]
pub fn file_char(col: u8) -> char {
    char::from(FILES[col as usize & 7])
}

/// Rank digit for a row.
#[inline]
pub fn rank_char(row: u8) -> char {
    char::from(RANKS[row as usize & 7])
}

/// Algebraic name of a square (for example: "e4").
#[inline]
pub fn square_name(square: Square) -> String {
    format!("{}{}", file_char(square.col), rank_char(square.row))
}

/// Convert an algebraic name (for example: "e4") to a square.
pub fn algebraic_to_square(name: &str) -> Result<Square, String> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {name}"));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    let col = file - b'a';
    let row = b'8' - rank;
    Square::new(row, col).ok_or_else(|| format!("Invalid algebraic square: {name}"))
}

//! Draw-by-repetition bookkeeping over the combined piece, section, and gap
//! state.
//!
//! A key is a FEN-like position string, a `|`, then the section layout:
//!
//! ```text
//! rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w 1111 -|1,2,3,4,...,0,12,...,gap_2_2
//! ```
//!
//! Two states repeat only when pieces, side to move, castling flags,
//! en-passant target, identities, and gap all match.

use std::collections::HashMap;

use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_rules::{BOARD_SIZE, CASTLE_LONG_DISTANCE, CASTLE_SHORT_DISTANCE};
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::utils::algebraic::square_name;

/// Castling-flag probes in key order: `(color, rook column offset from king)`.
const RIGHTS_ORDER: [(Color, i8); 4] = [
    (Color::White, CASTLE_SHORT_DISTANCE),
    (Color::White, -CASTLE_LONG_DISTANCE),
    (Color::Black, CASTLE_SHORT_DISTANCE),
    (Color::Black, -CASTLE_LONG_DISTANCE),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepetitionTracker {
    counts: HashMap<String, u8>,
}

impl RepetitionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of the current state and return its count.
    pub fn bump(
        &mut self,
        board: &BoardModel,
        side_to_move: Color,
        en_passant: Option<Square>,
    ) -> u8 {
        let key = combined_key(board, side_to_move, en_passant);
        let count = self.counts.entry(key).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn count_of(&self, board: &BoardModel, side_to_move: Color, en_passant: Option<Square>) -> u8 {
        self.counts
            .get(&combined_key(board, side_to_move, en_passant))
            .copied()
            .unwrap_or(0)
    }

    /// Highest occurrence count of any recorded state.
    pub fn max_count(&self) -> u8 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// True once any state has been seen `limit` times.
    pub fn can_claim_draw(&self, limit: u8) -> bool {
        self.max_count() >= limit
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Position and section parts joined by `|`.
pub fn combined_key(board: &BoardModel, side_to_move: Color, en_passant: Option<Square>) -> String {
    format!(
        "{}|{}",
        position_key(board, side_to_move, en_passant),
        section_key(board)
    )
}

pub fn position_key(board: &BoardModel, side_to_move: Color, en_passant: Option<Square>) -> String {
    let mut rows = Vec::with_capacity(BOARD_SIZE);
    for row in 0..BOARD_SIZE as u8 {
        let mut text = String::new();
        let mut empty = 0;
        for col in 0..BOARD_SIZE as u8 {
            match board.piece_at(Square { row, col }) {
                Some(piece) => {
                    if empty > 0 {
                        text.push_str(&empty.to_string());
                        empty = 0;
                    }
                    text.push(piece.fen_letter());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            text.push_str(&empty.to_string());
        }
        rows.push(text);
    }

    let rights: String = RIGHTS_ORDER
        .iter()
        .map(|&(color, offset)| if has_castle_pair(board, color, offset) { '1' } else { '-' })
        .collect();
    let ep = en_passant.map(square_name).unwrap_or_else(|| "-".to_owned());

    format!("{} {} {} {}", rows.join("/"), side_to_move.code(), rights, ep)
}

pub fn section_key(board: &BoardModel) -> String {
    let mut parts: Vec<String> = board
        .section_layout()
        .iter()
        .flatten()
        .map(u8::to_string)
        .collect();
    let gap = board.gap();
    parts.push(format!("gap_{}_{}", gap.row, gap.col));
    parts.join(",")
}

/// Unmoved king with an unmoved same-color rook `offset` columns away.
fn has_castle_pair(board: &BoardModel, color: Color, offset: i8) -> bool {
    let Some(king_sq) = board.find_king(color) else {
        return false;
    };
    if board.piece_at(king_sq).is_some_and(|k| k.has_moved) {
        return false;
    }
    king_sq
        .offset(0, offset)
        .and_then(|sq| board.piece_at(sq))
        .is_some_and(|rook| rook.is(PieceKind::Rook, color) && !rook.has_moved)
}

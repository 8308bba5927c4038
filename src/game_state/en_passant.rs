//! En-passant target tracking.
//!
//! The target is the square a pawn skipped over with a double step. It records
//! the color of that pawn so the reply can be told apart from the turn that
//! created it, and it follows its section when sections slide.

use crate::game_state::board_model::{BoardModel, SlideChain};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnPassantTarget {
    pub square: Square,
    /// Color of the pawn that double-stepped and may be captured.
    pub victim: Color,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnPassantTracker {
    target: Option<EnPassantTarget>,
}

impl EnPassantTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn target(&self) -> Option<EnPassantTarget> {
        self.target
    }

    #[inline]
    pub fn target_square(&self) -> Option<Square> {
        self.target.map(|t| t.square)
    }

    pub fn clear(&mut self) {
        self.target = None;
    }

    /// Record the skipped square after a two-row pawn advance.
    pub fn set_after_double_move(&mut self, from: Square, to: Square, victim: Color) {
        self.target = Some(EnPassantTarget {
            square: Square {
                row: (from.row + to.row) / 2,
                col: to.col,
            },
            victim,
        });
    }

    /// Whether a pawn of `capturer` may capture en passant onto `to`.
    ///
    /// Only the exact stored target qualifies; adjacency is the move
    /// generator's concern.
    pub fn can_capture_at(&self, board: &BoardModel, to: Square, capturer: Color) -> bool {
        match self.target {
            Some(t) => t.square == to && t.victim != capturer && !board.is_gap_square(to),
            None => false,
        }
    }

    /// Square of the pawn taken by an en-passant capture landing on `to`.
    #[inline]
    pub fn captured_square(to: Square, capturer: Color) -> Option<Square> {
        to.offset(-capturer.pawn_direction(), 0)
    }

    /// Remove the pawn captured by an en-passant move onto `to`.
    pub fn handle_capture(
        &self,
        board: &mut BoardModel,
        to: Square,
        capturer: Color,
    ) -> Option<Piece> {
        if !self.can_capture_at(board, to, capturer) {
            return None;
        }
        let victim_square = Self::captured_square(to, capturer)?;
        board.take_piece(victim_square)
    }

    /// Carry the target along with its section through a slide.
    pub fn update_after_slide(&mut self, chain: &SlideChain) {
        if let Some(t) = self.target.as_mut() {
            let section = t.square.section();
            let moved_to = chain.destination_of(section);
            if moved_to != section {
                let (i, j) = t.square.local();
                t.square = moved_to.square(i, j);
            }
        }
    }

    /// Run once per completed turn by `mover`.
    ///
    /// A target left over from the previous turn has had its one reply and is
    /// dropped. A fresh target survives only while an opposing pawn stands
    /// beside the double-stepped pawn.
    pub fn validate_and_clear_after_turn(&mut self, board: &BoardModel, mover: Color) {
        let Some(t) = self.target else {
            return;
        };
        if t.victim != mover {
            self.target = None;
            return;
        }

        let capturer = t.victim.opposite();
        let capturer_row_step = -capturer.pawn_direction();
        let has_capturer = [-1, 1].iter().any(|&d_col| {
            t.square
                .offset(capturer_row_step, d_col)
                .and_then(|sq| board.piece_at(sq))
                .is_some_and(|p| p.is(PieceKind::Pawn, capturer))
        });
        if !has_capturer {
            self.target = None;
        }
    }
}

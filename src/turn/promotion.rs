//! Queue of pawns waiting for a promotion choice.
//!
//! After a move or slide every pawn on its promotion row is queued, in the
//! order `find_back_rank_promos` reports them, and the turn stays open until
//! the queue is empty.

use std::collections::VecDeque;

use crate::errors::{SlideChessError, SlideChessResult};
use crate::game_state::board_model::{BoardModel, PromotionCandidate};
use crate::game_state::chess_types::PieceKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionQueue {
    pending: VecDeque<PromotionCandidate>,
    /// Choices made so far this turn, in resolution order.
    chosen: Vec<PieceKind>,
}

impl PromotionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new turn's queue with every candidate on `board`.
    pub fn fill_from(&mut self, board: &BoardModel) {
        self.pending = board.find_back_rank_promos().into();
        self.chosen.clear();
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pawn the next choice applies to.
    #[inline]
    pub fn front(&self) -> Option<PromotionCandidate> {
        self.pending.front().copied()
    }

    #[inline]
    pub fn chosen(&self) -> &[PieceKind] {
        &self.chosen
    }

    /// Promote the front pawn to `kind`.
    pub fn resolve_next(
        &mut self,
        board: &mut BoardModel,
        kind: PieceKind,
    ) -> SlideChessResult<PromotionCandidate> {
        if !kind.is_promotion_choice() {
            return Err(SlideChessError::InvalidPromotionPiece(kind));
        }
        let candidate = self.front().ok_or(SlideChessError::NoPromotionPending)?;
        board
            .promote(candidate.square, kind)
            .ok_or(SlideChessError::NoPromotionPending)?;

        self.pending.pop_front();
        self.chosen.push(kind);
        Ok(candidate)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.chosen.clear();
    }
}

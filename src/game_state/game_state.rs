//! Rule-relevant game state.
//!
//! `GameState` groups everything move generation needs to decide legality:
//! the board with its sections and gap, the en-passant target, and the side to
//! move. Turn bookkeeping (phase, selection, promotions, outcome) lives in the
//! turn controller and never feeds legality.

use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_types::{Color, SectionCoord, Square};
use crate::game_state::en_passant::EnPassantTracker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: BoardModel,
    pub en_passant: EnPassantTracker,
    pub side_to_move: Color,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard setup, white to move, gap at identity 11.
    #[inline]
    pub fn new_game() -> Self {
        Self::from_board(BoardModel::new_game(), Color::White)
    }

    /// Empty board with the given gap, for building test positions.
    #[inline]
    pub fn new_empty(gap: SectionCoord) -> Self {
        Self::from_board(BoardModel::empty(gap), Color::White)
    }

    #[inline]
    pub fn from_board(board: BoardModel, side_to_move: Color) -> Self {
        Self {
            board,
            en_passant: EnPassantTracker::new(),
            side_to_move,
        }
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant.target_square()
    }

    #[inline]
    pub fn gap(&self) -> SectionCoord {
        self.board.gap()
    }
}

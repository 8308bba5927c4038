//! Board snapshots and the speculative-apply guard.
//!
//! Legality checks try an action on the live board and then put it back.
//! [`SpeculativeBoard`] owns that "put it back" step: the board is restored
//! from a snapshot when the guard drops, on every exit path.

use std::ops::{Deref, DerefMut};

use crate::game_state::board_model::BoardModel;

/// Deep copy of a board, including section layout and gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot(pub(crate) BoardModel);

impl BoardSnapshot {
    pub fn board(&self) -> &BoardModel {
        &self.0
    }
}

/// Mutable view of a board that is restored when dropped.
pub struct SpeculativeBoard<'a> {
    board: &'a mut BoardModel,
    saved: BoardSnapshot,
}

impl<'a> SpeculativeBoard<'a> {
    pub fn new(board: &'a mut BoardModel) -> Self {
        let saved = board.snapshot();
        Self { board, saved }
    }
}

impl Deref for SpeculativeBoard<'_> {
    type Target = BoardModel;

    fn deref(&self) -> &BoardModel {
        self.board
    }
}

impl DerefMut for SpeculativeBoard<'_> {
    fn deref_mut(&mut self) -> &mut BoardModel {
        self.board
    }
}

impl Drop for SpeculativeBoard<'_> {
    fn drop(&mut self) {
        self.board.restore(&self.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::SpeculativeBoard;
    use crate::game_state::board_model::BoardModel;
    use crate::game_state::chess_types::{SectionCoord, Square};

    #[test]
    fn guard_restores_board_on_drop() {
        let mut board = BoardModel::new_game();
        {
            let mut trial = SpeculativeBoard::new(&mut board);
            let from = Square::new(6, 0).expect("a2");
            let to = Square::new(5, 0).expect("a3");
            trial.move_piece(from, to);
            trial
                .slide_section(SectionCoord::new(2, 1).expect("section"))
                .expect("adjacent slide");
            assert_ne!(*trial, BoardModel::new_game());
        }
        assert_eq!(board, BoardModel::new_game());
    }
}

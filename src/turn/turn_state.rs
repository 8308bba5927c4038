//! Per-turn bookkeeping owned by the turn controller.
//!
//! None of this feeds legality: move generation only sees
//! [`GameState`](crate::game_state::game_state::GameState). Everything here is
//! still part of a controller snapshot so undo and rollback restore it exactly.

use std::fmt;

use crate::game_state::chess_types::{Color, SectionCoord, SectionId, Square};
use crate::turn::promotion::PromotionQueue;
use crate::utils::notation::GameResult;

/// Which kind of action the side to move is about to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Move,
    Slide,
}

impl Phase {
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Phase::Move => Phase::Slide,
            Phase::Slide => Phase::Move,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Move => write!(f, "move"),
            Phase::Slide => write!(f, "slide"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
    DrawByRepetition { occurrences: u8 },
}

impl GameOutcome {
    pub const fn result(self) -> GameResult {
        match self {
            GameOutcome::Checkmate { winner } => GameResult::win_for(winner),
            GameOutcome::Stalemate | GameOutcome::DrawByRepetition { .. } => GameResult::Draw,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameOutcome::Stalemate => write!(f, "stalemate"),
            GameOutcome::DrawByRepetition { occurrences } => {
                write!(f, "draw by repetition ({occurrences} occurrences)")
            }
        }
    }
}

/// Coarse controller state as seen by a front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    GapSelection,
    MovePhase,
    SlidePhase,
    PromotionPending,
    Checkmate,
    Stalemate,
    Draw,
}

/// Most recent slide, for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideRecord {
    pub section: SectionId,
    /// Clicked slot, now the gap.
    pub origin: SectionCoord,
    /// Gap the chain slid into.
    pub former_gap: SectionCoord,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnState {
    pub phase: Phase,
    pub selection: Option<Square>,
    /// Legal destinations of `selection`.
    pub selection_moves: Vec<Square>,
    pub last_move: Option<(Square, Square)>,
    pub last_slide: Option<SlideRecord>,
    /// King square of the side in check, if any.
    pub check_square: Option<Square>,
    pub outcome: Option<GameOutcome>,
    pub promotions: PromotionQueue,
    pub gap_chosen: bool,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.selection_moves.clear();
    }

    pub fn controller_state(&self) -> ControllerState {
        match self.outcome {
            Some(GameOutcome::Checkmate { .. }) => ControllerState::Checkmate,
            Some(GameOutcome::Stalemate) => ControllerState::Stalemate,
            Some(GameOutcome::DrawByRepetition { .. }) => ControllerState::Draw,
            None if !self.gap_chosen => ControllerState::GapSelection,
            None if self.promotions.is_pending() => ControllerState::PromotionPending,
            None => match self.phase {
                Phase::Move => ControllerState::MovePhase,
                Phase::Slide => ControllerState::SlidePhase,
            },
        }
    }
}

//! Human-readable record of what the controller accepted and rejected.
//!
//! Front ends read the log for status lines; it is diagnostics only and is not
//! part of any snapshot.

use std::collections::VecDeque;
use std::fmt;

use crate::errors::SlideChessError;
use crate::game_state::chess_types::{Color, PieceKind, SectionCoord, Square};
use crate::turn::turn_state::{GameOutcome, Phase};
use crate::utils::algebraic::square_name;

/// Which hand the player picked when drawing for the starting gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapHand {
    Left,
    Right,
}

/// Pawn found in the chosen hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapDraw {
    /// Gap stays on the primary slot.
    WhitePawn,
    /// Gap moves to the alternate slot.
    BlackPawn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    GapChosen {
        hand: Option<GapHand>,
        draw: GapDraw,
        gap: SectionCoord,
    },
    Selected {
        square: Square,
        destinations: usize,
    },
    PhaseChanged(Phase),
    TurnCompleted {
        color: Color,
        notation: String,
    },
    PromotionRequested {
        count: usize,
    },
    Promoted {
        square: Square,
        kind: PieceKind,
    },
    RolledBack,
    Rejected(SlideChessError),
    GameEnded(GameOutcome),
    Undone,
    Reset,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::GapChosen { hand, draw, gap } => {
                let pawn = match draw {
                    GapDraw::WhitePawn => "white",
                    GapDraw::BlackPawn => "black",
                };
                match hand {
                    Some(hand) => write!(f, "{hand:?} hand holds the {pawn} pawn; gap at {gap}"),
                    None => write!(f, "{pawn} pawn drawn; gap at {gap}"),
                }
            }
            GameEvent::Selected {
                square,
                destinations,
            } => write!(
                f,
                "selected {} ({destinations} legal moves)",
                square_name(*square)
            ),
            GameEvent::PhaseChanged(phase) => write!(f, "{phase} phase"),
            GameEvent::TurnCompleted { color, notation } => write!(f, "{color} played {notation}"),
            GameEvent::PromotionRequested { count } => {
                write!(f, "choose a promotion piece ({count} pending)")
            }
            GameEvent::Promoted { square, kind } => {
                write!(f, "{} promoted to {kind:?}", square_name(*square))
            }
            GameEvent::RolledBack => write!(f, "turn rolled back"),
            GameEvent::Rejected(err) => write!(f, "rejected: {err}"),
            GameEvent::GameEnded(outcome) => write!(f, "game over: {outcome}"),
            GameEvent::Undone => write!(f, "last turn undone"),
            GameEvent::Reset => write!(f, "game reset"),
        }
    }
}

/// Event log keeping the newest `capacity` entries.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: VecDeque<GameEvent>,
    capacity: usize,
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    pub fn push(&mut self, event: GameEvent) {
        if self.capacity == 0 {
            return;
        }
        while self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    #[inline]
    pub fn last(&self) -> Option<&GameEvent> {
        self.events.back()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Lines for display, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

//! Errors returned by the board model and the turn controller.
//!
//! Every variant describes an intent that was rejected without changing game
//! state. They group into four families:
//! - illegal intents (a move or slide outside the legal set),
//! - self-check violations (the action would leave the mover's king attacked),
//! - missing preconditions (gap not chosen, promotion pending, game over),
//! - structural impossibilities (a corrupted board or snapshot).

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::{PieceKind, SectionCoord, SectionId, Square};
use crate::utils::algebraic::square_name;

pub type SlideChessResult<T> = Result<T, SlideChessError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideChessError {
    /// No piece of the side to move stands on the square.
    NotYourPiece(Square),
    /// The destination is not among the piece's legal moves.
    IllegalMove { from: Square, to: Square },
    /// The section is not reachable by a slide toward the gap.
    NotASlideTarget(SectionCoord),
    /// Moves are only accepted in the move phase, slides in the slide phase.
    WrongPhase,
    /// The slide is recognized but would leave the mover in check.
    SlideLeavesKingInCheck { section: SectionId },
    /// Resolving the queued promotions left the mover in check; the whole turn
    /// was rolled back.
    PromotionLeavesKingInCheck,
    GapNotChosen,
    GapAlreadyChosen,
    PromotionPending,
    NoPromotionPending,
    InvalidPromotionPiece(PieceKind),
    GameOver,
    NothingToUndo,
    /// The square lies inside the gap's footprint.
    SquareInGap(Square),
    /// The slide chain does not describe a contiguous line ending at the gap.
    InvalidSlideChain,
    /// The gap cannot be relocated onto a section holding pieces.
    GapNotEmpty(SectionCoord),
}

impl fmt::Display for SlideChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlideChessError::NotYourPiece(sq) => {
                write!(f, "no piece of the side to move on {}", square_name(*sq))
            }
            SlideChessError::IllegalMove { from, to } => write!(
                f,
                "illegal move {}-{}",
                square_name(*from),
                square_name(*to)
            ),
            SlideChessError::NotASlideTarget(coord) => {
                write!(f, "section {coord} cannot slide into the gap")
            }
            SlideChessError::WrongPhase => write!(f, "action not allowed in the current phase"),
            SlideChessError::SlideLeavesKingInCheck { section } => {
                write!(f, "Sliding section {section} would put your king in check.")
            }
            SlideChessError::PromotionLeavesKingInCheck => {
                write!(f, "promotion leaves the king in check; move undone")
            }
            SlideChessError::GapNotChosen => write!(f, "the starting gap has not been chosen"),
            SlideChessError::GapAlreadyChosen => write!(f, "the starting gap is already chosen"),
            SlideChessError::PromotionPending => write!(f, "a promotion choice is pending"),
            SlideChessError::NoPromotionPending => write!(f, "no promotion is pending"),
            SlideChessError::InvalidPromotionPiece(kind) => {
                write!(f, "cannot promote to {kind:?}")
            }
            SlideChessError::GameOver => write!(f, "the game is over"),
            SlideChessError::NothingToUndo => write!(f, "nothing to undo"),
            SlideChessError::SquareInGap(sq) => {
                write!(f, "square {} lies in the gap", square_name(*sq))
            }
            SlideChessError::InvalidSlideChain => write!(f, "invalid slide chain"),
            SlideChessError::GapNotEmpty(coord) => {
                write!(f, "section {coord} holds pieces and cannot become the gap")
            }
        }
    }
}

impl Error for SlideChessError {}

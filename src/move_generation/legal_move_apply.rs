//! Apply piece moves and slides to the board.
//!
//! `apply_move` performs every board effect of a generated move: the piece
//! relocation, the en-passant pawn removal, and the castling rook jump. It is
//! used for real moves and under a speculative guard for legality checks, so
//! both paths see identical effects.

use crate::errors::{SlideChessError, SlideChessResult};
use crate::game_state::board_model::{BoardModel, SlideChain};
use crate::game_state::chess_types::{Piece, PieceKind};
use crate::game_state::en_passant::EnPassantTracker;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::{GeneratedMove, MoveKind};

/// Result of applying a piece move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub mv: GeneratedMove,
    /// Moving piece as it stood before the move.
    pub piece: Piece,
    /// Piece removed from the board, including an en-passant victim.
    pub captured: Option<Piece>,
}

/// Board effects of `mv`. En-passant removal goes through the tracker, which
/// only fires on its exact target.
pub fn apply_move(
    board: &mut BoardModel,
    en_passant: &EnPassantTracker,
    mv: &GeneratedMove,
) -> SlideChessResult<AppliedMove> {
    let piece = board
        .piece_at(mv.from)
        .ok_or(SlideChessError::NotYourPiece(mv.from))?;
    if board.is_gap_square(mv.to) {
        return Err(SlideChessError::SquareInGap(mv.to));
    }

    let mut captured = board.move_piece(mv.from, mv.to);
    match mv.kind {
        MoveKind::EnPassant { .. } => {
            captured = en_passant.handle_capture(board, mv.to, piece.color);
        }
        MoveKind::Castle {
            rook_from, rook_to, ..
        } => {
            board.move_piece(rook_from, rook_to);
        }
        MoveKind::Normal | MoveKind::DoubleStep => {}
    }

    Ok(AppliedMove {
        mv: *mv,
        piece,
        captured,
    })
}

/// Apply a move to the full state: board effects plus the en-passant target
/// it creates or clears. Side to move is left to the caller.
pub fn apply_move_to_state(
    state: &mut GameState,
    mv: &GeneratedMove,
) -> SlideChessResult<AppliedMove> {
    let applied = apply_move(&mut state.board, &state.en_passant, mv)?;
    if mv.kind == MoveKind::DoubleStep && applied.piece.kind == PieceKind::Pawn {
        state
            .en_passant
            .set_after_double_move(mv.from, mv.to, applied.piece.color);
    } else {
        state.en_passant.clear();
    }
    Ok(applied)
}

/// Apply a slide chain, carrying the en-passant target with its section.
pub fn apply_slide_to_state(state: &mut GameState, chain: &SlideChain) -> SlideChessResult<()> {
    state.board.multi_slide_section(chain)?;
    state.en_passant.update_after_slide(chain);
    Ok(())
}

//! Attack and check detection.
//!
//! Attacks reuse each piece's raw movement pattern without legality filtering.
//! Rays stop at the gap exactly as they do for normal movement, and nothing
//! attacks a square inside the gap.

use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{
    ray_reaches, BISHOP_DIRECTIONS, KING_STEPS, KNIGHT_STEPS, ROOK_DIRECTIONS,
};

#[inline]
pub fn king_square(board: &BoardModel, color: Color) -> Option<Square> {
    board.find_king(color)
}

/// A missing king is never in check.
#[inline]
pub fn is_king_in_check(board: &BoardModel, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

pub fn is_square_attacked(board: &BoardModel, square: Square, attacker_color: Color) -> bool {
    if board.is_gap_square(square) {
        return false;
    }
    board
        .pieces_of(attacker_color)
        .any(|(from, piece)| piece_attacks(board, from, piece, square))
}

/// Pieces of `attacker_color` attacking `square`.
pub fn attackers_to_square(
    board: &BoardModel,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    if board.is_gap_square(square) {
        return Vec::new();
    }
    board
        .pieces_of(attacker_color)
        .filter(|(from, piece)| piece_attacks(board, *from, *piece, square))
        .map(|(from, piece)| (from, piece.kind))
        .collect()
}

fn piece_attacks(board: &BoardModel, from: Square, piece: Piece, target: Square) -> bool {
    let hits_step = |steps: &[(i8, i8)]| {
        steps
            .iter()
            .any(|&(d_row, d_col)| from.offset(d_row, d_col) == Some(target))
    };

    match piece.kind {
        PieceKind::Pawn => {
            let dir = piece.color.pawn_direction();
            hits_step(&[(dir, -1), (dir, 1)])
        }
        PieceKind::Knight => hits_step(&KNIGHT_STEPS),
        PieceKind::King => hits_step(&KING_STEPS),
        PieceKind::Bishop => ray_reaches(board, from, target, &BISHOP_DIRECTIONS),
        PieceKind::Rook => ray_reaches(board, from, target, &ROOK_DIRECTIONS),
        PieceKind::Queen => {
            ray_reaches(board, from, target, &ROOK_DIRECTIONS)
                || ray_reaches(board, from, target, &BISHOP_DIRECTIONS)
        }
    }
}

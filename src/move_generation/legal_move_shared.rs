//! Shared move types and geometry helpers for the per-piece generators.

use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_types::{Color, Square};

pub const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Castle flavor, chosen by the rook's distance from the king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleKind {
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    /// Two-row pawn advance from an unmoved pawn.
    DoubleStep,
    /// Diagonal pawn capture onto the en-passant target; `captured` holds the
    /// taken pawn's square.
    EnPassant { captured: Square },
    Castle {
        kind: CastleKind,
        rook_from: Square,
        rook_to: Square,
    },
}

/// Pseudo-legal or legal piece move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneratedMove {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl GeneratedMove {
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Normal,
        }
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle { .. })
    }
}

/// Square a piece of `color` may land on: inside the gap or own-occupied
/// squares are excluded.
#[inline]
pub fn is_landable(board: &BoardModel, to: Square, color: Color) -> bool {
    !board.is_gap_square(to) && !matches!(board.piece_at(to), Some(p) if p.color == color)
}

/// Push single-step destinations (knight jumps, king steps).
pub fn push_step_moves(
    board: &BoardModel,
    from: Square,
    color: Color,
    steps: &[(i8, i8)],
    out: &mut Vec<GeneratedMove>,
) {
    for &(d_row, d_col) in steps {
        if let Some(to) = from.offset(d_row, d_col) {
            if is_landable(board, to, color) {
                out.push(GeneratedMove::normal(from, to));
            }
        }
    }
}

/// Push ray destinations. Each ray stops before the gap or on the first
/// occupied square, which is included when it holds an enemy.
pub fn push_ray_moves(
    board: &BoardModel,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<GeneratedMove>,
) {
    for &(d_row, d_col) in directions {
        let mut current = from.offset(d_row, d_col);
        while let Some(to) = current {
            if board.is_gap_square(to) {
                break;
            }
            match board.piece_at(to) {
                Some(piece) => {
                    if piece.color != color {
                        out.push(GeneratedMove::normal(from, to));
                    }
                    break;
                }
                None => out.push(GeneratedMove::normal(from, to)),
            }
            current = to.offset(d_row, d_col);
        }
    }
}

/// Whether a ray from `from` reaches `target` without crossing the gap or a
/// blocker.
pub fn ray_reaches(board: &BoardModel, from: Square, target: Square, directions: &[(i8, i8)]) -> bool {
    let d_row = target.row as i8 - from.row as i8;
    let d_col = target.col as i8 - from.col as i8;
    let step = (d_row.signum(), d_col.signum());
    let aligned = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
    if !aligned || !directions.contains(&step) {
        return false;
    }
    if board.is_gap_square(target) || board.is_gap_between(from, target) {
        return false;
    }

    let mut current = from.offset(step.0, step.1);
    while let Some(sq) = current {
        if sq == target {
            return true;
        }
        if board.piece_at(sq).is_some() {
            return false;
        }
        current = sq.offset(step.0, step.1);
    }
    false
}

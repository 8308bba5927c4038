use crate::game_state::chess_rules::{
    CASTLE_KING_STEP, CASTLE_LONG_DISTANCE, CASTLE_SHORT_DISTANCE,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::move_generation::legal_move_shared::{
    push_step_moves, CastleKind, GeneratedMove, MoveKind, KING_STEPS, ROOK_DIRECTIONS,
};

pub fn generate_king_moves(
    game_state: &GameState,
    from: Square,
    king: Piece,
    out: &mut Vec<GeneratedMove>,
) {
    push_step_moves(&game_state.board, from, king.color, &KING_STEPS, out);

    // Cannot castle with a moved king or out of check.
    if king.has_moved || is_king_in_check(&game_state.board, king.color) {
        return;
    }

    for direction in ROOK_DIRECTIONS {
        for (kind, distance) in [
            (CastleKind::Short, CASTLE_SHORT_DISTANCE),
            (CastleKind::Long, CASTLE_LONG_DISTANCE),
        ] {
            if let Some(mv) = castle_move(game_state, from, king.color, direction, kind, distance) {
                out.push(mv);
            }
        }
    }
}

/// Castle toward `direction` with a rook `distance` squares away, if allowed.
///
/// The king steps two squares toward the rook and the rook lands on the square
/// the king passed over.
fn castle_move(
    game_state: &GameState,
    from: Square,
    color: Color,
    (d_row, d_col): (i8, i8),
    kind: CastleKind,
    distance: i8,
) -> Option<GeneratedMove> {
    let board = &game_state.board;

    let rook_from = from.offset(d_row * distance, d_col * distance)?;
    let rook = board.piece_at(rook_from)?;
    if !rook.is(PieceKind::Rook, color) || rook.has_moved {
        return None;
    }

    if board.is_gap_between(from, rook_from) {
        return None;
    }
    for step in 1..distance {
        let sq = from.offset(d_row * step, d_col * step)?;
        if board.piece_at(sq).is_some() {
            return None;
        }
    }

    for step in 1..=CASTLE_KING_STEP {
        let sq = from.offset(d_row * step, d_col * step)?;
        if is_square_attacked(board, sq, color.opposite()) {
            return None;
        }
    }

    let to = from.offset(d_row * CASTLE_KING_STEP, d_col * CASTLE_KING_STEP)?;
    let rook_to = to.offset(-d_row, -d_col)?;
    Some(GeneratedMove {
        from,
        to,
        kind: MoveKind::Castle {
            kind,
            rook_from,
            rook_to,
        },
    })
}

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_step_moves, GeneratedMove, KNIGHT_STEPS};

/// Knights jump freely; only the landing square must be outside the gap.
pub fn generate_knight_moves(
    game_state: &GameState,
    from: Square,
    knight: Piece,
    out: &mut Vec<GeneratedMove>,
) {
    push_step_moves(&game_state.board, from, knight.color, &KNIGHT_STEPS, out);
}

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{
    push_ray_moves, GeneratedMove, BISHOP_DIRECTIONS, ROOK_DIRECTIONS,
};

pub fn generate_queen_moves(
    game_state: &GameState,
    from: Square,
    queen: Piece,
    out: &mut Vec<GeneratedMove>,
) {
    push_ray_moves(&game_state.board, from, queen.color, &ROOK_DIRECTIONS, out);
    push_ray_moves(&game_state.board, from, queen.color, &BISHOP_DIRECTIONS, out);
}

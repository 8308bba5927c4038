use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_ray_moves, GeneratedMove, BISHOP_DIRECTIONS};

pub fn generate_bishop_moves(
    game_state: &GameState,
    from: Square,
    bishop: Piece,
    out: &mut Vec<GeneratedMove>,
) {
    push_ray_moves(&game_state.board, from, bishop.color, &BISHOP_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_bishop_moves;
    use crate::game_state::chess_rules::PRIMARY_GAP;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
    use crate::game_state::game_state::GameState;

    #[test]
    fn diagonal_stops_at_the_gap_boundary() {
        let mut state = GameState::new_empty(PRIMARY_GAP);
        let from = Square { row: 7, col: 2 };
        let bishop = Piece::new(PieceKind::Bishop, Color::White);
        state.board.place_piece(from, bishop).expect("placed");

        let mut out = Vec::new();
        generate_bishop_moves(&state, from, bishop, &mut out);
        let targets: Vec<Square> = out.iter().map(|m| m.to).collect();

        // Up-right reaches d2 only; e3 sits in the gap.
        assert!(targets.contains(&Square { row: 6, col: 3 }));
        assert!(!targets.contains(&Square { row: 5, col: 4 }));
        assert!(!targets.contains(&Square { row: 4, col: 5 }));
        // Up-left runs to the edge.
        assert!(targets.contains(&Square { row: 5, col: 0 }));
        assert_eq!(targets.len(), 3);
    }
}

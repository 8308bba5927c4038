use crate::game_state::en_passant::EnPassantTracker;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{GeneratedMove, MoveKind};

/// Pawn pushes, double steps, diagonal captures, and en passant.
///
/// A double step only needs an unmoved pawn, since slides can carry pawns
/// away from their starting rank.
pub fn generate_pawn_moves(
    game_state: &GameState,
    from: Square,
    pawn: Piece,
    out: &mut Vec<GeneratedMove>,
) {
    let board = &game_state.board;
    let dir = pawn.color.pawn_direction();
    let is_open = |sq: Square| !board.is_gap_square(sq) && board.piece_at(sq).is_none();

    if let Some(one) = from.offset(dir, 0).filter(|sq| is_open(*sq)) {
        out.push(GeneratedMove::normal(from, one));

        if !pawn.has_moved {
            if let Some(two) = one.offset(dir, 0).filter(|sq| is_open(*sq)) {
                out.push(GeneratedMove {
                    from,
                    to: two,
                    kind: MoveKind::DoubleStep,
                });
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(to) = from.offset(dir, d_col) else {
            continue;
        };
        if board.is_gap_square(to) {
            continue;
        }

        match board.piece_at(to) {
            Some(target) if target.color != pawn.color => out.push(GeneratedMove::normal(from, to)),
            Some(_) => {}
            None => {
                if !game_state.en_passant.can_capture_at(board, to, pawn.color) {
                    continue;
                }
                let Some(captured) = EnPassantTracker::captured_square(to, pawn.color) else {
                    continue;
                };
                let victim = pawn.color.opposite();
                if board
                    .piece_at(captured)
                    .is_some_and(|p| p.is(PieceKind::Pawn, victim))
                {
                    out.push(GeneratedMove {
                        from,
                        to,
                        kind: MoveKind::EnPassant { captured },
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::chess_rules::ALTERNATE_GAP;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_shared::MoveKind;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("test square on board")
    }

    fn destinations(state: &GameState, from: Square) -> Vec<Square> {
        let pawn = state.board.piece_at(from).expect("pawn on square");
        let mut out = Vec::new();
        generate_pawn_moves(state, from, pawn, &mut out);
        out.iter().map(|m| m.to).collect()
    }

    #[test]
    fn gap_blocks_pushes_in_the_start_position() {
        let state = GameState::new_game();
        // e2 pushes straight into the gap footprint.
        assert!(destinations(&state, sq(6, 4)).is_empty());
        assert_eq!(destinations(&state, sq(6, 0)), vec![sq(5, 0), sq(4, 0)]);
    }

    #[test]
    fn double_step_needs_an_unmoved_pawn_not_a_start_rank() {
        let mut state = GameState::new_empty(ALTERNATE_GAP);
        let fresh = Piece::new(PieceKind::Pawn, Color::White);
        state.board.place_piece(sq(5, 0), fresh).expect("placed");
        state.board.place_piece(sq(5, 1), fresh.moved()).expect("placed");

        assert_eq!(destinations(&state, sq(5, 0)), vec![sq(4, 0), sq(3, 0)]);
        assert_eq!(destinations(&state, sq(5, 1)), vec![sq(4, 1)]);
    }

    #[test]
    fn en_passant_requires_target_and_victim_pawn() {
        let mut state = GameState::new_empty(ALTERNATE_GAP);
        let white = Piece::new(PieceKind::Pawn, Color::White).moved();
        let black = Piece::new(PieceKind::Pawn, Color::Black).moved();
        state.board.place_piece(sq(4, 1), white).expect("placed");
        state.board.place_piece(sq(4, 0), black).expect("placed");

        assert_eq!(destinations(&state, sq(4, 0)), vec![sq(5, 0)]);

        state
            .en_passant
            .set_after_double_move(sq(6, 1), sq(4, 1), Color::White);
        let pawn = state.board.piece_at(sq(4, 0)).expect("black pawn");
        let mut out = Vec::new();
        generate_pawn_moves(&state, sq(4, 0), pawn, &mut out);
        assert!(out.iter().any(|m| m.to == sq(5, 1)
            && m.kind == MoveKind::EnPassant { captured: sq(4, 1) }));

        state.board.take_piece(sq(4, 1));
        assert_eq!(destinations(&state, sq(4, 0)), vec![sq(5, 0)]);
    }
}

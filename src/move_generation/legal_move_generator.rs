//! Full legal move generation pipeline.
//!
//! Per-piece generators produce pseudo-legal moves. Each candidate is then
//! applied under a [`SpeculativeBoard`] guard and kept only when the mover's
//! king is not attacked afterwards. The guard restores the board on drop, so
//! no legality test leaves observable side effects.

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::game_state::undo_state::SpeculativeBoard;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_shared::GeneratedMove;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::legal_slides::legal_slide_targets;

/// Pseudo-legal moves of the piece on `from`, whatever its color.
pub fn pseudo_legal_moves(game_state: &GameState, from: Square) -> Vec<GeneratedMove> {
    let mut out = Vec::with_capacity(32);
    let Some(piece) = game_state.board.piece_at(from) else {
        return out;
    };

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(game_state, from, piece, &mut out),
        PieceKind::Knight => generate_knight_moves(game_state, from, piece, &mut out),
        PieceKind::Bishop => generate_bishop_moves(game_state, from, piece, &mut out),
        PieceKind::Rook => generate_rook_moves(game_state, from, piece, &mut out),
        PieceKind::Queen => generate_queen_moves(game_state, from, piece, &mut out),
        PieceKind::King => generate_king_moves(game_state, from, piece, &mut out),
    }
    out
}

/// Whether `mv` leaves the moving side's king unattacked.
pub fn move_is_legal(game_state: &mut GameState, mv: &GeneratedMove) -> bool {
    let Some(mover) = game_state.board.piece_at(mv.from).map(|p| p.color) else {
        return false;
    };

    let mut trial = SpeculativeBoard::new(&mut game_state.board);
    if apply_move(&mut trial, &game_state.en_passant, mv).is_err() {
        return false;
    }
    !is_king_in_check(&trial, mover)
}

/// Legal moves of the piece on `from`.
pub fn legal_moves_from(game_state: &mut GameState, from: Square) -> Vec<GeneratedMove> {
    let mut moves = pseudo_legal_moves(game_state, from);
    moves.retain(|mv| move_is_legal(game_state, mv));
    moves
}

/// Legal destination squares of the piece on `from`.
pub fn legal_destinations(game_state: &mut GameState, from: Square) -> Vec<Square> {
    legal_moves_from(game_state, from)
        .into_iter()
        .map(|mv| mv.to)
        .collect()
}

/// Every legal piece move for `color`.
pub fn all_legal_moves(game_state: &mut GameState, color: Color) -> Vec<GeneratedMove> {
    let origins: Vec<Square> = game_state
        .board
        .pieces_of(color)
        .map(|(sq, _)| sq)
        .collect();

    let mut moves = Vec::with_capacity(64);
    for from in origins {
        moves.extend(legal_moves_from(game_state, from));
    }
    moves
}

/// Whether `color` has any legal action in either phase.
///
/// Both phases count: a player may switch to sliding mid-turn, so a slide
/// that escapes check prevents mate.
pub fn has_any_legal_move(game_state: &mut GameState, color: Color) -> bool {
    let origins: Vec<Square> = game_state
        .board
        .pieces_of(color)
        .map(|(sq, _)| sq)
        .collect();

    for from in origins {
        if !legal_moves_from(game_state, from).is_empty() {
            return true;
        }
    }
    !legal_slide_targets(game_state, color).legal.is_empty()
}

#[cfg(test)]
mod tests {
    use super::{all_legal_moves, has_any_legal_move, legal_destinations, move_is_legal};
    use crate::game_state::chess_rules::{ALTERNATE_GAP, PRIMARY_GAP};
    use crate::game_state::chess_types::{Color, Piece, PieceKind, SectionCoord, Square};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_checks::is_king_in_check;
    use crate::move_generation::legal_move_shared::GeneratedMove;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("test square on board")
    }

    fn place(state: &mut GameState, at: Square, kind: PieceKind, color: Color) {
        state
            .board
            .place_piece(at, Piece::new(kind, color))
            .expect("placed");
    }

    #[test]
    fn start_position_gap_costs_white_five_moves() {
        let mut state = GameState::new_game();
        // e2, f2 and the g1 knight's f3 jump all run into the gap.
        assert_eq!(all_legal_moves(&mut state, Color::White).len(), 15);
        assert_eq!(all_legal_moves(&mut state, Color::Black).len(), 20);
        assert_eq!(state, GameState::new_game());
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let mut state = GameState::new_empty(ALTERNATE_GAP);
        place(&mut state, sq(7, 0), PieceKind::King, Color::White);
        place(&mut state, sq(6, 0), PieceKind::Knight, Color::White);
        place(&mut state, sq(0, 0), PieceKind::Rook, Color::Black);
        place(&mut state, sq(0, 7), PieceKind::King, Color::Black);

        assert!(legal_destinations(&mut state, sq(6, 0)).is_empty());
        let before = state.clone();
        assert!(!move_is_legal(
            &mut state,
            &GeneratedMove::normal(sq(6, 0), sq(4, 1))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn legal_moves_never_leave_the_king_attacked() {
        let mut state = GameState::new_empty(PRIMARY_GAP);
        place(&mut state, sq(7, 4), PieceKind::King, Color::White);
        place(&mut state, sq(0, 3), PieceKind::Rook, Color::Black);
        place(&mut state, sq(0, 0), PieceKind::King, Color::Black);

        for mv in all_legal_moves(&mut state, Color::White) {
            let mut next = state.clone();
            next.board.move_piece(mv.from, mv.to);
            assert!(!is_king_in_check(&next.board, Color::White), "{mv:?}");
        }
    }

    #[test]
    fn slide_escape_counts_as_a_legal_action() {
        // White king boxed into the corner by its own pawns, checked along the
        // back rank. No piece move helps, but sliding section (3, 1) up puts
        // the gap on c1/d1 and breaks the rook's line.
        let mut state = GameState::new_empty(SectionCoord::new(2, 1).expect("gap"));
        place(&mut state, sq(7, 0), PieceKind::King, Color::White);
        place(&mut state, sq(6, 0), PieceKind::Pawn, Color::White);
        place(&mut state, sq(6, 1), PieceKind::Pawn, Color::White);
        place(&mut state, sq(7, 7), PieceKind::Rook, Color::Black);
        place(&mut state, sq(0, 7), PieceKind::King, Color::Black);

        assert!(is_king_in_check(&state.board, Color::White));
        assert!(all_legal_moves(&mut state, Color::White).is_empty());
        assert!(has_any_legal_move(&mut state, Color::White));
    }
}

//! Terminal-oriented Unicode board renderer.
//!
//! Draws the squares row 0 (rank 8) first, leaves the gap's squares blank and
//! lists section identities by slot, for debugging and the text front end.

use crate::game_state::board_model::BoardModel;
use crate::game_state::chess_rules::{BOARD_SIZE, SECTIONS_PER_SIDE};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::{file_char, rank_char, square_name};

/// Render the board to a Unicode string for terminal output.
pub fn render_board(board: &BoardModel) -> String {
    let mut out = String::new();
    let files: String = (0..BOARD_SIZE as u8)
        .map(|col| format!("{} ", file_char(col)))
        .collect();
    let files = format!("  {}", files.trim_end());

    out.push_str(&files);
    out.push('\n');

    for row in 0..BOARD_SIZE as u8 {
        out.push(rank_char(row));
        out.push(' ');

        for col in 0..BOARD_SIZE as u8 {
            let square = Square { row, col };
            let glyph = if board.is_gap_square(square) {
                ' '
            } else {
                board.piece_at(square).map_or('·', piece_to_unicode)
            };
            out.push(glyph);

            if (col as usize) < BOARD_SIZE - 1 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_char(row));
        out.push('\n');
    }

    out.push_str(&files);
    out
}

/// Section identities by slot, `--` for the gap.
pub fn render_section_layout(board: &BoardModel) -> String {
    let layout = board.section_layout();
    let mut lines = Vec::with_capacity(SECTIONS_PER_SIDE);
    for row in layout {
        let cells: Vec<String> = row
            .iter()
            .map(|id| match id {
                0 => "--".to_owned(),
                id => format!("{id:>2}"),
            })
            .collect();
        lines.push(cells.join(" "));
    }
    lines.join("\n")
}

/// Board, section layout and side to move.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = render_board(&game_state.board);
    out.push_str("\n\nSections:\n");
    out.push_str(&render_section_layout(&game_state.board));
    out.push_str(&format!(
        "\n\nGap: {}  To move: {}",
        game_state.gap(),
        game_state.side_to_move
    ));
    if let Some(target) = game_state.en_passant_square() {
        out.push_str(&format!("  En passant: {}", square_name(target)));
    }
    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

//! Rule constants for slide chess.
//!
//! Board geometry, the two candidate starting gaps, castling distances, and the
//! repetition threshold used by the turn controller.

use crate::game_state::chess_types::{PieceKind, SectionCoord};

pub const BOARD_SIZE: usize = 8;
pub const SECTION_SIZE: usize = 2;
pub const SECTIONS_PER_SIDE: usize = BOARD_SIZE / SECTION_SIZE;

/// A slide may move at most this many sections in one line.
pub const MAX_SLIDE_DISTANCE: u8 = (SECTIONS_PER_SIDE - 1) as u8;

/// Default gap: section identity 11.
pub const PRIMARY_GAP: SectionCoord = SectionCoord { row: 2, col: 2 };

/// Gap used when the black pawn is drawn: section identity 7.
pub const ALTERNATE_GAP: SectionCoord = SectionCoord { row: 1, col: 2 };

/// King travel when castling, in every direction.
pub const CASTLE_KING_STEP: i8 = 2;

/// Rook distance for the short castle (`O-O`).
pub const CASTLE_SHORT_DISTANCE: i8 = 3;

/// Rook distance for the long castle (`O-O-O`).
pub const CASTLE_LONG_DISTANCE: i8 = 4;

/// Occurrences of one repetition key that end the game in a draw.
pub const REPETITION_LIMIT: u8 = 3;

/// Back rank layout from column 0 to 7.
pub const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Pieces a pawn may be promoted to, in menu order.
pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

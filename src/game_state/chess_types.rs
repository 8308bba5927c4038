//! Core value types shared by the board model, move generation, and the turn
//! controller.
//!
//! Squares are addressed by `(row, col)` with row 0 being black's back rank and
//! row 7 white's. Sections are the sixteen 2×2 blocks addressed by
//! `(section row, section col)`, each carrying a persistent identity.

use std::fmt;

use crate::game_state::chess_rules::{BOARD_SIZE, SECTIONS_PER_SIDE, SECTION_SIZE};

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row step a pawn of this color advances by.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row a pawn of this color promotes on.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => (BOARD_SIZE - 1) as u8,
        }
    }

    /// Single-letter code used in repetition keys.
    #[inline]
    pub const fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Piece kind (color is stored alongside in [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase letter, `p n b r q k`.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse a promotion choice letter (case-insensitive).
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

/// A piece as owned by the board cell it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    #[inline]
    pub const fn moved(self) -> Self {
        Self {
            has_moved: true,
            ..self
        }
    }

    #[inline]
    pub fn is(self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }

    /// FEN-style letter: uppercase for white.
    pub fn fen_letter(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }
}

/// Board square, `row` and `col` in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Checked constructor.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Step by a signed delta, `None` when leaving the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i16 + d_row as i16;
        let col = self.col as i16 + d_col as i16;
        if (0..BOARD_SIZE as i16).contains(&row) && (0..BOARD_SIZE as i16).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Section containing this square.
    #[inline]
    pub fn section(self) -> SectionCoord {
        SectionCoord {
            row: self.row / SECTION_SIZE as u8,
            col: self.col / SECTION_SIZE as u8,
        }
    }

    /// Position inside the containing section, `(0|1, 0|1)`.
    #[inline]
    pub fn local(self) -> (usize, usize) {
        (
            self.row as usize % SECTION_SIZE,
            self.col as usize % SECTION_SIZE,
        )
    }

    /// Iterate all 64 squares row-major.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8).flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Square { row, col }))
    }
}

/// Section coordinate, `row` and `col` in `0..4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionCoord {
    pub row: u8,
    pub col: u8,
}

impl SectionCoord {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < SECTIONS_PER_SIDE && (col as usize) < SECTIONS_PER_SIDE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i16 + d_row as i16;
        let col = self.col as i16 + d_col as i16;
        if (0..SECTIONS_PER_SIDE as i16).contains(&row) && (0..SECTIONS_PER_SIDE as i16).contains(&col)
        {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Square at local offset `(i, j)` inside this section.
    #[inline]
    pub fn square(self, i: usize, j: usize) -> Square {
        Square {
            row: self.row * SECTION_SIZE as u8 + i as u8,
            col: self.col * SECTION_SIZE as u8 + j as u8,
        }
    }

    /// The four squares of this section.
    pub fn squares(self) -> [Square; 4] {
        [
            self.square(0, 0),
            self.square(0, 1),
            self.square(1, 0),
            self.square(1, 1),
        ]
    }

    pub fn all() -> impl Iterator<Item = SectionCoord> {
        (0..SECTIONS_PER_SIDE as u8)
            .flat_map(|row| (0..SECTIONS_PER_SIDE as u8).map(move |col| SectionCoord { row, col }))
    }
}

impl fmt::Display for SectionCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Persistent section identity, `1..=16`, travelling with the section's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(u8);

impl SectionId {
    pub fn new(id: u8) -> Option<Self> {
        if (1..=(SECTIONS_PER_SIDE * SECTIONS_PER_SIDE) as u8).contains(&id) {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Identity originally numbered at `coord` (row-major from 1).
    #[inline]
    pub fn home(coord: SectionCoord) -> Self {
        Self(coord.row * SECTIONS_PER_SIDE as u8 + coord.col + 1)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

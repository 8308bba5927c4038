//! Board model: the 8×8 piece grid split into sixteen 2×2 sections.
//!
//! Section contents live in an arena indexed by section identity, and a 4×4
//! coordinate index maps each slot to the identity currently sitting there.
//! Sliding a section therefore re-keys the index instead of copying pieces, and
//! the identity travels with its contents for free. Exactly one slot of the
//! index is empty at any time: the gap.
//!
//! None of the mutators here check chess legality; that is the job of
//! `move_generation`. They only keep the structural invariants intact:
//! - exactly one gap, and it is the only empty slot of the index,
//! - the placed identities are a permutation of `1..=16` minus one,
//! - no piece is ever reachable inside the gap's footprint.

use crate::errors::{SlideChessError, SlideChessResult};
use crate::game_state::chess_rules::{
    BACK_RANK, BOARD_SIZE, MAX_SLIDE_DISTANCE, PRIMARY_GAP, SECTIONS_PER_SIDE, SECTION_SIZE,
};
use crate::game_state::chess_types::{Color, Piece, PieceKind, SectionCoord, SectionId, Square};
use crate::game_state::undo_state::BoardSnapshot;

const SECTION_COUNT: usize = SECTIONS_PER_SIDE * SECTIONS_PER_SIDE;

type SectionContents = [[Option<Piece>; SECTION_SIZE]; SECTION_SIZE];

/// One adjacent-pair move of a slide: the section at `from` moves into `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideStep {
    pub from: SectionCoord,
    pub to: SectionCoord,
}

/// Ordered slide steps from the clicked section toward the gap.
///
/// The first step starts at the clicked section, the last one ends in the gap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlideChain {
    steps: Vec<SlideStep>,
}

impl SlideChain {
    pub fn new(steps: Vec<SlideStep>) -> Self {
        Self { steps }
    }

    #[inline]
    pub fn steps(&self) -> &[SlideStep] {
        &self.steps
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Clicked section, which becomes the new gap.
    pub fn origin(&self) -> Option<SectionCoord> {
        self.steps.first().map(|s| s.from)
    }

    /// Gap the chain slides into.
    pub fn target_gap(&self) -> Option<SectionCoord> {
        self.steps.last().map(|s| s.to)
    }

    /// Where a section currently at `coord` ends up once the chain is applied.
    pub fn destination_of(&self, coord: SectionCoord) -> SectionCoord {
        self.steps
            .iter()
            .find(|s| s.from == coord)
            .map(|s| s.to)
            .unwrap_or(coord)
    }

    /// Unit step `(d_row, d_col)` the sections travel in.
    pub fn direction(&self) -> Option<(i8, i8)> {
        self.steps.first().map(|s| {
            (
                (s.to.row as i8 - s.from.row as i8).signum(),
                (s.to.col as i8 - s.from.col as i8).signum(),
            )
        })
    }
}

/// A pawn standing on its promotion row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PromotionCandidate {
    pub square: Square,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardModel {
    contents: [SectionContents; SECTION_COUNT],
    section_at: [[Option<SectionId>; SECTIONS_PER_SIDE]; SECTIONS_PER_SIDE],
    gap: SectionCoord,
}

impl Default for BoardModel {
    fn default() -> Self {
        Self::new_game()
    }
}

impl BoardModel {
    /// Sections in their home slots, no pieces, gap at `gap`.
    pub fn empty(gap: SectionCoord) -> Self {
        let mut section_at = [[None; SECTIONS_PER_SIDE]; SECTIONS_PER_SIDE];
        for coord in SectionCoord::all() {
            if coord != gap {
                section_at[coord.row as usize][coord.col as usize] = Some(SectionId::home(coord));
            }
        }

        Self {
            contents: [[[None; SECTION_SIZE]; SECTION_SIZE]; SECTION_COUNT],
            section_at,
            gap,
        }
    }

    /// Standard starting position with the gap at section identity 11.
    pub fn new_game() -> Self {
        let mut board = Self::empty(PRIMARY_GAP);
        for (col, kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            board.put(Square { row: 0, col }, Some(Piece::new(*kind, Color::Black)));
            board.put(Square { row: 1, col }, Some(Piece::new(PieceKind::Pawn, Color::Black)));
            board.put(Square { row: 6, col }, Some(Piece::new(PieceKind::Pawn, Color::White)));
            board.put(Square { row: 7, col }, Some(Piece::new(*kind, Color::White)));
        }
        board
    }

    #[inline]
    pub fn gap(&self) -> SectionCoord {
        self.gap
    }

    /// Identity at a section slot, `None` for the gap.
    #[inline]
    pub fn section_id_at(&self, coord: SectionCoord) -> Option<SectionId> {
        self.section_at[coord.row as usize][coord.col as usize]
    }

    /// Current slot of an identity, `None` if it is the unplaced one.
    pub fn location_of(&self, id: SectionId) -> Option<SectionCoord> {
        SectionCoord::all().find(|c| self.section_id_at(*c) == Some(id))
    }

    /// Identity numbers row-major, `0` marking the gap.
    pub fn section_layout(&self) -> [[u8; SECTIONS_PER_SIDE]; SECTIONS_PER_SIDE] {
        self.section_at
            .map(|row| row.map(|id| id.map(SectionId::get).unwrap_or(0)))
    }

    /// Piece on a square; empty inside the gap.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let id = self.section_id_at(square.section())?;
        let (i, j) = square.local();
        self.contents[id.index()][i][j]
    }

    #[inline]
    pub fn is_gap_square(&self, square: Square) -> bool {
        square.section() == self.gap
    }

    /// Whether any square strictly between `a` and `b` lies in the gap.
    ///
    /// `a` and `b` must share a row, column, or diagonal; otherwise `false`.
    pub fn is_gap_between(&self, a: Square, b: Square) -> bool {
        let d_row = b.row as i8 - a.row as i8;
        let d_col = b.col as i8 - a.col as i8;
        if (d_row == 0 && d_col == 0) || !(d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs())
        {
            return false;
        }

        let (step_r, step_c) = (d_row.signum(), d_col.signum());
        let mut current = a.offset(step_r, step_c);
        while let Some(sq) = current {
            if sq == b {
                break;
            }
            if self.is_gap_square(sq) {
                return true;
            }
            current = sq.offset(step_r, step_c);
        }
        false
    }

    /// Iterate all pieces with their squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterate the pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is(PieceKind::King, color))
            .map(|(sq, _)| sq)
    }

    /// Place a piece while setting up a position.
    pub fn place_piece(&mut self, square: Square, piece: Piece) -> SlideChessResult<()> {
        if self.is_gap_square(square) {
            return Err(SlideChessError::SquareInGap(square));
        }
        self.put(square, Some(piece));
        Ok(())
    }

    /// Remove and return the piece on a square.
    pub fn take_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square);
        self.put(square, None);
        piece
    }

    /// Relocate a piece, marking it moved. Returns whatever stood on `to`.
    ///
    /// No legality checks; an empty `from` or a `to` inside the gap is a no-op.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        if from == to || self.is_gap_square(to) {
            return None;
        }
        let piece = self.take_piece(from)?;
        let captured = self.piece_at(to);
        self.put(to, Some(piece.moved()));
        captured
    }

    /// Replace the pawn on `square` by `kind` of the same color.
    pub fn promote(&mut self, square: Square, kind: PieceKind) -> Option<Piece> {
        let pawn = self.piece_at(square)?;
        let promoted = Piece {
            kind,
            color: pawn.color,
            has_moved: true,
        };
        self.put(square, Some(promoted));
        Some(promoted)
    }

    /// All pawns standing on their promotion row, row 0 before row 7 per column.
    pub fn find_back_rank_promos(&self) -> Vec<PromotionCandidate> {
        let mut promos = Vec::new();
        for col in 0..BOARD_SIZE as u8 {
            for color in [Color::White, Color::Black] {
                let square = Square {
                    row: color.promotion_row(),
                    col,
                };
                if self
                    .piece_at(square)
                    .is_some_and(|p| p.is(PieceKind::Pawn, color))
                {
                    promos.push(PromotionCandidate { square, color });
                }
            }
        }
        promos
    }

    /// Chain of steps that slides `origin` and every section between it and the
    /// gap one slot toward the gap.
    ///
    /// `None` unless `origin` shares a section row or column with the gap and
    /// lies 1 to 3 slots away.
    pub fn determine_slide_chain(&self, origin: SectionCoord) -> Option<SlideChain> {
        let d_row = self.gap.row as i8 - origin.row as i8;
        let d_col = self.gap.col as i8 - origin.col as i8;
        if (d_row != 0 && d_col != 0) || (d_row == 0 && d_col == 0) {
            return None;
        }

        let distance = d_row.abs().max(d_col.abs());
        if distance as u8 > MAX_SLIDE_DISTANCE {
            return None;
        }

        let (step_r, step_c) = (d_row.signum(), d_col.signum());
        let mut steps = Vec::with_capacity(distance as usize);
        let mut from = origin;
        for _ in 0..distance {
            let to = from.offset(step_r, step_c)?;
            steps.push(SlideStep { from, to });
            from = to;
        }
        Some(SlideChain::new(steps))
    }

    /// Slide a single section adjacent to the gap into it.
    pub fn slide_section(&mut self, coord: SectionCoord) -> SlideChessResult<SlideChain> {
        let chain = self
            .determine_slide_chain(coord)
            .filter(|c| c.len() == 1)
            .ok_or(SlideChessError::NotASlideTarget(coord))?;
        self.multi_slide_section(&chain)?;
        Ok(chain)
    }

    /// Apply a slide chain atomically.
    ///
    /// Every chain section moves one slot toward the former gap and the clicked
    /// section's slot becomes the new gap. The board is untouched on `Err`.
    pub fn multi_slide_section(&mut self, chain: &SlideChain) -> SlideChessResult<()> {
        self.validate_chain(chain)?;
        let origin = chain.origin().ok_or(SlideChessError::InvalidSlideChain)?;

        let before = self.section_at;
        for step in chain.steps() {
            self.section_at[step.to.row as usize][step.to.col as usize] =
                before[step.from.row as usize][step.from.col as usize];
        }
        self.section_at[origin.row as usize][origin.col as usize] = None;
        self.gap = origin;
        Ok(())
    }

    fn validate_chain(&self, chain: &SlideChain) -> SlideChessResult<()> {
        let steps = chain.steps();
        let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
            return Err(SlideChessError::InvalidSlideChain);
        };
        if last.to != self.gap || steps.len() > MAX_SLIDE_DISTANCE as usize {
            return Err(SlideChessError::InvalidSlideChain);
        }

        let d_row = first.to.row as i8 - first.from.row as i8;
        let d_col = first.to.col as i8 - first.from.col as i8;
        if d_row.abs() + d_col.abs() != 1 {
            return Err(SlideChessError::InvalidSlideChain);
        }

        for (i, step) in steps.iter().enumerate() {
            if step.from.offset(d_row, d_col) != Some(step.to) {
                return Err(SlideChessError::InvalidSlideChain);
            }
            if i + 1 < steps.len() && steps[i + 1].from != step.to {
                return Err(SlideChessError::InvalidSlideChain);
            }
            if self.section_id_at(step.from).is_none() {
                return Err(SlideChessError::InvalidSlideChain);
            }
        }
        Ok(())
    }

    /// Move the gap to another slot before play starts, restoring the home
    /// identity of the old gap slot.
    ///
    /// The new gap slot must hold no pieces and its identity must be the one
    /// numbered there originally.
    pub fn relocate_gap(&mut self, new_gap: SectionCoord) -> SlideChessResult<()> {
        if new_gap == self.gap {
            return Ok(());
        }
        if new_gap.squares().iter().any(|sq| self.piece_at(*sq).is_some()) {
            return Err(SlideChessError::GapNotEmpty(new_gap));
        }

        let old_gap = self.gap;
        let restored = SectionId::home(old_gap);
        if self.location_of(restored).is_some() {
            return Err(SlideChessError::InvalidSlideChain);
        }
        self.section_at[old_gap.row as usize][old_gap.col as usize] = Some(restored);
        self.section_at[new_gap.row as usize][new_gap.col as usize] = None;
        self.gap = new_gap;
        Ok(())
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot(self.clone())
    }

    pub fn restore(&mut self, snap: &BoardSnapshot) {
        self.clone_from(&snap.0);
    }

    /// Verify the structural invariants, describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        let empty_slots: Vec<SectionCoord> = SectionCoord::all()
            .filter(|c| self.section_id_at(*c).is_none())
            .collect();
        if empty_slots != [self.gap] {
            return Err(format!(
                "expected the gap {} to be the only empty slot, found {:?}",
                self.gap, empty_slots
            ));
        }

        let mut seen = [false; SECTION_COUNT];
        for coord in SectionCoord::all() {
            if let Some(id) = self.section_id_at(coord) {
                if seen[id.index()] {
                    return Err(format!("identity {id} placed twice"));
                }
                seen[id.index()] = true;
            }
        }

        for (index, placed) in seen.iter().enumerate() {
            if !placed && self.contents[index].iter().flatten().any(Option::is_some) {
                return Err(format!("unplaced identity {} still holds pieces", index + 1));
            }
        }
        Ok(())
    }

    fn put(&mut self, square: Square, piece: Option<Piece>) {
        let Some(id) = self.section_id_at(square.section()) else {
            return;
        };
        let (i, j) = square.local();
        self.contents[id.index()][i][j] = piece;
    }
}

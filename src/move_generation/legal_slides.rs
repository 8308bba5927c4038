//! Slide generation and slide legality.
//!
//! Any section in line with the gap and at most three slots away may be
//! clicked. The whole chain between it and the gap shifts one slot, and the
//! slide is legal when the mover's king is not attacked afterwards.

use crate::errors::{SlideChessError, SlideChessResult};
use crate::game_state::board_model::{BoardModel, SlideChain};
use crate::game_state::chess_rules::MAX_SLIDE_DISTANCE;
use crate::game_state::chess_types::{Color, SectionCoord};
use crate::game_state::game_state::GameState;
use crate::game_state::undo_state::SpeculativeBoard;
use crate::move_generation::legal_move_checks::is_king_in_check;

const SLIDE_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideOrigin {
    pub coord: SectionCoord,
    /// Sections between the origin and the gap, origin included.
    pub distance: u8,
}

/// Candidate origins bucketed by whether the slide leaves the mover in check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideTargets {
    pub legal: Vec<SectionCoord>,
    pub illegal: Vec<SectionCoord>,
}

impl SlideTargets {
    #[inline]
    pub fn is_legal(&self, coord: SectionCoord) -> bool {
        self.legal.contains(&coord)
    }

    #[inline]
    pub fn is_illegal(&self, coord: SectionCoord) -> bool {
        self.illegal.contains(&coord)
    }
}

/// Walk outward from the gap along each axis, up to three slots.
pub fn find_valid_slide_origins(board: &BoardModel) -> Vec<SlideOrigin> {
    let gap = board.gap();
    let mut origins = Vec::with_capacity(6);

    for (d_row, d_col) in SLIDE_DIRECTIONS {
        for distance in 1..=MAX_SLIDE_DISTANCE {
            let step = distance as i8;
            let Some(coord) = gap.offset(d_row * step, d_col * step) else {
                break;
            };
            if board.section_id_at(coord).is_none() {
                break;
            }
            origins.push(SlideOrigin { coord, distance });
        }
    }
    origins
}

/// Whether applying `chain` leaves `color`'s king unattacked.
pub fn slide_is_legal(game_state: &mut GameState, chain: &SlideChain, color: Color) -> bool {
    let mut trial = SpeculativeBoard::new(&mut game_state.board);
    if trial.multi_slide_section(chain).is_err() {
        return false;
    }
    !is_king_in_check(&trial, color)
}

/// Every candidate origin, split into legal and self-check slides.
pub fn legal_slide_targets(game_state: &mut GameState, color: Color) -> SlideTargets {
    let mut targets = SlideTargets::default();
    for origin in find_valid_slide_origins(&game_state.board) {
        let Some(chain) = game_state.board.determine_slide_chain(origin.coord) else {
            continue;
        };
        if slide_is_legal(game_state, &chain, color) {
            targets.legal.push(origin.coord);
        } else {
            targets.illegal.push(origin.coord);
        }
    }
    targets
}

/// The chain for a slide from `origin` if `color` may play it.
///
/// Distinguishes an origin that is not a slide target at all from one that is
/// recognized but would leave the king in check.
pub fn checked_slide_chain(
    game_state: &mut GameState,
    origin: SectionCoord,
    color: Color,
) -> SlideChessResult<SlideChain> {
    let chain = game_state
        .board
        .determine_slide_chain(origin)
        .ok_or(SlideChessError::NotASlideTarget(origin))?;
    let section = game_state
        .board
        .section_id_at(origin)
        .ok_or(SlideChessError::NotASlideTarget(origin))?;

    if slide_is_legal(game_state, &chain, color) {
        Ok(chain)
    } else {
        Err(SlideChessError::SlideLeavesKingInCheck { section })
    }
}

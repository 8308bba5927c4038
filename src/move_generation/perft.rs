//! Combined move and slide perft.
//!
//! Every legal piece move and every legal slide counts as one action. Each
//! action is played copy-make style on a cloned state, including the turn
//! bookkeeping a real turn performs: back-rank pawns promote to queens, a
//! promotion that leaves the mover in check discards the action, and the
//! en-passant target is validated before the side flips.

use std::thread;

use crate::game_state::board_model::SlideChain;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_move_to_state, apply_slide_to_state};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{all_legal_moves, has_any_legal_move};
use crate::move_generation::legal_move_shared::{GeneratedMove, MoveKind};
use crate::move_generation::legal_slides::legal_slide_targets;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub slides: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.slides += rhs.slides;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

#[derive(Debug, Clone)]
enum PerftAction {
    Move(GeneratedMove),
    Slide(SlideChain),
}

/// Action outcome feeding the leaf counters.
#[derive(Debug, Clone, Copy, Default)]
struct ActionTags {
    capture: bool,
    en_passant: bool,
    castle: bool,
    promotion: bool,
    slide: bool,
}

pub fn perft(game_state: &GameState, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    perft_recurse(game_state, depth, &mut total);
    total
}

/// Splits the root actions across threads; each worker owns its own state copy.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut root = game_state.clone();
    let actions = root_actions(&mut root);
    let handles: Vec<_> = actions
        .into_iter()
        .map(|action| {
            let state = root.clone();
            thread::spawn(move || {
                let mut local = PerftCounts::default();
                if let Some((next, tags)) = play_action(&state, &action) {
                    visit_child(&next, tags, depth, &mut local);
                }
                local
            })
        })
        .collect();

    let mut total = PerftCounts::default();
    for handle in handles {
        if let Ok(local) = handle.join() {
            total.merge(local);
        }
    }
    total
}

fn perft_recurse(game_state: &GameState, depth: u8, counts: &mut PerftCounts) {
    if depth == 0 {
        counts.nodes += 1;
        return;
    }

    let mut state = game_state.clone();
    for action in root_actions(&mut state) {
        if let Some((next, tags)) = play_action(&state, &action) {
            visit_child(&next, tags, depth, counts);
        }
    }
}

fn visit_child(next: &GameState, tags: ActionTags, depth: u8, counts: &mut PerftCounts) {
    if depth > 1 {
        perft_recurse(next, depth - 1, counts);
        return;
    }

    counts.nodes += 1;
    counts.captures += tags.capture as usize;
    counts.en_passant += tags.en_passant as usize;
    counts.castles += tags.castle as usize;
    counts.promotions += tags.promotion as usize;
    counts.slides += tags.slide as usize;

    let defender = next.side_to_move;
    if is_king_in_check(&next.board, defender) {
        counts.checks += 1;
        let mut probe = next.clone();
        if !has_any_legal_move(&mut probe, defender) {
            counts.checkmates += 1;
        }
    }
}

fn root_actions(state: &mut GameState) -> Vec<PerftAction> {
    let side = state.side_to_move;
    let mut actions: Vec<PerftAction> = all_legal_moves(state, side)
        .into_iter()
        .map(PerftAction::Move)
        .collect();

    for origin in legal_slide_targets(state, side).legal {
        if let Some(chain) = state.board.determine_slide_chain(origin) {
            actions.push(PerftAction::Slide(chain));
        }
    }
    actions
}

/// Play one action as a complete turn, `None` if promotions expose the king.
fn play_action(state: &GameState, action: &PerftAction) -> Option<(GameState, ActionTags)> {
    let mover = state.side_to_move;
    let mut next = state.clone();
    let mut tags = ActionTags::default();

    match action {
        PerftAction::Move(mv) => {
            let applied = apply_move_to_state(&mut next, mv).ok()?;
            tags.capture = applied.captured.is_some();
            tags.en_passant = matches!(mv.kind, MoveKind::EnPassant { .. });
            tags.castle = mv.is_castle();
        }
        PerftAction::Slide(chain) => {
            apply_slide_to_state(&mut next, chain).ok()?;
            tags.slide = true;
        }
    }

    let promos = next.board.find_back_rank_promos();
    tags.promotion = !promos.is_empty();
    for promo in promos {
        next.board.promote(promo.square, PieceKind::Queen);
    }
    if tags.promotion && is_king_in_check(&next.board, mover) {
        return None;
    }

    next.en_passant.validate_and_clear_after_turn(&next.board, mover);
    next.side_to_move = mover.opposite();
    Some((next, tags))
}

/// Perft from the standard start position.
pub fn perft_start(depth: u8) -> PerftCounts {
    perft(&GameState::new_game(), depth)
}

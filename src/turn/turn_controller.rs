//! Turn controller.
//!
//! `SlideChessGame` owns the rule state and drives one turn at a time:
//! gap selection, then for each turn either a piece move (move phase) or a
//! slide (slide phase). A played action is followed by any promotion choices
//! it caused, then turn completion:
//!
//! 1. rollback if the mover's king ended up attacked,
//! 2. en-passant validation,
//! 3. notation entry,
//! 4. side flip and repetition bump,
//! 5. draw, checkmate and stalemate evaluation.
//!
//! Rejected intents leave every piece of rule state untouched.

use std::collections::VecDeque;

use rand::Rng;

use crate::errors::{SlideChessError, SlideChessResult};
use crate::game_state::board_model::{BoardModel, PromotionCandidate};
use crate::game_state::chess_types::{Color, Piece, PieceKind, SectionCoord, Square};
use crate::game_state::game_state::GameState;
use crate::game_state::repetition::RepetitionTracker;
use crate::move_generation::legal_move_apply::{
    apply_move_to_state, apply_slide_to_state, AppliedMove,
};
use crate::move_generation::legal_move_checks::{is_king_in_check, king_square};
use crate::move_generation::legal_move_generator::{
    has_any_legal_move, legal_destinations, legal_moves_from,
};
use crate::move_generation::legal_slides::{checked_slide_chain, legal_slide_targets, SlideTargets};
use crate::turn::game_config::GameConfig;
use crate::turn::game_events::{EventLog, GameEvent, GapDraw, GapHand};
use crate::turn::turn_state::{
    ControllerState, GameOutcome, Phase, SlideRecord, TurnState,
};
use crate::utils::notation::{
    check_mark, disambiguator, draw_explanation, move_san, slide_san, MoveLog,
};

/// Outcome of an accepted intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnProgress {
    /// The turn is over and the other side is to move.
    Completed,
    /// The turn waits for one or more promotion choices.
    PromotionPending,
}

/// Reply to a slide attempt.
///
/// `reason` is only set for a recognized slide that would leave the king in
/// check, not for a section that cannot slide at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideAttempt {
    pub ok: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PlayedAction {
    Move {
        applied: AppliedMove,
        disambiguator: String,
    },
    Slide {
        record: SlideRecord,
        direction: (i8, i8),
    },
}

/// A played action whose turn has not completed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTurn {
    pre: Box<GameSnapshot>,
    mover: Color,
    action: PlayedAction,
}

/// Deep copy of all rule state: board, sections, en-passant target, turn
/// bookkeeping, repetition counts, captures and the move log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    state: GameState,
    turn: TurnState,
    repetition: RepetitionTracker,
    captured: [Vec<Piece>; 2],
    log: MoveLog,
    pending: Option<PendingTurn>,
}

impl GameSnapshot {
    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    pub fn repetition(&self) -> &RepetitionTracker {
        &self.repetition
    }
}

#[derive(Debug, Clone)]
pub struct SlideChessGame {
    config: GameConfig,
    state: GameState,
    turn: TurnState,
    repetition: RepetitionTracker,
    /// Pieces taken, indexed by the capturing color.
    captured: [Vec<Piece>; 2],
    log: MoveLog,
    pending: Option<PendingTurn>,
    history: VecDeque<GameSnapshot>,
    initial: GameSnapshot,
    events: EventLog,
}

impl Default for SlideChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl SlideChessGame {
    /// Standard setup waiting for the gap draw.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::assemble(config, GameState::new_game(), false)
    }

    /// Start from an arbitrary position. The gap counts as already chosen.
    pub fn from_board(board: BoardModel, to_move: Color, config: GameConfig) -> Self {
        Self::assemble(config, GameState::from_board(board, to_move), true)
    }

    fn assemble(config: GameConfig, state: GameState, gap_chosen: bool) -> Self {
        let log = MoveLog::new(state.side_to_move);
        let turn = TurnState {
            gap_chosen,
            ..TurnState::new()
        };
        let initial = GameSnapshot {
            state: state.clone(),
            turn: turn.clone(),
            repetition: RepetitionTracker::new(),
            captured: [Vec::new(), Vec::new()],
            log: log.clone(),
            pending: None,
        };

        let mut game = Self {
            config,
            state,
            turn,
            repetition: RepetitionTracker::new(),
            captured: [Vec::new(), Vec::new()],
            log,
            pending: None,
            history: VecDeque::new(),
            initial,
            events: EventLog::with_capacity(config.max_events),
        };
        if gap_chosen {
            game.update_check_flags();
            game.initial = game.snapshot();
        }
        game
    }

    // --- Queries ---

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn board(&self) -> &BoardModel {
        &self.state.board
    }

    #[inline]
    pub fn gap(&self) -> SectionCoord {
        self.state.board.gap()
    }

    #[inline]
    pub fn to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[inline]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    pub fn controller_state(&self) -> ControllerState {
        self.turn.controller_state()
    }

    #[inline]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.turn.outcome
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.turn.is_over()
    }

    #[inline]
    pub fn check_square(&self) -> Option<Square> {
        self.turn.check_square
    }

    #[inline]
    pub fn selection_moves(&self) -> &[Square] {
        &self.turn.selection_moves
    }

    /// Pieces captured by `color`.
    #[inline]
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    #[inline]
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    #[inline]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    #[inline]
    pub fn repetition(&self) -> &RepetitionTracker {
        &self.repetition
    }

    /// Pawn the next promotion choice applies to.
    #[inline]
    pub fn pending_promotion(&self) -> Option<PromotionCandidate> {
        self.turn.promotions.front()
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Legal and self-check slide origins for the side to move.
    pub fn slide_targets(&mut self) -> SlideTargets {
        let side = self.state.side_to_move;
        legal_slide_targets(&mut self.state, side)
    }

    // --- Gap selection ---

    /// Draw for the starting gap with the thread-local generator.
    pub fn choose_gap(&mut self, hand: GapHand) -> SlideChessResult<GapDraw> {
        let mut rng = rand::rng();
        self.choose_gap_with_rng(hand, &mut rng)
    }

    pub fn choose_gap_with_rng<R: Rng + ?Sized>(
        &mut self,
        hand: GapHand,
        rng: &mut R,
    ) -> SlideChessResult<GapDraw> {
        if self.turn.gap_chosen {
            return self.rejected(SlideChessError::GapAlreadyChosen);
        }
        let draw = if rng.random_range(0..2u8) == 0 {
            GapDraw::WhitePawn
        } else {
            GapDraw::BlackPawn
        };
        let result = self.apply_gap_draw(Some(hand), draw).map(|()| draw);
        self.log_rejection(result)
    }

    /// Apply a known draw outcome.
    pub fn choose_gap_draw(&mut self, draw: GapDraw) -> SlideChessResult<()> {
        let result = self.apply_gap_draw(None, draw);
        self.log_rejection(result)
    }

    fn apply_gap_draw(&mut self, hand: Option<GapHand>, draw: GapDraw) -> SlideChessResult<()> {
        if self.turn.gap_chosen {
            return Err(SlideChessError::GapAlreadyChosen);
        }
        let gap = match draw {
            GapDraw::WhitePawn => self.config.primary_gap,
            GapDraw::BlackPawn => self.config.alternate_gap,
        };
        self.state.board.relocate_gap(gap)?;

        self.turn.gap_chosen = true;
        self.repetition.clear();
        self.events.push(GameEvent::GapChosen { hand, draw, gap });
        Ok(())
    }

    // --- Selection and phase ---

    /// Select a piece of the side to move and return its legal destinations.
    pub fn select(&mut self, square: Square) -> SlideChessResult<&[Square]> {
        let result = self.select_inner(square);
        self.log_rejection(result)?;
        Ok(self.turn.selection_moves.as_slice())
    }

    fn select_inner(&mut self, square: Square) -> SlideChessResult<()> {
        self.ensure_can_act()?;
        if self.turn.phase != Phase::Move {
            return Err(SlideChessError::WrongPhase);
        }
        self.turn.clear_selection();
        self.ensure_own_piece(square)?;

        let moves = legal_destinations(&mut self.state, square);
        self.events.push(GameEvent::Selected {
            square,
            destinations: moves.len(),
        });
        self.turn.selection = Some(square);
        self.turn.selection_moves = moves;
        Ok(())
    }

    /// Switch between move and slide phase without ending the turn.
    pub fn toggle_phase(&mut self) -> SlideChessResult<Phase> {
        if let Err(err) = self.ensure_can_act() {
            return self.rejected(err);
        }
        self.turn.phase = self.turn.phase.toggled();
        self.turn.clear_selection();
        self.events.push(GameEvent::PhaseChanged(self.turn.phase));
        Ok(self.turn.phase)
    }

    // --- Turn actions ---

    /// Play a piece move.
    pub fn try_move(&mut self, from: Square, to: Square) -> SlideChessResult<TurnProgress> {
        let result = self.play_move(from, to);
        self.log_rejection(result)
    }

    pub fn attempt_move(&mut self, from: Square, to: Square) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Slide the section at `origin` and everything between it and the gap.
    pub fn try_slide(&mut self, origin: SectionCoord) -> SlideChessResult<TurnProgress> {
        let result = self.play_slide(origin);
        self.log_rejection(result)
    }

    pub fn attempt_slide_to(&mut self, origin: SectionCoord) -> SlideAttempt {
        match self.try_slide(origin) {
            Ok(_) => SlideAttempt {
                ok: true,
                reason: None,
            },
            Err(err @ SlideChessError::SlideLeavesKingInCheck { .. }) => SlideAttempt {
                ok: false,
                reason: Some(err.to_string()),
            },
            Err(_) => SlideAttempt {
                ok: false,
                reason: None,
            },
        }
    }

    /// Promote the front pawn of the queue; completes the turn once the queue
    /// is empty.
    pub fn try_resolve_promotion(&mut self, kind: PieceKind) -> SlideChessResult<TurnProgress> {
        let result = self.resolve_promotion_inner(kind);
        self.log_rejection(result)
    }

    pub fn resolve_promotion(&mut self, kind: PieceKind) -> bool {
        self.try_resolve_promotion(kind).is_ok()
    }

    fn play_move(&mut self, from: Square, to: Square) -> SlideChessResult<TurnProgress> {
        self.ensure_can_act()?;
        if self.turn.phase != Phase::Move {
            return Err(SlideChessError::WrongPhase);
        }
        self.ensure_own_piece(from)?;

        let mover = self.state.side_to_move;
        let mv = legal_moves_from(&mut self.state, from)
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or(SlideChessError::IllegalMove { from, to })?;

        let pre = Box::new(self.snapshot());
        let disambiguator = disambiguator(&mut self.state, &mv);
        let applied = apply_move_to_state(&mut self.state, &mv)?;

        if let Some(taken) = applied.captured {
            self.captured[mover.index()].push(taken);
        }
        self.turn.last_move = Some((from, to));
        self.turn.last_slide = None;
        self.turn.clear_selection();

        self.begin_completion(PendingTurn {
            pre,
            mover,
            action: PlayedAction::Move {
                applied,
                disambiguator,
            },
        })
    }

    fn play_slide(&mut self, origin: SectionCoord) -> SlideChessResult<TurnProgress> {
        self.ensure_can_act()?;
        if self.turn.phase != Phase::Slide {
            return Err(SlideChessError::WrongPhase);
        }

        let mover = self.state.side_to_move;
        let chain = checked_slide_chain(&mut self.state, origin, mover)?;
        let section = self
            .state
            .board
            .section_id_at(origin)
            .ok_or(SlideChessError::NotASlideTarget(origin))?;
        let direction = chain.direction().ok_or(SlideChessError::InvalidSlideChain)?;
        let former_gap = self.state.board.gap();

        let pre = Box::new(self.snapshot());
        apply_slide_to_state(&mut self.state, &chain)?;

        let record = SlideRecord {
            section,
            origin,
            former_gap,
        };
        self.turn.last_slide = Some(record);
        self.turn.last_move = None;
        self.turn.clear_selection();

        self.begin_completion(PendingTurn {
            pre,
            mover,
            action: PlayedAction::Slide { record, direction },
        })
    }

    fn begin_completion(&mut self, pending: PendingTurn) -> SlideChessResult<TurnProgress> {
        self.turn.promotions.fill_from(&self.state.board);
        if self.turn.promotions.is_pending() {
            self.events.push(GameEvent::PromotionRequested {
                count: self.turn.promotions.len(),
            });
            self.pending = Some(pending);
            return Ok(TurnProgress::PromotionPending);
        }
        self.finish_turn(pending)?;
        Ok(TurnProgress::Completed)
    }

    fn resolve_promotion_inner(&mut self, kind: PieceKind) -> SlideChessResult<TurnProgress> {
        if !self.turn.gap_chosen {
            return Err(SlideChessError::GapNotChosen);
        }
        if self.turn.is_over() {
            return Err(SlideChessError::GameOver);
        }

        let candidate = self
            .turn
            .promotions
            .resolve_next(&mut self.state.board, kind)?;
        self.events.push(GameEvent::Promoted {
            square: candidate.square,
            kind,
        });
        if self.turn.promotions.is_pending() {
            return Ok(TurnProgress::PromotionPending);
        }

        let pending = self
            .pending
            .take()
            .ok_or(SlideChessError::NoPromotionPending)?;
        self.finish_turn(pending)?;
        Ok(TurnProgress::Completed)
    }

    fn finish_turn(&mut self, pending: PendingTurn) -> SlideChessResult<()> {
        let PendingTurn { pre, mover, action } = pending;

        if is_king_in_check(&self.state.board, mover) {
            self.restore(&pre);
            self.events.push(GameEvent::RolledBack);
            return Err(SlideChessError::PromotionLeavesKingInCheck);
        }

        self.state
            .en_passant
            .validate_and_clear_after_turn(&self.state.board, mover);

        let promotions = self.turn.promotions.chosen().to_vec();
        self.turn.promotions.clear();
        let defender = mover.opposite();
        let mark = check_mark(&mut self.state, defender);
        let notation = match &action {
            PlayedAction::Move {
                applied,
                disambiguator,
            } => move_san(applied, disambiguator, &promotions, mark),
            PlayedAction::Slide { record, direction } => {
                slide_san(record.section, *direction, &promotions, mark)
            }
        };
        self.log.push(notation.clone());
        self.push_history(*pre);

        self.state.side_to_move = defender;
        self.turn.phase = Phase::Move;
        self.turn.clear_selection();
        self.repetition.bump(
            &self.state.board,
            defender,
            self.state.en_passant_square(),
        );
        self.events.push(GameEvent::TurnCompleted {
            color: mover,
            notation,
        });

        self.evaluate_end();
        Ok(())
    }

    fn evaluate_end(&mut self) {
        if self.repetition.can_claim_draw(self.config.repetition_limit) {
            let occurrences = self.repetition.max_count();
            self.log
                .set_draw_explanation(draw_explanation(occurrences));
            self.turn.check_square = None;
            self.end_game(GameOutcome::DrawByRepetition { occurrences });
            return;
        }
        self.update_check_flags();
    }

    /// Refresh the check highlight and detect mate or stalemate.
    ///
    /// Both phases count as legal actions, so a slide that escapes check is
    /// enough to avoid mate.
    fn update_check_flags(&mut self) {
        let side = self.state.side_to_move;
        let opponent = side.opposite();
        let board = &self.state.board;
        let side_in_check = is_king_in_check(board, side);
        let opponent_in_check = is_king_in_check(board, opponent);

        self.turn.check_square = if side_in_check {
            king_square(board, side)
        } else if opponent_in_check {
            king_square(board, opponent)
        } else {
            None
        };

        let outcome = if !has_any_legal_move(&mut self.state, side) {
            Some(if side_in_check {
                GameOutcome::Checkmate { winner: opponent }
            } else {
                GameOutcome::Stalemate
            })
        } else if opponent_in_check && !has_any_legal_move(&mut self.state, opponent) {
            Some(GameOutcome::Checkmate { winner: side })
        } else {
            None
        };

        if let Some(outcome) = outcome {
            self.end_game(outcome);
        }
    }

    fn end_game(&mut self, outcome: GameOutcome) {
        self.turn.outcome = Some(outcome);
        self.log.set_result(outcome.result());
        self.events.push(GameEvent::GameEnded(outcome));
    }

    // --- History ---

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state.clone(),
            turn: self.turn.clone(),
            repetition: self.repetition.clone(),
            captured: self.captured.clone(),
            log: self.log.clone(),
            pending: self.pending.clone(),
        }
    }

    /// Replace all rule state with `snap`. Undo history and events are kept.
    pub fn restore(&mut self, snap: &GameSnapshot) {
        self.state.clone_from(&snap.state);
        self.turn.clone_from(&snap.turn);
        self.repetition.clone_from(&snap.repetition);
        self.captured.clone_from(&snap.captured);
        self.log.clone_from(&snap.log);
        self.pending.clone_from(&snap.pending);
    }

    fn push_history(&mut self, snap: GameSnapshot) {
        if self.config.max_history == 0 {
            return;
        }
        while self.history.len() >= self.config.max_history {
            self.history.pop_front();
        }
        self.history.push_back(snap);
    }

    /// Take back the most recent completed turn. A finished game may be taken
    /// back; a turn waiting for a promotion choice may not.
    pub fn undo(&mut self) -> SlideChessResult<()> {
        if self.turn.promotions.is_pending() {
            return self.rejected(SlideChessError::PromotionPending);
        }
        let Some(snap) = self.history.pop_back() else {
            return self.rejected(SlideChessError::NothingToUndo);
        };
        self.restore(&snap);
        self.events.push(GameEvent::Undone);
        Ok(())
    }

    /// Back to the starting position, before the gap draw for a new game.
    pub fn reset(&mut self) {
        let initial = self.initial.clone();
        self.restore(&initial);
        self.history.clear();
        self.events.push(GameEvent::Reset);
    }

    // --- Helpers ---

    fn ensure_can_act(&self) -> SlideChessResult<()> {
        if !self.turn.gap_chosen {
            Err(SlideChessError::GapNotChosen)
        } else if self.turn.is_over() {
            Err(SlideChessError::GameOver)
        } else if self.turn.promotions.is_pending() {
            Err(SlideChessError::PromotionPending)
        } else {
            Ok(())
        }
    }

    fn ensure_own_piece(&self, square: Square) -> SlideChessResult<()> {
        match self.state.board.piece_at(square) {
            Some(piece) if piece.color == self.state.side_to_move => Ok(()),
            _ => Err(SlideChessError::NotYourPiece(square)),
        }
    }

    fn rejected<T>(&mut self, err: SlideChessError) -> SlideChessResult<T> {
        self.events.push(GameEvent::Rejected(err.clone()));
        Err(err)
    }

    fn log_rejection<T>(&mut self, result: SlideChessResult<T>) -> SlideChessResult<T> {
        if let Err(err) = &result {
            self.events.push(GameEvent::Rejected(err.clone()));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{SlideChessGame, TurnProgress};
    use crate::errors::SlideChessError;
    use crate::game_state::board_model::BoardModel;
    use crate::game_state::chess_rules::{ALTERNATE_GAP, PRIMARY_GAP};
    use crate::game_state::chess_types::{Color, Piece, PieceKind, SectionCoord, SectionId, Square};
    use crate::turn::game_config::GameConfig;
    use crate::turn::game_events::{GapDraw, GapHand};
    use crate::turn::turn_state::{ControllerState, GameOutcome, Phase};
    use crate::utils::notation::GameResult;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("test square on board")
    }

    fn sc(row: u8, col: u8) -> SectionCoord {
        SectionCoord::new(row, col).expect("test section on board")
    }

    fn place(board: &mut BoardModel, at: Square, kind: PieceKind, color: Color, moved: bool) {
        let piece = Piece::new(kind, color);
        let piece = if moved { piece.moved() } else { piece };
        board.place_piece(at, piece).expect("placed");
    }

    fn started_game() -> SlideChessGame {
        let mut game = SlideChessGame::new();
        game.choose_gap_draw(GapDraw::WhitePawn)
            .expect("gap chosen");
        game
    }

    #[test]
    fn actions_before_the_gap_draw_are_rejected() {
        let mut game = SlideChessGame::new();
        assert_eq!(game.controller_state(), ControllerState::GapSelection);
        let before = game.snapshot();

        assert_eq!(
            game.try_move(sq(6, 0), sq(5, 0)),
            Err(SlideChessError::GapNotChosen)
        );
        assert_eq!(game.toggle_phase(), Err(SlideChessError::GapNotChosen));
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.events().len(), 2);
    }

    #[test]
    fn black_pawn_draw_moves_the_gap_and_restores_identity_eleven() {
        let mut game = SlideChessGame::new();
        game.choose_gap_draw(GapDraw::BlackPawn)
            .expect("gap chosen");

        assert_eq!(game.gap(), ALTERNATE_GAP);
        assert_eq!(
            game.board().section_id_at(PRIMARY_GAP),
            SectionId::new(11)
        );
        assert_eq!(game.board().location_of(SectionId::new(7).expect("id")), None);
        assert!(game.board().check_invariants().is_ok());
        assert_eq!(
            game.choose_gap_draw(GapDraw::WhitePawn),
            Err(SlideChessError::GapAlreadyChosen)
        );
    }

    #[test]
    fn random_gap_draw_picks_one_of_the_two_slots() {
        let mut game = SlideChessGame::new();
        let mut rng = StdRng::seed_from_u64(11);
        let draw = game
            .choose_gap_with_rng(GapHand::Left, &mut rng)
            .expect("gap chosen");
        let expected = match draw {
            GapDraw::WhitePawn => PRIMARY_GAP,
            GapDraw::BlackPawn => ALTERNATE_GAP,
        };
        assert_eq!(game.gap(), expected);
        assert!(game.repetition().is_empty());
        assert_eq!(game.controller_state(), ControllerState::MovePhase);
    }

    #[test]
    fn selection_lists_legal_destinations() {
        let mut game = started_game();
        let moves = game.select(sq(6, 0)).expect("own pawn").to_vec();
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&sq(4, 0)));

        assert_eq!(
            game.select(sq(1, 0)),
            Err(SlideChessError::NotYourPiece(sq(1, 0)))
        );
        assert!(game.selection_moves().is_empty());
    }

    #[test]
    fn double_step_keeps_target_when_a_capturer_is_adjacent() {
        let mut board = BoardModel::empty(ALTERNATE_GAP);
        place(&mut board, sq(7, 0), PieceKind::King, Color::White, false);
        place(&mut board, sq(0, 7), PieceKind::King, Color::Black, false);
        place(&mut board, sq(6, 4), PieceKind::Pawn, Color::White, false);
        place(&mut board, sq(4, 3), PieceKind::Pawn, Color::Black, true);
        let mut game = SlideChessGame::from_board(board, Color::White, GameConfig::default());

        assert_eq!(game.try_move(sq(6, 4), sq(4, 4)), Ok(TurnProgress::Completed));
        assert_eq!(game.game_state().en_passant_square(), Some(sq(5, 4)));

        assert_eq!(game.try_move(sq(4, 3), sq(5, 4)), Ok(TurnProgress::Completed));
        assert_eq!(game.board().piece_at(sq(4, 4)), None);
        assert_eq!(
            game.captured_by(Color::Black),
            &[Piece::new(PieceKind::Pawn, Color::White).moved()]
        );
        assert_eq!(game.log().to_plain_text(), "1.e4 dxe3");
    }

    #[test]
    fn double_step_without_capturer_drops_the_target() {
        let mut game = SlideChessGame::new();
        game.choose_gap_draw(GapDraw::BlackPawn)
            .expect("gap chosen");
        assert!(game.attempt_move(sq(6, 4), sq(4, 4)));
        assert_eq!(game.game_state().en_passant_square(), None);
        assert_eq!(game.to_move(), Color::Black);
    }

    #[test]
    fn castle_through_the_controller() {
        let mut board = BoardModel::empty(ALTERNATE_GAP);
        place(&mut board, sq(7, 4), PieceKind::King, Color::White, false);
        place(&mut board, sq(7, 7), PieceKind::Rook, Color::White, false);
        place(&mut board, sq(0, 0), PieceKind::King, Color::Black, false);
        let mut game = SlideChessGame::from_board(board, Color::White, GameConfig::default());

        game.try_move(sq(7, 4), sq(7, 6)).expect("short castle");
        assert_eq!(
            game.board().piece_at(sq(7, 5)).map(|p| p.kind),
            Some(PieceKind::Rook)
        );
        assert_eq!(game.log().last(), Some("O-O"));
    }

    #[test]
    fn two_section_slide_through_the_controller() {
        let mut board = BoardModel::empty(PRIMARY_GAP);
        place(&mut board, sq(7, 7), PieceKind::King, Color::White, false);
        place(&mut board, sq(0, 0), PieceKind::King, Color::Black, false);
        place(&mut board, sq(4, 2), PieceKind::Knight, Color::White, false);
        place(&mut board, sq(5, 0), PieceKind::Bishop, Color::White, false);
        let mut game = SlideChessGame::from_board(board, Color::White, GameConfig::default());

        assert_eq!(
            game.try_slide(sc(2, 0)),
            Err(SlideChessError::WrongPhase)
        );
        assert_eq!(game.toggle_phase(), Ok(Phase::Slide));
        assert_eq!(game.try_slide(sc(2, 0)), Ok(TurnProgress::Completed));

        assert_eq!(game.gap(), sc(2, 0));
        assert_eq!(game.board().section_id_at(sc(2, 1)), SectionId::new(9));
        assert_eq!(game.board().section_id_at(sc(2, 2)), SectionId::new(10));
        assert_eq!(
            game.board().piece_at(sq(4, 4)).map(|p| p.kind),
            Some(PieceKind::Knight)
        );
        assert_eq!(
            game.board().piece_at(sq(5, 2)).map(|p| p.kind),
            Some(PieceKind::Bishop)
        );
        assert_eq!(game.log().last(), Some("[9]→"));
        assert_eq!(game.phase(), Phase::Move);
        assert_eq!(game.to_move(), Color::Black);
    }

    #[test]
    fn self_check_slide_reports_a_reason_and_changes_nothing() {
        let mut board = BoardModel::empty(PRIMARY_GAP);
        place(&mut board, sq(6, 4), PieceKind::King, Color::White, true);
        place(&mut board, sq(1, 4), PieceKind::Rook, Color::Black, true);
        place(&mut board, sq(0, 0), PieceKind::King, Color::Black, true);
        let mut game = SlideChessGame::from_board(board, Color::White, GameConfig::default());
        game.toggle_phase().expect("slide phase");
        let before = game.snapshot();

        let attempt = game.attempt_slide_to(sc(2, 3));
        assert!(!attempt.ok);
        assert_eq!(
            attempt.reason.as_deref(),
            Some("Sliding section 12 would put your king in check.")
        );

        let attempt = game.attempt_slide_to(sc(0, 0));
        assert!(!attempt.ok);
        assert_eq!(attempt.reason, None);
        assert_eq!(game.snapshot(), before);

        assert!(game.slide_targets().is_legal(sc(1, 2)));
    }

    #[test]
    fn third_repetition_draws_automatically() {
        let mut game = started_game();
        let shuffle = [
            (sq(7, 1), sq(5, 0)),
            (sq(0, 1), sq(2, 0)),
            (sq(5, 0), sq(7, 1)),
            (sq(2, 0), sq(0, 1)),
        ];

        for (ply, (from, to)) in shuffle.iter().cycle().take(8).enumerate() {
            game.try_move(*from, *to)
                .unwrap_or_else(|err| panic!("ply {} rejected: {err}", ply + 1));
            assert_eq!(game.outcome(), None, "ply {}", ply + 1);
        }

        game.try_move(sq(7, 1), sq(5, 0)).expect("ninth ply");
        assert_eq!(
            game.outcome(),
            Some(GameOutcome::DrawByRepetition { occurrences: 3 })
        );
        assert_eq!(game.controller_state(), ControllerState::Draw);
        assert_eq!(game.log().result(), Some(GameResult::Draw));
        assert_eq!(
            game.log().draw_explanation(),
            Some("Draw by threefold repetition.")
        );
        assert!(game.log().to_plain_text().ends_with("5.Na3 ½-½"));
        assert_eq!(
            game.try_move(sq(0, 1), sq(2, 0)),
            Err(SlideChessError::GameOver)
        );
    }

    #[test]
    fn knight_mate_ends_the_game() {
        let mut board = BoardModel::empty(sc(3, 0));
        place(&mut board, sq(0, 7), PieceKind::King, Color::Black, true);
        place(&mut board, sq(0, 6), PieceKind::Rook, Color::Black, true);
        place(&mut board, sq(1, 6), PieceKind::Pawn, Color::Black, true);
        place(&mut board, sq(1, 7), PieceKind::Pawn, Color::Black, true);
        place(&mut board, sq(3, 4), PieceKind::Knight, Color::White, true);
        place(&mut board, sq(7, 4), PieceKind::King, Color::White, true);
        let mut game = SlideChessGame::from_board(board, Color::White, GameConfig::default());

        game.try_move(sq(3, 4), sq(1, 5)).expect("knight check");
        assert_eq!(
            game.outcome(),
            Some(GameOutcome::Checkmate {
                winner: Color::White
            })
        );
        assert_eq!(game.check_square(), Some(sq(0, 7)));
        assert_eq!(game.log().to_plain_text(), "1.Nf7# 1-0");
    }

    /// Black king on h6 behind the gap's corner slot. Every king step is
    /// covered, and every slide either brings the white king next to it or
    /// opens the queen's diagonal.
    fn stalemate_board(rook_from: Square) -> BoardModel {
        let mut board = BoardModel::empty(sc(0, 3));
        place(&mut board, sq(2, 7), PieceKind::King, Color::Black, true);
        place(&mut board, sq(1, 5), PieceKind::King, Color::White, true);
        place(&mut board, sq(4, 3), PieceKind::Queen, Color::White, true);
        place(&mut board, rook_from, PieceKind::Rook, Color::White, true);
        board
    }

    #[test]
    fn no_legal_move_or_slide_without_check_is_stalemate() {
        let board = stalemate_board(sq(3, 4));
        let mut game = SlideChessGame::from_board(board, Color::White, GameConfig::default());
        assert_eq!(game.outcome(), None);

        assert_eq!(game.try_move(sq(3, 4), sq(3, 5)), Ok(TurnProgress::Completed));
        assert_eq!(game.outcome(), Some(GameOutcome::Stalemate));
        assert_eq!(game.controller_state(), ControllerState::Stalemate);
        assert_eq!(game.check_square(), None);
        assert_eq!(game.log().result(), Some(GameResult::Draw));
        assert_eq!(GameResult::Draw.token(), "½-½");
        assert_eq!(game.log().to_plain_text(), "1.Rf5 ½-½");

        let before = game.snapshot();
        assert_eq!(
            game.try_move(sq(2, 7), sq(3, 7)),
            Err(SlideChessError::GameOver)
        );
        assert_eq!(game.toggle_phase(), Err(SlideChessError::GameOver));
        assert_eq!(game.try_slide(sc(1, 3)), Err(SlideChessError::GameOver));
        assert!(!game.attempt_slide_to(sc(0, 2)).ok);
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn stalemated_starting_position_is_detected_at_setup() {
        let board = stalemate_board(sq(3, 5));
        let game = SlideChessGame::from_board(board, Color::Black, GameConfig::default());
        assert_eq!(game.controller_state(), ControllerState::Stalemate);
        assert_eq!(game.log().result(), Some(GameResult::Draw));
    }

    fn promotion_slide_board(with_black_pawn: bool) -> BoardModel {
        let mut board = BoardModel::empty(sc(0, 0));
        place(&mut board, sq(2, 0), PieceKind::Pawn, Color::White, true);
        place(&mut board, sq(2, 1), PieceKind::Pawn, Color::White, true);
        place(&mut board, sq(3, 7), PieceKind::King, Color::Black, true);
        if with_black_pawn {
            place(&mut board, sq(6, 7), PieceKind::King, Color::White, true);
            place(&mut board, sq(7, 5), PieceKind::Pawn, Color::Black, true);
        } else {
            place(&mut board, sq(7, 7), PieceKind::King, Color::White, true);
        }
        board
    }

    #[test]
    fn slide_promotes_two_pawns_before_the_turn_completes() {
        let board = promotion_slide_board(false);
        let mut game = SlideChessGame::from_board(board, Color::White, GameConfig::default());
        game.toggle_phase().expect("slide phase");

        assert_eq!(game.try_slide(sc(2, 0)), Ok(TurnProgress::PromotionPending));
        assert_eq!(game.controller_state(), ControllerState::PromotionPending);
        assert_eq!(
            game.try_move(sq(3, 7), sq(3, 6)),
            Err(SlideChessError::PromotionPending)
        );
        assert_eq!(
            game.try_resolve_promotion(PieceKind::King),
            Err(SlideChessError::InvalidPromotionPiece(PieceKind::King))
        );

        assert_eq!(
            game.try_resolve_promotion(PieceKind::Queen),
            Ok(TurnProgress::PromotionPending)
        );
        assert_eq!(game.to_move(), Color::White);
        assert_eq!(
            game.try_resolve_promotion(PieceKind::Knight),
            Ok(TurnProgress::Completed)
        );

        assert_eq!(game.to_move(), Color::Black);
        assert_eq!(
            game.board().piece_at(sq(0, 0)).map(|p| p.kind),
            Some(PieceKind::Queen)
        );
        assert_eq!(
            game.board().piece_at(sq(0, 1)).map(|p| p.kind),
            Some(PieceKind::Knight)
        );
        assert_eq!(game.log().last(), Some("[9]↑=Q=N"));
    }

    #[test]
    fn undo_is_refused_while_a_promotion_is_pending() {
        let board = promotion_slide_board(false);
        let mut game = SlideChessGame::from_board(board, Color::White, GameConfig::default());
        game.try_move(sq(7, 7), sq(7, 6)).expect("king step");
        game.try_move(sq(3, 7), sq(3, 6)).expect("king step");
        game.toggle_phase().expect("slide phase");
        assert_eq!(game.try_slide(sc(2, 0)), Ok(TurnProgress::PromotionPending));

        let suspended = game.snapshot();
        assert_eq!(game.undo(), Err(SlideChessError::PromotionPending));
        assert_eq!(game.snapshot(), suspended);
        assert_eq!(game.history_len(), 2);

        assert!(game.resolve_promotion(PieceKind::Queen));
        assert!(game.resolve_promotion(PieceKind::Queen));
        assert_eq!(game.history_len(), 3);
        game.undo().expect("completed turn can be undone");
        assert_eq!(game.board().gap(), sc(0, 0));
        assert_eq!(game.to_move(), Color::White);
    }

    #[test]
    fn promotion_exposing_the_king_rolls_back_the_whole_slide() {
        let board = promotion_slide_board(true);
        let mut game = SlideChessGame::from_board(board, Color::White, GameConfig::default());
        game.toggle_phase().expect("slide phase");
        let before = game.snapshot();

        assert_eq!(game.try_slide(sc(2, 0)), Ok(TurnProgress::PromotionPending));
        assert!(game.resolve_promotion(PieceKind::Queen));
        assert!(game.resolve_promotion(PieceKind::Queen));
        assert_eq!(
            game.pending_promotion().map(|c| c.color),
            Some(Color::Black)
        );
        assert_eq!(
            game.try_resolve_promotion(PieceKind::Knight),
            Err(SlideChessError::PromotionLeavesKingInCheck)
        );

        assert_eq!(game.snapshot(), before);
        assert_eq!(game.gap(), sc(0, 0));
        assert!(game.log().is_empty());
    }

    #[test]
    fn undo_and_reset_restore_earlier_states() {
        let mut game = started_game();
        assert_eq!(game.undo(), Err(SlideChessError::NothingToUndo));

        let before = game.snapshot();
        game.try_move(sq(6, 0), sq(4, 0)).expect("a4");
        assert_eq!(game.history_len(), 1);
        game.undo().expect("undo");
        assert_eq!(game.snapshot(), before);

        game.try_move(sq(6, 0), sq(5, 0)).expect("a3");
        game.reset();
        assert_eq!(game.controller_state(), ControllerState::GapSelection);
        assert_eq!(game.history_len(), 0);
        assert!(game.log().is_empty());
    }

    #[test]
    fn history_is_bounded() {
        let config = GameConfig {
            max_history: 2,
            ..GameConfig::default()
        };
        let mut game = SlideChessGame::with_config(config);
        game.choose_gap_draw(GapDraw::WhitePawn)
            .expect("gap chosen");
        for (from, to) in [
            (sq(6, 0), sq(5, 0)),
            (sq(1, 0), sq(2, 0)),
            (sq(6, 7), sq(5, 7)),
        ] {
            game.try_move(from, to).expect("quiet pawn move");
        }
        assert_eq!(game.history_len(), 2);
    }

    #[test]
    fn snapshot_then_restore_is_identity() {
        let mut game = started_game();
        game.try_move(sq(6, 0), sq(4, 0)).expect("a4");
        let snap = game.snapshot();
        game.restore(&snap);
        assert_eq!(game.snapshot(), snap);
        assert_eq!(snap.game_state().board.check_invariants(), Ok(()));
        assert_eq!(snap.repetition().len(), 1);
    }
}

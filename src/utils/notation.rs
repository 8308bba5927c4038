//! Algebraic-style notation for moves, slides and results.
//!
//! Piece moves use SAN with piece letters, file/rank disambiguation, `x` for
//! captures, `O-O`/`O-O-O`, `=Q` style promotion suffixes and `+`/`#`.
//! Slides are written as the moving section's identity in brackets followed
//! by an arrow for the direction it travels, e.g. `[7]↓`.

use std::fmt;

use crate::game_state::chess_types::{Color, PieceKind, SectionId};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::AppliedMove;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_destinations};
use crate::move_generation::legal_move_shared::{CastleKind, GeneratedMove, MoveKind};
use crate::utils::algebraic::{file_char, rank_char, square_name};

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    #[inline]
    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "½-½",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Check marker appended to a ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckMark {
    #[default]
    None,
    Check,
    Mate,
}

impl CheckMark {
    pub const fn as_str(self) -> &'static str {
        match self {
            CheckMark::None => "",
            CheckMark::Check => "+",
            CheckMark::Mate => "#",
        }
    }
}

/// Marker for the position `defender` now faces.
///
/// Mate means in check with no legal action in either phase.
pub fn check_mark(game_state: &mut GameState, defender: Color) -> CheckMark {
    if !is_king_in_check(&game_state.board, defender) {
        return CheckMark::None;
    }
    if has_any_legal_move(game_state, defender) {
        CheckMark::Check
    } else {
        CheckMark::Mate
    }
}

/// File, rank or full square needed to tell `mv` apart from other pieces of the
/// same kind and color that could also reach its destination.
///
/// Must be called on the position before the move is played. Pawns never need
/// one; their captures are written with the origin file instead.
pub fn disambiguator(game_state: &mut GameState, mv: &GeneratedMove) -> String {
    let Some(piece) = game_state.board.piece_at(mv.from) else {
        return String::new();
    };
    if piece.kind == PieceKind::Pawn {
        return String::new();
    }

    let rivals: Vec<_> = game_state
        .board
        .pieces_of(piece.color)
        .filter(|(sq, p)| p.kind == piece.kind && *sq != mv.from)
        .map(|(sq, _)| sq)
        .collect();

    let mut same_file = false;
    let mut same_rank = false;
    let mut ambiguous = false;
    for rival in rivals {
        if !legal_destinations(game_state, rival).contains(&mv.to) {
            continue;
        }
        ambiguous = true;
        same_file |= rival.col == mv.from.col;
        same_rank |= rival.row == mv.from.row;
    }

    if !ambiguous {
        String::new()
    } else if same_file && same_rank {
        square_name(mv.from)
    } else if same_file {
        rank_char(mv.from.row).to_string()
    } else {
        file_char(mv.from.col).to_string()
    }
}

fn promotion_suffix(out: &mut String, promotions: &[PieceKind]) {
    for kind in promotions {
        out.push('=');
        out.push(kind.letter().to_ascii_uppercase());
    }
}

/// SAN for a played piece move.
pub fn move_san(
    applied: &AppliedMove,
    disambiguator: &str,
    promotions: &[PieceKind],
    mark: CheckMark,
) -> String {
    let mv = applied.mv;
    let mut out = String::with_capacity(8);

    match mv.kind {
        MoveKind::Castle { kind, .. } => {
            out.push_str(match kind {
                CastleKind::Short => "O-O",
                CastleKind::Long => "O-O-O",
            });
        }
        _ => {
            let capture = applied.captured.is_some();
            if applied.piece.kind == PieceKind::Pawn {
                if capture {
                    out.push(file_char(mv.from.col));
                }
            } else {
                out.push(applied.piece.kind.letter().to_ascii_uppercase());
                out.push_str(disambiguator);
            }
            if capture {
                out.push('x');
            }
            out.push_str(&square_name(mv.to));
        }
    }

    promotion_suffix(&mut out, promotions);
    out.push_str(mark.as_str());
    out
}

/// Arrow for a section travelling by `(d_row, d_col)`; row 0 is drawn at the top.
pub const fn slide_arrow(direction: (i8, i8)) -> char {
    match direction {
        (d_row, _) if d_row > 0 => '↓',
        (d_row, _) if d_row < 0 => '↑',
        (_, d_col) if d_col > 0 => '→',
        _ => '←',
    }
}

/// Notation for a slide of `section` travelling in `direction`.
pub fn slide_san(
    section: SectionId,
    direction: (i8, i8),
    promotions: &[PieceKind],
    mark: CheckMark,
) -> String {
    let mut out = format!("[{}]{}", section, slide_arrow(direction));
    promotion_suffix(&mut out, promotions);
    out.push_str(mark.as_str());
    out
}

/// `threefold`, `fourfold`, `fivefold`, then `N-fold`.
pub fn repetition_rule_name(occurrences: u8) -> String {
    match occurrences {
        3 => "threefold".to_owned(),
        4 => "fourfold".to_owned(),
        5 => "fivefold".to_owned(),
        n => format!("{n}-fold"),
    }
}

pub fn draw_explanation(occurrences: u8) -> String {
    format!("Draw by {} repetition.", repetition_rule_name(occurrences))
}

/// Game record: plies in order, plus result and draw explanation once known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveLog {
    first_mover: Color,
    plies: Vec<String>,
    result: Option<GameResult>,
    explanation: Option<String>,
}

impl Default for MoveLog {
    fn default() -> Self {
        Self::new(Color::White)
    }
}

impl MoveLog {
    pub fn new(first_mover: Color) -> Self {
        Self {
            first_mover,
            plies: Vec::new(),
            result: None,
            explanation: None,
        }
    }

    pub fn push(&mut self, ply: String) {
        self.plies.push(ply);
    }

    #[inline]
    pub fn plies(&self) -> &[String] {
        &self.plies
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.plies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&str> {
        self.plies.last().map(String::as_str)
    }

    /// Records the result; later calls are ignored.
    pub fn set_result(&mut self, result: GameResult) {
        if self.result.is_none() {
            self.result = Some(result);
        }
    }

    #[inline]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn set_draw_explanation(&mut self, explanation: String) {
        self.explanation = Some(explanation);
    }

    pub fn draw_explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Numbered one-line record, e.g. `1.Nc3 e5 2.[7]↓ 1-0`.
    pub fn to_plain_text(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.plies.len() + 1);
        let mut plies = self.plies.iter();
        let mut number = 1;

        if self.first_mover == Color::Black {
            if let Some(first) = plies.next() {
                parts.push(format!("{number}...{first}"));
                number += 1;
            }
        }

        loop {
            let Some(white) = plies.next() else { break };
            match plies.next() {
                Some(black) => parts.push(format!("{number}.{white} {black}")),
                None => parts.push(format!("{number}.{white}")),
            }
            number += 1;
        }

        if let Some(result) = self.result {
            parts.push(result.token().to_owned());
        }
        parts.join(" ")
    }
}

impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_text())
    }
}

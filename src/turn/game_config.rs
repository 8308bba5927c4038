//! Tunables for a slide chess game.

use crate::game_state::chess_rules::{ALTERNATE_GAP, PRIMARY_GAP, REPETITION_LIMIT};
use crate::game_state::chess_types::SectionCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Gap kept when the white pawn is drawn.
    pub primary_gap: SectionCoord,
    /// Gap used when the black pawn is drawn.
    pub alternate_gap: SectionCoord,
    /// Occurrences of one repetition key that draw the game.
    pub repetition_limit: u8,
    /// Completed turns kept for undo.
    pub max_history: usize,
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            primary_gap: PRIMARY_GAP,
            alternate_gap: ALTERNATE_GAP,
            repetition_limit: REPETITION_LIMIT,
            max_history: 50,
            max_events: 256,
        }
    }
}

//! Crate root module declarations for the slide chess rules engine.
//!
//! This file exposes the subsystems (board and game state, move and slide
//! generation, the turn controller, and utility helpers) so the binary,
//! benches, and external front ends can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board_model;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod en_passant;
    pub mod game_state;
    pub mod repetition;
    pub mod undo_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod legal_slides;
    pub mod perft;
}

pub mod turn {
    pub mod game_config;
    pub mod game_events;
    pub mod promotion;
    pub mod turn_controller;
    pub mod turn_state;
}

pub mod utils {
    pub mod algebraic;
    pub mod notation;
    pub mod render_game_state;
}

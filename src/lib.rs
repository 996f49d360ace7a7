//! Crate root module declarations for the Plum Rules chess rules engine.
//!
//! This file exposes the rules subsystems (game state, piece geometry, move
//! legality, game-end detection, notation, threat analysis, and utility
//! helpers) so binaries, tests, and external tooling can import stable module
//! paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_engine;
    pub mod game_state;
    pub mod outcome;
}

pub mod moves {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_evaluator;
    pub mod legal_move_generator;
    pub mod move_effect;
    pub mod perft;
}

pub mod game_end {
    pub mod game_end_detector;
    pub mod insufficient_material;
    pub mod repetition;
}

pub mod notation {
    pub mod ledger_parser;
    pub mod move_notation;
}

pub mod analysis {
    pub mod highlights;
    pub mod mate_preview;
    pub mod threat_analyzer;
}

pub mod console {
    pub mod console_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
}

//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Action`] values. The
//! mapping depends on the game state: on the title screen any key starts the
//! game, and movement keys only mean something while a piece is falling.

pub mod map;

pub use term_tetris_types as types;

pub use map::{map_key, should_quit};

//! Terminal renderer for the game.
//!
//! The game core reports what changed as [`core::Output`] events; this crate
//! turns those events into terminal frames. It renders into a simple
//! framebuffer that is flushed to the terminal with changed-run diffing.
//!
//! - [`BoardView`] mirrors the field from events and draws it (pure, no I/O)
//! - [`FrameBuffer`] holds one frame of styled glyphs
//! - [`TerminalRenderer`] owns raw mode / alternate screen and writes frames

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use term_tetris_core as core;
pub use term_tetris_types as types;

pub use board_view::{kind_color, BoardView, Viewport};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

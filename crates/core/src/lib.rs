//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game and nothing else: no terminal, no
//! key codes, no wall-clock calls except through the injected [`Clock`].
//!
//! # Module Structure
//!
//! - [`piece`]: piece kinds' occupancy maps and rotation
//! - [`grid`]: the field, collision checks, placement and line clearing
//! - [`game`]: the state machine driving one play session
//! - [`output`]: events reported to a renderer
//! - [`rng`]: where new piece kinds come from
//! - [`clock`]: time sources for gravity
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use term_tetris_core::{Game, GameConfig, ManualClock, Output, ScriptedPieces};
//! use term_tetris_types::{Action, PieceKind, State};
//!
//! let mut game = Game::with_sources(
//!     GameConfig::new(20, 10),
//!     ScriptedPieces::repeat(PieceKind::O),
//!     ManualClock::new(),
//! );
//!
//! assert!(matches!(game.tick(), Some(Output::Welcome { width: 10, height: 20 })));
//! assert_eq!(game.action(Action::StartGame), Some(Output::RemoveWelcome));
//! assert!(matches!(game.tick(), Some(Output::Materialize(_))));
//! assert_eq!(game.state(), State::Falling);
//!
//! game.clock_mut().advance(Duration::from_millis(600));
//! assert!(matches!(game.tick(), Some(Output::Move(p)) if p.row == 1));
//! ```

pub mod clock;
pub mod game;
pub mod grid;
pub mod output;
pub mod piece;
pub mod rng;

pub use term_tetris_types as types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use game::{Game, GameConfig};
pub use grid::{ClearedRows, Grid};
pub use output::Output;
pub use piece::Piece;
pub use rng::{PieceSource, RandomPieces, ScriptedPieces, SimpleRng};

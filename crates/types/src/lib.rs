//! Core types module - shared vocabulary and constants
//!
//! This crate defines the fundamental values exchanged between the engine, the
//! input mapper, and the renderer. Everything here is plain data with no
//! external dependencies.
//!
//! # Field Dimensions
//!
//! The field is `height x width` cells, addressed as `(row, col)` with row 0 at
//! the top. Defaults:
//!
//! - **Height**: 20 rows
//! - **Width**: 10 columns
//! - **Spawn anchor**: (0, 0), the top-left corner
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FALL_DELAY_MS` | 500 | Interval between automatic one-row falls |
//! | `TICK_MS` | 16 | Play loop polling interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use term_tetris_types::{Action, PieceKind, State};
//!
//! assert_eq!(PieceKind::from_fill(5), Some(PieceKind::I));
//! assert_eq!(PieceKind::I.fill(), 5);
//!
//! assert_eq!(Action::StartGame.as_str(), "startGame");
//! assert!(State::Falling.has_active_piece());
//! ```

/// Default field height in rows
pub const DEFAULT_HEIGHT: usize = 20;

/// Default field width in columns
pub const DEFAULT_WIDTH: usize = 10;

/// Smallest accepted field dimension. Every piece fits in every orientation.
pub const MIN_DIMENSION: usize = 4;

/// Largest accepted field dimension
pub const MAX_DIMENSION: usize = 1000;

/// Gravity interval in milliseconds (one row every half second)
pub const FALL_DELAY_MS: u64 = 500;

/// Play loop polling interval in milliseconds
pub const TICK_MS: u64 = 16;

/// A cell of the field: 0 is empty, otherwise a [`PieceKind::fill`] value.
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// The six piece kinds
///
/// Each kind has a fixed default occupancy and a unique non-zero fill value
/// that is written into the field when a piece of that kind is placed:
///
/// | Kind | Fill | Default shape |
/// |------|------|---------------|
/// | J | 1 | `#..` / `###` |
/// | L | 2 | `###` / `#..` |
/// | S | 3 | `.##` / `##.` |
/// | Z | 4 | `##.` / `.##` |
/// | I | 5 | `####` |
/// | O | 6 | `##` / `##` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    J,
    L,
    S,
    Z,
    I,
    O,
}

impl PieceKind {
    /// All kinds, in fill-value order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::I,
        PieceKind::O,
    ];

    /// Cell value written into the field for this kind
    pub const fn fill(self) -> Cell {
        match self {
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::I => 5,
            PieceKind::O => 6,
        }
    }

    /// Inverse of [`PieceKind::fill`]
    ///
    /// # Examples
    ///
    /// ```
    /// use term_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_fill(1), Some(PieceKind::J));
    /// assert_eq!(PieceKind::from_fill(0), None);
    /// assert_eq!(PieceKind::from_fill(7), None);
    /// ```
    pub fn from_fill(cell: Cell) -> Option<Self> {
        match cell {
            1 => Some(PieceKind::J),
            2 => Some(PieceKind::L),
            3 => Some(PieceKind::S),
            4 => Some(PieceKind::Z),
            5 => Some(PieceKind::I),
            6 => Some(PieceKind::O),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::I => "i",
            PieceKind::O => "o",
        }
    }
}

/// Game states
///
/// ```text
/// Start --StartGame--> Materialize --> Falling --> Place --> Materialize ...
///   any state --Quit--> End
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Title screen; waits for `StartGame`
    Start,
    /// A new piece is spawned on the next tick
    Materialize,
    /// The active piece is under gravity and player control
    Falling,
    /// The active piece is merged into the field on the next tick
    Place,
    /// Terminal state
    End,
}

impl State {
    /// Whether an active piece is guaranteed to exist in this state
    pub fn has_active_piece(&self) -> bool {
        matches!(self, State::Falling | State::Place)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            State::Start => "start",
            State::Materialize => "materialize",
            State::Falling => "falling",
            State::Place => "place",
            State::End => "end",
        }
    }
}

/// Requests the driver hands to the game
///
/// Actions that do not apply to the current state are ignored silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the session from any state
    Quit,
    /// Shift the piece one column left
    Left,
    /// Shift the piece one column right
    Right,
    /// Move the piece one row down
    Down,
    /// Drop the piece as far as it goes and place it
    Drop,
    /// Turn the piece a quarter turn
    Rotate,
    /// Leave the title screen
    StartGame,
}

impl Action {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::Left => "left",
            Action::Right => "right",
            Action::Down => "down",
            Action::Drop => "drop",
            Action::Rotate => "rotate",
            Action::StartGame => "startGame",
        }
    }
}

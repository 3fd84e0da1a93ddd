//! Game module - the state machine
//!
//! Ties the grid, the active piece, the piece source and the gravity clock
//! together. A driver calls [`Game::action`] with whatever the player asked
//! for and then [`Game::tick`] once per loop iteration; both return the
//! [`Output`] event (if any) the renderer needs to apply.

use std::time::Duration;

use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::grid::{ClearedRows, Grid};
use crate::output::Output;
use crate::piece::Piece;
use crate::rng::{PieceSource, RandomPieces};
use crate::types::{Action, State, DEFAULT_HEIGHT, DEFAULT_WIDTH, FALL_DELAY_MS};

/// Field size and gravity speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    /// Interval between automatic one-row falls
    pub fall_delay: Duration,
}

impl GameConfig {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            ..Self::default()
        }
    }

    pub fn with_fall_delay(mut self, fall_delay: Duration) -> Self {
        self.fall_delay = fall_delay;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            fall_delay: Duration::from_millis(FALL_DELAY_MS),
        }
    }
}

/// One play session
#[derive(Debug, Clone)]
pub struct Game<S = RandomPieces, C = SystemClock> {
    grid: Grid,
    active: Option<Piece>,
    state: State,
    fall_delay: Duration,
    since_last_fall: Duration,
    pieces: S,
    clock: C,
}

impl Game {
    /// Game with uniformly random pieces and wall-clock gravity
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self::with_sources(config, RandomPieces::new(seed), SystemClock::new())
    }
}

impl<S: PieceSource, C: Clock> Game<S, C> {
    pub fn with_sources(config: GameConfig, pieces: S, clock: C) -> Self {
        Self {
            grid: Grid::new(config.height, config.width),
            active: None,
            state: State::Start,
            fall_delay: config.fall_delay,
            since_last_fall: Duration::ZERO,
            pieces,
            clock,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == State::End
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn fall_delay(&self) -> Duration {
        self.fall_delay
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Replace the active piece.
    pub fn set_active(&mut self, piece: Piece) {
        self.active = Some(piece);
    }

    /// Force a state. States that need a piece require one to be set first.
    ///
    /// # Panics
    ///
    /// In debug builds, if `state` needs an active piece and none is set.
    pub fn set_state(&mut self, state: State) {
        debug_assert!(
            !state.has_active_piece() || self.active.is_some(),
            "{:?} requires an active piece",
            state
        );
        self.state = state;
    }

    /// Replace the field contents.
    ///
    /// # Panics
    ///
    /// If `grid` does not have the game's height and width.
    pub fn set_grid(&mut self, grid: Grid) {
        assert_eq!(
            (grid.height(), grid.width()),
            (self.grid.height(), self.grid.width()),
            "grid dimensions are fixed"
        );
        self.grid = grid;
    }

    fn transition(&mut self, next: State) {
        if self.state != next {
            debug!(from = self.state.as_str(), to = next.as_str(), "state transition");
        }
        self.state = next;
    }

    /// Apply a player request. Requests that do not fit the current state are ignored.
    pub fn action(&mut self, action: Action) -> Option<Output> {
        match (action, self.state) {
            (Action::Quit, _) => {
                self.transition(State::End);
                None
            }
            (Action::StartGame, State::Start) => {
                // Time spent on the title screen does not count toward gravity.
                let _ = self.clock.elapsed();
                self.transition(State::Materialize);
                Some(Output::RemoveWelcome)
            }
            (Action::Left, State::Falling) => self.move_hor(-1),
            (Action::Right, State::Falling) => self.move_hor(1),
            (Action::Down, State::Falling) => self.move_down(1),
            (Action::Drop, State::Falling) => self.hard_drop(),
            (Action::Rotate, State::Falling) => self.rotate(),
            (action, state) => {
                trace!(
                    action = action.as_str(),
                    state = state.as_str(),
                    "ignored action"
                );
                None
            }
        }
    }

    /// Advance the state machine by one loop iteration
    pub fn tick(&mut self) -> Option<Output> {
        match self.state {
            State::Start => Some(Output::Welcome {
                width: self.grid.width(),
                height: self.grid.height(),
            }),
            State::Materialize => Some(self.materialize()),
            State::Falling => self.timed_fall(),
            State::Place => {
                let cleared = self.place();
                (!cleared.is_empty()).then_some(Output::LineClear(cleared))
            }
            State::End => None,
        }
    }

    /// Spawn a new piece at the top-left corner and start it falling
    pub fn materialize(&mut self) -> Output {
        let kind = self.pieces.next_kind();
        let piece = Piece::new(kind, 0, 0);
        debug!(kind = kind.as_str(), "materialized piece");
        self.active = Some(piece);
        self.transition(State::Falling);
        Output::Materialize(piece)
    }

    fn timed_fall(&mut self) -> Option<Output> {
        self.since_last_fall += self.clock.elapsed();
        if self.since_last_fall > self.fall_delay {
            self.since_last_fall = Duration::ZERO;
            return self.move_down(1);
        }
        None
    }

    /// Move the piece down one row at a time, at most `max_rows` rows.
    ///
    /// If it cannot move at all it is resting: the state becomes `Place` and
    /// nothing is reported. The merge itself happens on the next tick.
    pub fn move_down(&mut self, max_rows: usize) -> Option<Output> {
        let piece = self.active?;

        let mut fallen = 0;
        while fallen < max_rows
            && !self
                .grid
                .collides(&piece, piece.row + fallen as i32 + 1, piece.col)
        {
            fallen += 1;
        }

        if fallen == 0 {
            trace!(row = piece.row, col = piece.col, "piece is resting");
            self.transition(State::Place);
            return None;
        }

        let moved = piece.at(piece.row + fallen as i32, piece.col);
        trace!(row = moved.row, col = moved.col, rows = fallen, "piece fell");
        self.active = Some(moved);
        Some(Output::Move(moved))
    }

    /// Shift the piece `|col_delta|` columns in the direction of its sign,
    /// stopping at the first blocked step.
    pub fn move_hor(&mut self, col_delta: i32) -> Option<Output> {
        let piece = self.active?;
        let step = if col_delta >= 0 { 1 } else { -1 };

        let mut col = piece.col;
        let mut moved = 0;
        while moved < col_delta.unsigned_abs()
            && !self.grid.collides(&piece, piece.row, col + step)
        {
            col += step;
            moved += 1;
        }

        if moved == 0 {
            trace!(col_delta, "horizontal move blocked");
            return None;
        }

        let shifted = piece.at(piece.row, col);
        trace!(row = shifted.row, col = shifted.col, "piece shifted");
        self.active = Some(shifted);
        Some(Output::Move(shifted))
    }

    /// Drop the piece as far as it goes; it is placed on the next tick.
    pub fn hard_drop(&mut self) -> Option<Output> {
        self.transition(State::Place);
        self.move_down(self.grid.height())
    }

    /// Turn the piece a quarter turn in place.
    ///
    /// A turn that would leave the field or overlap settled cells is refused.
    pub fn rotate(&mut self) -> Option<Output> {
        let rotated = self.active?.rotated();
        if self.grid.collides(&rotated, rotated.row, rotated.col) {
            trace!(row = rotated.row, col = rotated.col, "rotation blocked");
            return None;
        }
        self.active = Some(rotated);
        Some(Output::Rotate(rotated))
    }

    /// Merge the active piece into the field and clear any rows it completed.
    ///
    /// Returns the cleared row indices, ascending, as they were before clearing.
    pub fn place(&mut self) -> ClearedRows {
        let cleared = match self.active {
            Some(piece) => {
                self.grid.insert(&piece);
                let top = piece.row.max(0) as usize;
                let rows = self.grid.full_rows_in(top..top + piece.height());
                if !rows.is_empty() {
                    self.grid.clear_rows(&rows);
                    debug!(rows = ?rows.as_slice(), "cleared lines");
                }
                debug!(
                    kind = piece.kind.as_str(),
                    row = piece.row,
                    col = piece.col,
                    "placed piece"
                );
                rows
            }
            None => ClearedRows::new(),
        };
        self.transition(State::Materialize);
        cleared
    }

    /// Whether `piece` would be blocked at `(row, col)`
    pub fn collides(&self, piece: &Piece, row: i32, col: i32) -> bool {
        self.grid.collides(piece, row, col)
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.grid.is_row_full(row)
    }

    /// Remove `row` and drop everything above it by one
    pub fn clear_line(&mut self, row: usize) {
        self.grid.clear_row(row);
    }
}

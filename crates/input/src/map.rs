//! Key mapping from terminal events to game actions.

use crate::types::{Action, State};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to an action for the given state.
///
/// Quit keys win everywhere. On the title screen every other key starts the
/// game. While falling, arrows or `j`/`l`/`k`/`i` move and rotate and space
/// drops. Anything else maps to nothing.
pub fn map_key(key: KeyEvent, state: State) -> Option<Action> {
    if should_quit(key) {
        return Some(Action::Quit);
    }

    match state {
        State::Start => Some(Action::StartGame),
        State::Falling => match key.code {
            KeyCode::Left | KeyCode::Char('j') | KeyCode::Char('J') => Some(Action::Left),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(Action::Right),
            KeyCode::Down | KeyCode::Char('k') | KeyCode::Char('K') => Some(Action::Down),
            KeyCode::Up | KeyCode::Char('i') | KeyCode::Char('I') => Some(Action::Rotate),
            KeyCode::Char(' ') => Some(Action::Drop),
            _ => None,
        },
        State::Materialize | State::Place | State::End => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

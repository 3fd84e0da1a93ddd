//! Events the game reports to its renderer.

use crate::grid::ClearedRows;
use crate::piece::Piece;

/// What changed during one `action` or `tick` call
///
/// Pieces are carried by value; a renderer may keep them without aliasing the
/// game's live state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Title screen should be shown for a `width x height` field
    Welcome { width: usize, height: usize },
    /// Title screen should be hidden
    RemoveWelcome,
    /// A new piece appeared
    Materialize(Piece),
    /// The active piece moved
    Move(Piece),
    /// The active piece turned
    Rotate(Piece),
    /// These rows (ascending, indices before the clear) were removed
    LineClear(ClearedRows),
}

impl Output {
    /// Event name, used for logs and journals
    pub fn as_str(&self) -> &'static str {
        match self {
            Output::Welcome { .. } => "welcome",
            Output::RemoveWelcome => "removeWelcome",
            Output::Materialize(_) => "materialize",
            Output::Move(_) => "move",
            Output::Rotate(_) => "rotate",
            Output::LineClear(_) => "lineClear",
        }
    }

    /// Piece snapshot carried by the event, if any
    pub fn piece(&self) -> Option<&Piece> {
        match self {
            Output::Materialize(p) | Output::Move(p) | Output::Rotate(p) => Some(p),
            _ => None,
        }
    }
}

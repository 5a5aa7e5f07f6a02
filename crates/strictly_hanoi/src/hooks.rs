//! Extension points invoked by the rules engine.

use super::outcome::DropOutcome;
use super::piece::Piece;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Callbacks fired at fixed moments of the selection lifecycle.
///
/// All methods default to doing nothing. The engine performs no other I/O.
pub trait LevelHooks {
    /// A piece was picked.
    fn on_select(&mut self, _piece: &Piece) {}

    /// A pick hit nothing.
    fn on_deselect(&mut self) {}

    /// The selected piece moved under the cursor.
    fn on_drag(&mut self, _piece: &Piece) {}

    /// A drop was resolved, committed or not.
    fn on_drop(&mut self, _piece: &Piece, _outcome: &DropOutcome) {}

    /// The win peg holds every piece. Fired once per level.
    fn on_win(&mut self, _stats: &Statistics) {}
}

/// Hooks that ignore every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl LevelHooks for NoHooks {}

/// Running counters for one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Statistics {
    /// Committed moves.
    moves: u32,
    /// Drops that were rolled back.
    rejected: u32,
}

impl Statistics {
    pub(crate) fn record_move(&mut self) {
        self.moves += 1;
    }

    pub(crate) fn record_rejection(&mut self) {
        self.rejected += 1;
    }
}

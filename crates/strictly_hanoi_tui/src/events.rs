//! Level hooks that forward gameplay events to the UI.

use derive_more::Display;
use strictly_hanoi::{
    DropOutcome, LevelHooks, PegId, Piece, PieceId, RejectReason, Resolution, Statistics,
};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Messages sent from the level to the UI.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum GameEvent {
    /// A piece was picked.
    #[display("Picked {}", _0)]
    Selected(PieceId),

    /// A pick hit nothing.
    #[display("Nothing picked")]
    Deselected,

    /// A drop was committed.
    #[display("{} moved {} -> {}", piece, from, to)]
    Moved {
        /// Moved piece.
        piece: PieceId,
        /// Peg it left.
        from: PegId,
        /// Peg it now rests on.
        to: PegId,
    },

    /// A drop was rolled back.
    #[display("{} rolled back: {}", piece, reason)]
    Rejected {
        /// Dropped piece.
        piece: PieceId,
        /// Why it went back.
        reason: RejectReason,
    },

    /// The level was solved.
    #[display("Solved in {} moves! Press 'r' to restart or 'q' to quit.", moves)]
    Won {
        /// Committed moves.
        moves: u32,
        /// Rolled-back drops.
        rejected: u32,
    },
}

/// Hooks that push a [`GameEvent`] for every lifecycle callback.
#[derive(Debug, Clone)]
pub struct ChannelHooks {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelHooks {
    /// Creates hooks sending on `tx`.
    pub fn new(tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: GameEvent) {
        if self.tx.send(event).is_err() {
            debug!("UI receiver dropped, event discarded");
        }
    }
}

impl LevelHooks for ChannelHooks {
    fn on_select(&mut self, piece: &Piece) {
        self.send(GameEvent::Selected(piece.id()));
    }

    fn on_deselect(&mut self) {
        self.send(GameEvent::Deselected);
    }

    fn on_drag(&mut self, piece: &Piece) {
        trace!(piece = %piece.name(), "Dragging");
    }

    fn on_drop(&mut self, piece: &Piece, outcome: &DropOutcome) {
        let event = match *outcome.resolution() {
            Resolution::Committed { from, to } => GameEvent::Moved {
                piece: piece.id(),
                from,
                to,
            },
            Resolution::RolledBack(reason) => GameEvent::Rejected {
                piece: piece.id(),
                reason,
            },
        };
        self.send(event);
    }

    fn on_win(&mut self, stats: &Statistics) {
        self.send(GameEvent::Won {
            moves: *stats.moves(),
            rejected: *stats.rejected(),
        });
    }
}

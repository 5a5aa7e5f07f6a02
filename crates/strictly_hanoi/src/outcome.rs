//! First-class results of resolving a drop.
//!
//! Every release of a dragged piece resolves to exactly one of two outcomes:
//! the move is committed, or the piece is rolled back. There is no partial
//! state in between.

use super::geometry::Point;
use super::types::{PegId, PieceId, Rank};
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Why a drop was refused.
#[derive(Debug, Clone, Copy, PartialEq, Display, Serialize, Deserialize)]
pub enum RejectReason {
    /// No peg's bounds were crossed by the piece's edges.
    #[display("Not dropped on a peg")]
    NoTarget,

    /// The piece was dropped back onto the peg it came from.
    #[display("Dropped back onto {}", _0)]
    SamePeg(PegId),

    /// The destination's top piece is narrower than the dropped piece.
    #[display("{} is topped by a narrower piece ({} < {})", peg, top, piece)]
    Narrower {
        /// Destination peg.
        peg: PegId,
        /// Rank of the destination's top piece.
        top: Rank,
        /// Rank of the dropped piece.
        piece: Rank,
    },

    /// The piece is not on any peg (no selection source).
    #[display("Piece has no source peg")]
    Unplaced,

    /// The piece is buried under another piece on its source peg.
    #[display("{} is not the top of {}", piece, peg)]
    NotTop {
        /// The buried piece.
        piece: PieceId,
        /// Peg holding it.
        peg: PegId,
    },
}

/// What happened to the dropped piece.
#[derive(Debug, Clone, Copy, PartialEq, Display, Serialize, Deserialize)]
pub enum Resolution {
    /// The piece moved to a new peg.
    #[display("moved {} -> {}", from, to)]
    Committed {
        /// Peg the piece left.
        from: PegId,
        /// Peg the piece now rests on.
        to: PegId,
    },

    /// The piece went back to where the drag began.
    #[display("rolled back: {}", _0)]
    RolledBack(RejectReason),
}

impl Resolution {
    /// Returns true if the move was committed.
    pub fn is_committed(&self) -> bool {
        matches!(self, Resolution::Committed { .. })
    }
}

/// Full record of one drop.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize, Deserialize)]
pub struct DropOutcome {
    /// The dropped piece.
    piece: PieceId,
    /// Commit or rollback.
    resolution: Resolution,
    /// Where the piece rests after resolution.
    position: Point,
    /// Whether the level is won after this drop.
    won: bool,
}

impl DropOutcome {
    pub(crate) fn new(piece: PieceId, resolution: Resolution, position: Point, won: bool) -> Self {
        Self {
            piece,
            resolution,
            position,
            won,
        }
    }
}

impl std::fmt::Display for DropOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.piece, self.resolution)
    }
}

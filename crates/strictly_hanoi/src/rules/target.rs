//! Choosing the peg a piece was dropped on.

use super::super::geometry::Rectangle;
use super::super::peg::Peg;
use super::super::types::PegId;
use tracing::{instrument, trace};

/// Returns the peg a piece with bounds `piece` was dropped on, if any.
///
/// A peg qualifies when an edge of the piece crosses its bounds. When several
/// qualify, the one whose centreline is closest to the piece's centreline
/// wins; an exact tie goes to the later-created peg.
#[instrument(level = "trace", skip(pegs))]
pub fn accepting_peg(pegs: &[Peg], piece: &Rectangle) -> Option<PegId> {
    let center = piece.center_x();
    let mut best: Option<(PegId, f64)> = None;

    for peg in pegs.iter().rev() {
        if !peg.rect().edge_overlaps(piece) {
            continue;
        }
        let distance = (peg.rect().center_x() - center).abs();
        trace!(peg = %peg.id(), distance, "Peg accepts piece");
        match best {
            Some((_, d)) if d <= distance => {}
            _ => best = Some((peg.id(), distance)),
        }
    }

    best.map(|(id, _)| id)
}

//! Win detection.

use super::super::peg::Peg;
use super::super::types::PegId;
use tracing::instrument;

/// Returns true if the win peg holds every piece in play.
///
/// Stack order is guaranteed by placement, so a full win peg is always in
/// rank order. A missing peg never wins.
#[instrument(skip(pegs))]
pub fn is_won(pegs: &[Peg], win_peg: PegId, total_pieces: usize) -> bool {
    pegs.get(win_peg.index())
        .is_some_and(|peg| total_pieces > 0 && peg.len() == total_pieces)
}

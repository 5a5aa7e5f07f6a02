//! Stacking legality and resting positions.

use super::super::geometry::Point;
use super::super::outcome::RejectReason;
use super::super::peg::Peg;
use super::super::piece::Piece;
use super::super::types::{PegId, PieceId};
use tracing::instrument;

/// Finds the peg whose stack contains `piece`, scanning the last-created peg first.
#[instrument(level = "trace", skip(pegs))]
pub fn find_peg(pegs: &[Peg], piece: PieceId) -> Option<PegId> {
    pegs.iter().rev().find(|peg| peg.contains(piece)).map(Peg::id)
}

/// Decides whether `piece` may be dropped on `dest`.
///
/// A drop is refused when the destination is the piece's own peg, or when the
/// destination's top piece is narrower than the dropped one. An empty peg
/// accepts anything.
#[instrument(skip(pegs, pieces))]
pub fn check_drop(pegs: &[Peg], pieces: &[Piece], dest: PegId, piece: PieceId) -> Result<(), RejectReason> {
    let Some(peg) = pegs.get(dest.index()) else {
        return Err(RejectReason::NoTarget);
    };
    let Some(dropped) = pieces.get(piece.index()) else {
        return Err(RejectReason::Unplaced);
    };

    if let Some(top) = peg.top().and_then(|id| pieces.get(id.index()))
        && top.rank() < dropped.rank()
    {
        return Err(RejectReason::Narrower {
            peg: dest,
            top: top.rank(),
            piece: dropped.rank(),
        });
    }

    if find_peg(pegs, piece) == Some(dest) {
        return Err(RejectReason::SamePeg(dest));
    }

    Ok(())
}

/// Where `piece` comes to rest on `dest`.
///
/// Directly on top of `top` when the peg is occupied, otherwise flush with
/// the peg's base; always centred on the peg's centreline.
#[instrument(level = "trace", skip_all)]
pub fn fit_position(dest: &Peg, top: Option<&Piece>, piece: &Piece) -> Point {
    let height = piece.rect().height();
    let y = match top {
        Some(top) => top.rect().y() - height,
        None => dest.rect().bottom() - height,
    };
    let x = dest.rect().center_x() - piece.rect().width() / 2.0;
    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;
    use crate::types::Fill;

    fn peg(i: usize, x: f64) -> Peg {
        Peg::new(PegId(i), Rectangle::new(x, 190.0, 5.0, 80.0).unwrap(), Fill::from("#444"))
    }

    fn piece(i: usize, w: f64) -> Piece {
        Piece::new(PieceId(i), Rectangle::new(0.0, 0.0, w, 20.0).unwrap(), Fill::from("#0f0"))
    }

    fn setup() -> (Vec<Peg>, Vec<Piece>) {
        let mut pegs = vec![peg(0, 62.0), peg(1, 142.0), peg(2, 222.0)];
        let pieces = vec![piece(0, 85.0), piece(1, 60.0), piece(2, 40.0)];
        pegs[0].push(PieceId(0));
        pegs[0].push(PieceId(1));
        pegs[1].push(PieceId(2));
        (pegs, pieces)
    }

    #[test]
    fn test_find_peg() {
        let (pegs, _) = setup();
        assert_eq!(find_peg(&pegs, PieceId(1)), Some(PegId(0)));
        assert_eq!(find_peg(&pegs, PieceId(2)), Some(PegId(1)));
        assert_eq!(find_peg(&pegs, PieceId(7)), None);
    }

    #[test]
    fn test_wider_on_narrower_rejected() {
        let (pegs, pieces) = setup();
        // 60 onto a peg topped by 40.
        assert!(matches!(
            check_drop(&pegs, &pieces, PegId(1), PieceId(1)),
            Err(RejectReason::Narrower { .. })
        ));
    }

    #[test]
    fn test_narrower_on_wider_accepted() {
        let (pegs, pieces) = setup();
        assert_eq!(check_drop(&pegs, &pieces, PegId(0), PieceId(2)), Ok(()));
    }

    #[test]
    fn test_empty_peg_accepts() {
        let (pegs, pieces) = setup();
        assert_eq!(check_drop(&pegs, &pieces, PegId(2), PieceId(1)), Ok(()));
    }

    #[test]
    fn test_same_peg_rejected() {
        let (pegs, pieces) = setup();
        assert_eq!(
            check_drop(&pegs, &pieces, PegId(0), PieceId(1)),
            Err(RejectReason::SamePeg(PegId(0)))
        );
    }

    #[test]
    fn test_equal_rank_accepted() {
        let mut pegs = vec![peg(0, 62.0), peg(1, 142.0)];
        let pieces = vec![piece(0, 40.0), piece(1, 40.0)];
        pegs[0].push(PieceId(0));
        pegs[1].push(PieceId(1));
        assert_eq!(check_drop(&pegs, &pieces, PegId(0), PieceId(1)), Ok(()));
    }

    #[test]
    fn test_fit_on_empty_peg_sits_on_base() {
        let dest = peg(2, 222.0);
        let p = piece(0, 40.0);
        let pos = fit_position(&dest, None, &p);
        assert_eq!(pos, Point::new(204.5, 250.0));
    }

    #[test]
    fn test_fit_on_top_piece_touches_it() {
        let dest = peg(0, 62.0);
        let mut top = piece(0, 85.0);
        top.move_to(22.0, 250.0);
        let p = piece(1, 60.0);
        let pos = fit_position(&dest, Some(&top), &p);
        assert_eq!(pos, Point::new(34.5, 230.0));
    }
}

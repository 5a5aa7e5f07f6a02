//! Movable blocks.

use super::geometry::{Point, Rectangle};
use super::types::{Fill, PieceId, Rank};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Saved identity and position of a piece, used to roll back a rejected drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Display name of the piece when the snapshot was taken.
    pub name: String,
    /// Top-left corner at snapshot time.
    pub position: Point,
    /// Rank at snapshot time.
    pub rank: Rank,
}

/// A draggable block.
///
/// Size is fixed at creation; only the position changes during play. Which
/// peg holds the piece is tracked by peg stacks, not by the piece itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    name: String,
    rect: Rectangle,
    fill: Fill,
    draggable: bool,
    rank: Rank,
    saved: Option<Snapshot>,
}

impl Piece {
    /// Creates a piece; the rank is derived from the rectangle's width.
    #[instrument(skip(rect, fill), fields(id = %id))]
    pub fn new(id: PieceId, rect: Rectangle, fill: Fill) -> Self {
        Self {
            id,
            name: id.to_string(),
            rank: Rank::from_width(rect.width()),
            rect,
            fill,
            draggable: true,
            saved: None,
        }
    }

    /// Sets whether the piece responds to picks.
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Returns the stable identity.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bounds.
    pub fn rect(&self) -> &Rectangle {
        &self.rect
    }

    /// Returns the visual tag.
    pub fn fill(&self) -> &Fill {
        &self.fill
    }

    /// Returns true if the piece can be picked up.
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Returns the stacking rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the last saved snapshot, if any.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.saved.as_ref()
    }

    /// Moves the top-left corner to `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.rect.move_to(x, y);
    }

    /// Records the current identity and position, replacing any earlier snapshot.
    #[instrument(skip(self), fields(piece = %self.name))]
    pub fn save(&mut self) {
        self.saved = Some(Snapshot {
            name: self.name.clone(),
            position: self.rect.origin(),
            rank: self.rank,
        });
    }

    /// Restores the saved position.
    ///
    /// Returns false and leaves the piece untouched when nothing was saved.
    #[instrument(skip(self), fields(piece = %self.name))]
    pub fn restore_position(&mut self) -> bool {
        match &self.saved {
            Some(snapshot) => {
                let Point { x, y } = snapshot.position;
                self.rect.move_to(x, y);
                debug!(x, y, "Piece restored");
                true
            }
            None => {
                warn!("Restore requested without a saved position");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece() -> Piece {
        let rect = Rectangle::new(22.0, 250.0, 85.0, 20.0).unwrap();
        Piece::new(PieceId(0), rect, Fill::from("#00ff00"))
    }

    #[test]
    fn test_name_and_rank() {
        let p = piece();
        assert_eq!(p.name(), "Piece1");
        assert_eq!(p.rank(), Rank::from_width(85.0));
        assert!(p.is_draggable());
    }

    #[test]
    fn test_restore_without_save_is_noop() {
        let mut p = piece();
        p.move_to(1.0, 2.0);
        assert!(!p.restore_position());
        assert_eq!(p.rect().origin(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_save_then_restore() {
        let mut p = piece();
        p.save();
        p.move_to(100.0, 100.0);
        assert!(p.restore_position());
        assert_eq!(p.rect().origin(), Point::new(22.0, 250.0));
        assert_eq!(p.rect().width(), 85.0);
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let mut p = piece();
        p.save();
        p.move_to(5.0, 6.0);
        p.save();
        p.move_to(50.0, 60.0);
        p.restore_position();
        assert_eq!(p.rect().origin(), Point::new(5.0, 6.0));
    }
}

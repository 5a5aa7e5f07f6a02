//! Axis-aligned rectangles and the hit tests built on them.
//!
//! Every shape on the board is a [`Rectangle`]. Two tests matter to the game:
//! point containment (cursor hit-testing) and edge overlap (drop acceptance).

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Error raised when a rectangle would have an empty or undefined area.
#[derive(Debug, Clone, Copy, PartialEq, Display, Error)]
#[display("Rectangle size must be positive and finite, got {}x{}", width, height)]
pub struct GeometryError {
    /// Requested width.
    pub width: f64,
    /// Requested height.
    pub height: f64,
}

/// A point in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate (grows downwards).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with its origin in the top-left corner.
///
/// Width and height are always positive; only the position changes after
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rectangle {
    /// Creates a rectangle, rejecting non-positive or non-finite sizes.
    #[instrument]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, GeometryError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) || !x.is_finite() || !y.is_finite() {
            return Err(GeometryError { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Left edge.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Top edge.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Width (always positive).
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height (always positive).
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal centreline.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Moves the rectangle so its top-left corner sits at `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Returns true if the point lies inside the closed bounds.
    ///
    /// All four edges are inclusive.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        self.x <= px && px <= self.right() && self.y <= py && py <= self.bottom()
    }

    /// Returns true if any point on an edge of `other` lies inside `self`.
    ///
    /// The top and bottom edges of `other` are horizontal segments spanning
    /// the half-open `[other.x, other.right)`; the left and right edges are
    /// vertical segments spanning `[other.y, other.bottom)`. A segment touches
    /// `self` when its fixed coordinate falls within `self` on that axis and
    /// its span intersects `self` on the other axis. The bottom-right corner
    /// of `other` therefore never counts on its own. Full containment of
    /// `self` inside `other` does not count either: a wide block hovering over
    /// a thin peg with no edge crossing it is not dropped on that peg.
    #[instrument(level = "trace")]
    pub fn edge_overlaps(&self, other: &Rectangle) -> bool {
        let spans_x = other.x <= self.right() && self.x < other.right();
        let spans_y = other.y <= self.bottom() && self.y < other.bottom();
        let within_y = |ey: f64| self.y <= ey && ey <= self.bottom();
        let within_x = |ex: f64| self.x <= ex && ex <= self.right();

        let horizontal = spans_x && (within_y(other.y) || within_y(other.bottom()));
        let vertical = spans_y && (within_x(other.x) || within_x(other.right()));
        horizontal || vertical
    }

    /// Returns true if the rectangle lies entirely outside a `width` x `height`
    /// surface anchored at the origin.
    pub fn is_outside(&self, width: f64, height: f64) -> bool {
        self.x > width || self.y > height || self.right() < 0.0 || self.bottom() < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
        Rectangle::new(x, y, w, h).expect("valid rectangle")
    }

    #[test]
    fn test_rejects_degenerate_sizes() {
        assert!(Rectangle::new(0.0, 0.0, 0.0, 10.0).is_err());
        assert!(Rectangle::new(0.0, 0.0, 10.0, -1.0).is_err());
        assert!(Rectangle::new(0.0, 0.0, f64::NAN, 1.0).is_err());
        assert!(Rectangle::new(f64::INFINITY, 0.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_contains_is_inclusive_on_every_edge() {
        let r = rect(10.0, 20.0, 30.0, 40.0);
        assert!(r.contains(10.0, 20.0));
        assert!(r.contains(40.0, 60.0));
        assert!(r.contains(10.0, 60.0));
        assert!(r.contains(40.0, 20.0));
        assert!(r.contains(25.0, 20.0));
        assert!(!r.contains(9.999, 30.0));
        assert!(!r.contains(25.0, 60.001));
    }

    #[test]
    fn test_edge_overlap_bottom_edge_crossing_peg() {
        let peg = rect(62.0, 190.0, 5.0, 80.0);
        let block = rect(22.0, 180.0, 85.0, 20.0);
        assert!(peg.edge_overlaps(&block));
    }

    #[test]
    fn test_edge_overlap_block_above_peg() {
        let peg = rect(62.0, 190.0, 5.0, 80.0);
        let block = rect(22.0, 150.0, 85.0, 20.0);
        assert!(!peg.edge_overlaps(&block));
    }

    #[test]
    fn test_edge_overlap_ignores_full_enclosure() {
        // The block swallows the peg whole: no block edge crosses it.
        let peg = rect(62.0, 190.0, 5.0, 80.0);
        let block = rect(0.0, 100.0, 200.0, 200.0);
        assert!(!peg.edge_overlaps(&block));
    }

    #[test]
    fn test_edge_overlap_vertical_edge() {
        let peg = rect(62.0, 190.0, 5.0, 80.0);
        // Left edge of the block runs down through the peg.
        let block = rect(64.0, 170.0, 40.0, 200.0);
        assert!(peg.edge_overlaps(&block));
    }

    #[test]
    fn test_edge_overlap_touching_corner_counts() {
        let peg = rect(0.0, 0.0, 10.0, 10.0);
        let block = rect(10.0, 10.0, 5.0, 5.0);
        assert!(peg.edge_overlaps(&block));
    }

    #[test]
    fn test_edge_overlap_bottom_right_corner_does_not_count() {
        let peg = rect(10.0, 10.0, 5.0, 5.0);
        let block = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!peg.edge_overlaps(&block));
        // One unit further and the bottom edge crosses the peg.
        let block = rect(0.0, 0.0, 11.0, 10.0);
        assert!(peg.edge_overlaps(&block));
    }

    #[test]
    fn test_outside_surface() {
        assert!(rect(301.0, 0.0, 5.0, 5.0).is_outside(300.0, 300.0));
        assert!(rect(-10.0, 0.0, 5.0, 5.0).is_outside(300.0, 300.0));
        assert!(!rect(-2.0, 0.0, 5.0, 5.0).is_outside(300.0, 300.0));
        assert!(!rect(300.0, 300.0, 5.0, 5.0).is_outside(300.0, 300.0));
    }
}

//! Drawable shapes and the rendering surface they paint onto.
//!
//! The board holds a closed set of shape kinds: pieces, pegs and annotations.
//! They share a [`Rectangle`] and the [`Shape`] capability interface; the
//! board refers to them through [`ShapeId`].

use super::geometry::Rectangle;
use super::peg::Peg;
use super::piece::Piece;
use super::types::{Fill, PegId, PieceId};
use derive_getters::Getters;

/// Drawing backend supplied by the frontend.
///
/// `fill_rect` and `stroke_rect` are the only primitives the core needs.
/// `clear` resets the whole surface before a repaint; `fill_text` is optional.
pub trait Surface {
    /// Clears the `width` x `height` drawing area.
    fn clear(&mut self, width: f64, height: f64);

    /// Fills a rectangle with a colour.
    fn fill_rect(&mut self, rect: &Rectangle, fill: &Fill);

    /// Outlines a rectangle with a colour and line width.
    fn stroke_rect(&mut self, rect: &Rectangle, stroke: &Fill, width: f64);

    /// Writes text inside a rectangle. Surfaces without text support ignore it.
    fn fill_text(&mut self, _rect: &Rectangle, _text: &str, _fill: &Fill) {}
}

/// Capabilities shared by everything drawn on the board.
pub trait Shape {
    /// Bounds of the shape.
    fn rect(&self) -> &Rectangle;

    /// Whether a pick may select this shape.
    fn is_draggable(&self) -> bool;

    /// Paints the shape.
    fn draw(&self, surface: &mut dyn Surface);

    /// Returns true if the point lies inside the shape's closed bounds.
    fn contains(&self, x: f64, y: f64) -> bool {
        self.rect().contains(x, y)
    }
}

impl Shape for Piece {
    fn rect(&self) -> &Rectangle {
        Piece::rect(self)
    }

    fn is_draggable(&self) -> bool {
        Piece::is_draggable(self)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(Piece::rect(self), self.fill());
    }
}

impl Shape for Peg {
    fn rect(&self) -> &Rectangle {
        Peg::rect(self)
    }

    fn is_draggable(&self) -> bool {
        false
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(Peg::rect(self), self.fill());
    }
}

/// Free-standing label drawn above pegs and pieces. Never draggable.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Annotation {
    /// Bounds of the label.
    rect: Rectangle,
    /// Background colour.
    fill: Fill,
    /// Label text (may be empty).
    text: String,
}

impl Annotation {
    /// Creates an annotation.
    pub fn new(rect: Rectangle, fill: Fill, text: impl Into<String>) -> Self {
        Self {
            rect,
            fill,
            text: text.into(),
        }
    }

    /// Replaces the label text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Shape for Annotation {
    fn rect(&self) -> &Rectangle {
        &self.rect
    }

    fn is_draggable(&self) -> bool {
        false
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(&self.rect, &self.fill);
        if !self.text.is_empty() {
            surface.fill_text(&self.rect, &self.text, &self.fill);
        }
    }
}

/// Reference to a drawable shape, in the board's drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeId {
    /// A peg owned by the level.
    Peg(PegId),
    /// A piece owned by the level.
    Piece(PieceId),
}

//! Fixed spikes holding stacks of pieces.

use super::geometry::Rectangle;
use super::types::{Fill, PegId, PieceId};
use tracing::{instrument, trace, warn};

/// A fixed vertical target owning an ordered stack of pieces (last = top).
///
/// The stack holds piece identities; the pieces themselves live in the level.
/// Stack ordering is enforced when pieces are placed, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct Peg {
    id: PegId,
    name: String,
    rect: Rectangle,
    fill: Fill,
    stack: Vec<PieceId>,
}

impl Peg {
    /// Default peg width in surface units.
    pub const DEFAULT_WIDTH: f64 = 5.0;
    /// Default peg height in surface units.
    pub const DEFAULT_HEIGHT: f64 = 80.0;

    /// Creates an empty peg.
    #[instrument(skip(rect, fill), fields(id = %id))]
    pub fn new(id: PegId, rect: Rectangle, fill: Fill) -> Self {
        Self {
            id,
            name: id.to_string(),
            rect,
            fill,
            stack: Vec::new(),
        }
    }

    /// Returns the stable identity.
    pub fn id(&self) -> PegId {
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

    /// Returns the stack, bottom first.
    pub fn stack(&self) -> &[PieceId] {
        &self.stack
    }

    /// Number of pieces on the peg.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns true if nothing rests on the peg.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Places a piece on top.
    #[instrument(skip(self), fields(peg = %self.name))]
    pub fn push(&mut self, piece: PieceId) {
        self.stack.push(piece);
        trace!(height = self.stack.len(), "Piece pushed");
    }

    /// Removes and returns the top piece; an empty peg yields `None`.
    #[instrument(skip(self), fields(peg = %self.name))]
    pub fn pop(&mut self) -> Option<PieceId> {
        let top = self.stack.pop();
        if top.is_none() {
            warn!("Pop on empty peg ignored");
        }
        top
    }

    /// Returns true if the piece is anywhere in the stack.
    pub fn contains(&self, piece: PieceId) -> bool {
        self.stack.contains(&piece)
    }

    /// Returns the top piece, if any.
    pub fn top(&self) -> Option<PieceId> {
        self.stack.last().copied()
    }

    /// Returns true if `piece` is the top of the stack; false on an empty peg.
    pub fn is_top(&self, piece: PieceId) -> bool {
        self.top() == Some(piece)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peg() -> Peg {
        let rect = Rectangle::new(62.0, 190.0, Peg::DEFAULT_WIDTH, Peg::DEFAULT_HEIGHT).unwrap();
        Peg::new(PegId(0), rect, Fill::from(Fill::DEFAULT_PEG))
    }

    #[test]
    fn test_empty_peg_queries() {
        let mut p = peg();
        assert_eq!(p.top(), None);
        assert!(!p.is_top(PieceId(0)));
        assert_eq!(p.pop(), None);
        assert!(p.is_empty());
    }

    #[test]
    fn test_push_pop_order() {
        let mut p = peg();
        p.push(PieceId(0));
        p.push(PieceId(1));
        assert_eq!(p.top(), Some(PieceId(1)));
        assert!(p.is_top(PieceId(1)));
        assert!(!p.is_top(PieceId(0)));
        assert!(p.contains(PieceId(0)));
        assert_eq!(p.pop(), Some(PieceId(1)));
        assert_eq!(p.top(), Some(PieceId(0)));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_name_numbering() {
        assert_eq!(peg().name(), "Peg1");
    }
}

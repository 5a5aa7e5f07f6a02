//! Pointer interaction and repaint bookkeeping.
//!
//! The [`Board`] turns pointer events into picks, drags and drops. It owns the
//! drawing order, the selection and the dirty flag, and delegates every
//! legality question to the [`Level`] it wraps.

use super::geometry::Point;
use super::level::Level;
use super::outcome::DropOutcome;
use super::shape::{Annotation, Shape, ShapeId, Surface};
use super::types::PieceId;
use tracing::{debug, instrument, trace};

/// Where the pointer interaction currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum InteractionPhase {
    /// No pick is active.
    Idle,
    /// A piece was picked and may be dragged on the next move.
    Selected,
    /// The picked piece is following the pointer.
    Dragging,
}

/// Session object driving one level from pointer events.
#[derive(Debug)]
pub struct Board {
    level: Level,
    shapes: Vec<ShapeId>,
    annotations: Vec<Annotation>,
    width: f64,
    height: f64,
    valid: bool,
    selection: Option<PieceId>,
    drag_ready: bool,
    dragging: bool,
    drag_offset: Point,
}

impl Board {
    /// Wraps a level. Pegs are drawn first, then pieces, then annotations.
    #[instrument(skip(level), fields(level = %level.name()))]
    pub fn new(level: Level) -> Self {
        let shapes = level
            .pegs()
            .iter()
            .map(|peg| ShapeId::Peg(peg.id()))
            .chain(level.pieces().iter().map(|piece| ShapeId::Piece(piece.id())))
            .collect();
        let width = *level.config().width();
        let height = *level.config().height();
        Self {
            level,
            shapes,
            annotations: Vec::new(),
            width,
            height,
            valid: false,
            selection: None,
            drag_ready: false,
            dragging: false,
            drag_offset: Point::default(),
        }
    }

    /// Returns the rules engine.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Surface width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Surface height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Shapes in drawing order.
    pub fn shapes(&self) -> &[ShapeId] {
        &self.shapes
    }

    /// Annotations in drawing order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// The highlighted piece, if any.
    pub fn selection(&self) -> Option<PieceId> {
        self.selection
    }

    /// Cursor-to-origin offset captured at the last pick.
    pub fn drag_offset(&self) -> Point {
        self.drag_offset
    }

    /// Returns true if a repaint is pending.
    pub fn is_dirty(&self) -> bool {
        !self.valid
    }

    /// Current interaction phase.
    pub fn phase(&self) -> InteractionPhase {
        if self.dragging {
            InteractionPhase::Dragging
        } else if self.drag_ready {
            InteractionPhase::Selected
        } else {
            InteractionPhase::Idle
        }
    }

    /// Marks the surface for repaint on the next tick.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Adds a label drawn above everything else; returns its index.
    #[instrument(skip(self, annotation))]
    pub fn add_annotation(&mut self, annotation: Annotation) -> usize {
        self.annotations.push(annotation);
        self.invalidate();
        self.annotations.len() - 1
    }

    /// Replaces an annotation's text. Returns false for an unknown index.
    pub fn set_annotation_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.annotations.get_mut(index) {
            Some(annotation) => {
                annotation.set_text(text);
                self.invalidate();
                true
            }
            None => false,
        }
    }

    fn shape(&self, id: ShapeId) -> Option<&dyn Shape> {
        match id {
            ShapeId::Peg(peg) => self.level.peg(peg).map(|p| p as &dyn Shape),
            ShapeId::Piece(piece) => self.level.piece(piece).map(|p| p as &dyn Shape),
        }
    }

    /// Returns the topmost draggable shape containing the point.
    #[instrument(level = "trace", skip(self))]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<ShapeId> {
        self.shapes.iter().rev().copied().find(|&id| {
            self.shape(id)
                .is_some_and(|shape| shape.is_draggable() && shape.contains(x, y))
        })
    }

    /// Handles pointer-down.
    ///
    /// Selects the topmost draggable piece under the pointer and captures the
    /// drag offset; a miss clears the selection and tells the level. A drag
    /// whose pointer-up never arrived is resolved first.
    #[instrument(skip(self))]
    pub fn pick(&mut self, x: f64, y: f64) -> Option<PieceId> {
        if self.dragging {
            debug!("Pointer-down during drag, resolving pending drop");
            self.release();
        }

        let hit = match self.hit_test(x, y) {
            Some(ShapeId::Piece(id)) => self.level.piece(id).map(|p| (id, p.rect().origin())),
            _ => None,
        };

        let Some((id, origin)) = hit else {
            self.level.deselect();
            self.deselect_all();
            return None;
        };

        self.selection = Some(id);
        self.drag_offset = Point::new(x - origin.x, y - origin.y);
        self.drag_ready = true;
        self.dragging = false;
        self.level.select(id);
        self.invalidate();
        debug!(piece = %id, offset_x = self.drag_offset.x, offset_y = self.drag_offset.y, "Picked");
        Some(id)
    }

    fn deselect_all(&mut self) {
        if self.selection.take().is_some() {
            self.invalidate();
        }
        self.drag_ready = false;
        self.dragging = false;
    }

    /// Handles pointer-move.
    ///
    /// Moves the selected piece so it keeps its offset from the pointer. Does
    /// nothing unless a pick is active and the level allows dragging.
    #[instrument(level = "trace", skip(self))]
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        if !self.drag_ready || !self.level.can_drag() {
            return false;
        }
        self.dragging = true;
        let moved = self
            .level
            .drag_selected_to(x - self.drag_offset.x, y - self.drag_offset.y);
        self.invalidate();
        trace!(moved, "Drag");
        moved
    }

    /// Handles pointer-up.
    ///
    /// If a drag was in progress the level resolves the drop. Drag state is
    /// cleared either way; the highlight stays on the piece.
    #[instrument(skip(self))]
    pub fn release(&mut self) -> Option<DropOutcome> {
        let outcome = if self.dragging {
            self.level.drop_selected()
        } else {
            None
        };
        if outcome.is_some() {
            self.invalidate();
        }
        self.dragging = false;
        self.drag_ready = false;
        outcome
    }

    /// Restarts the level and clears interaction state.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.level.reset();
        self.selection = None;
        self.drag_ready = false;
        self.dragging = false;
        self.drag_offset = Point::default();
        self.invalidate();
    }

    /// Timer entry point: repaints only if something changed since the last paint.
    ///
    /// Returns true if a repaint happened.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> bool {
        if self.valid {
            return false;
        }
        self.repaint(surface);
        true
    }

    /// Clears the surface and draws every visible shape, then the highlight.
    #[instrument(level = "debug", skip_all)]
    pub fn repaint(&mut self, surface: &mut dyn Surface) {
        surface.clear(self.width, self.height);

        for &id in &self.shapes {
            let Some(shape) = self.shape(id) else {
                continue;
            };
            if shape.rect().is_outside(self.width, self.height) {
                trace!(?id, "Skipping off-surface shape");
                continue;
            }
            shape.draw(surface);
        }

        for annotation in &self.annotations {
            annotation.draw(surface);
        }

        if let Some(piece) = self.selection.and_then(|id| self.level.piece(id)) {
            let style = self.level.selection_style();
            surface.stroke_rect(piece.rect(), &style.color, style.width);
        }

        self.valid = true;
    }
}

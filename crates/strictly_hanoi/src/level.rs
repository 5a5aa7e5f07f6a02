//! The rules engine.
//!
//! A [`Level`] owns every peg and piece, decides whether a drag or drop is
//! legal, and is the only writer of peg stacks. The interaction layer asks it
//! questions and hands it drops; it never judges legality itself.

use super::config::LevelConfig;
use super::error::LevelError;
use super::geometry::{Point, Rectangle};
use super::hooks::{LevelHooks, NoHooks, Statistics};
use super::invariants::{InvariantSet, PuzzleInvariants};
use super::outcome::{DropOutcome, RejectReason, Resolution};
use super::peg::Peg;
use super::piece::Piece;
use super::rules;
use super::types::{PegId, PieceId, SelectionStyle};
use derive_getters::Getters;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// The currently selected piece and the peg holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct Selection {
    /// Selected piece.
    piece: PieceId,
    /// Peg whose stack contains the piece.
    source: Option<PegId>,
}

/// Game state and rules for one level.
pub struct Level {
    config: LevelConfig,
    pegs: Vec<Peg>,
    pieces: Vec<Piece>,
    win_peg: PegId,
    selected: Option<Selection>,
    stats: Statistics,
    won: bool,
    hooks: Box<dyn LevelHooks>,
}

impl std::fmt::Debug for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Level")
            .field("name", self.config.name())
            .field("pegs", &self.pegs)
            .field("pieces", &self.pieces)
            .field("win_peg", &self.win_peg)
            .field("selected", &self.selected)
            .field("stats", &self.stats)
            .field("won", &self.won)
            .finish_non_exhaustive()
    }
}

impl Level {
    /// Builds a level, stacking every piece on the start peg.
    ///
    /// Malformed configuration fails here rather than during play.
    #[instrument(skip(config), fields(name = %config.name()))]
    pub fn new(config: &LevelConfig) -> Result<Self, LevelError> {
        config.validate()?;
        let (pegs, pieces) = Self::build(config)?;
        info!(pegs = pegs.len(), pieces = pieces.len(), "Level ready");
        Ok(Self {
            config: config.clone(),
            pegs,
            pieces,
            win_peg: PegId(*config.win_peg()),
            selected: None,
            stats: Statistics::default(),
            won: false,
            hooks: Box::new(NoHooks),
        })
    }

    /// Loads a level file and builds the level from it.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let config = LevelConfig::from_file(path)?;
        Self::new(&config)
    }

    /// Installs the callbacks fired during play.
    pub fn with_hooks(mut self, hooks: impl LevelHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    fn build(config: &LevelConfig) -> Result<(Vec<Peg>, Vec<Piece>), LevelError> {
        let mut pegs = config
            .pegs()
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let rect = Rectangle::new(spec.x, spec.y, spec.width, spec.height).map_err(|reason| {
                    LevelError::InvalidDimensions {
                        shape: format!("peg {}", i + 1),
                        reason,
                    }
                })?;
                Ok(Peg::new(PegId(i), rect, spec.fill.clone()))
            })
            .collect::<Result<Vec<_>, LevelError>>()?;

        let start = *config.start_peg();
        let mut pieces: Vec<Piece> = Vec::with_capacity(config.pieces().len());
        for (i, spec) in config.pieces().iter().enumerate() {
            let rect = Rectangle::new(0.0, 0.0, spec.width, spec.height).map_err(|reason| {
                LevelError::InvalidDimensions {
                    shape: format!("piece {}", i + 1),
                    reason,
                }
            })?;
            let mut piece = Piece::new(PieceId(i), rect, spec.fill.clone()).with_draggable(spec.draggable);
            let peg = pegs.get_mut(start).ok_or(LevelError::StartPegOutOfRange {
                index: start,
                pegs: config.pegs().len(),
            })?;
            let top = peg.top().and_then(|id| pieces.get(id.index()));
            let Point { x, y } = rules::fit_position(peg, top, &piece);
            piece.move_to(x, y);
            piece.save();
            peg.push(piece.id());
            pieces.push(piece);
        }
        Ok((pegs, pieces))
    }

    /// Puts every piece back on the start peg and clears selection and counters.
    #[instrument(skip(self), fields(name = %self.config.name()))]
    pub fn reset(&mut self) {
        match Self::build(&self.config) {
            Ok((pegs, pieces)) => {
                self.pegs = pegs;
                self.pieces = pieces;
                self.selected = None;
                self.stats = Statistics::default();
                self.won = false;
                info!("Level reset");
            }
            Err(e) => warn!(error = %e, "Reset failed, keeping current state"),
        }
    }

    /// Returns the configuration the level was built from.
    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Returns the level name.
    pub fn name(&self) -> &str {
        self.config.name()
    }

    /// Returns all pegs in creation order.
    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    /// Returns all pieces in creation order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Looks up a peg.
    pub fn peg(&self, id: PegId) -> Option<&Peg> {
        self.pegs.get(id.index())
    }

    /// Looks up a piece.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    /// Returns the peg that must hold every piece to win.
    pub fn win_peg(&self) -> PegId {
        self.win_peg
    }

    /// Returns the selection highlight style.
    pub fn selection_style(&self) -> &SelectionStyle {
        self.config.selection()
    }

    /// Returns the current selection.
    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    /// Returns the move counters.
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Returns true once the win hook has fired.
    pub fn has_won(&self) -> bool {
        self.won
    }

    /// Returns the peg holding `piece`.
    pub fn find_peg(&self, piece: PieceId) -> Option<PegId> {
        rules::find_peg(&self.pegs, piece)
    }

    /// Selects a piece and snapshots its position for rollback.
    ///
    /// Returns false if the piece does not exist.
    #[instrument(skip(self))]
    pub fn select(&mut self, piece: PieceId) -> bool {
        let source = rules::find_peg(&self.pegs, piece);
        let Some(selected) = self.pieces.get_mut(piece.index()) else {
            warn!("Select requested for unknown piece");
            return false;
        };
        selected.save();
        self.selected = Some(Selection { piece, source });
        debug!(piece = %selected.name(), source = ?source, "Piece selected");
        self.hooks.on_select(selected);
        true
    }

    /// Clears the selection.
    #[instrument(skip(self))]
    pub fn deselect(&mut self) {
        self.selected = None;
        self.hooks.on_deselect();
    }

    /// Returns true if the selected piece is the top of its source peg.
    #[instrument(level = "trace", skip(self))]
    pub fn can_drag(&self) -> bool {
        self.selected.is_some_and(|sel| {
            sel.source
                .and_then(|peg| self.peg(peg))
                .is_some_and(|peg| peg.is_top(sel.piece))
        })
    }

    /// Moves the selected piece's top-left corner to `(x, y)` if dragging is allowed.
    #[instrument(level = "trace", skip(self))]
    pub fn drag_selected_to(&mut self, x: f64, y: f64) -> bool {
        if !self.can_drag() {
            return false;
        }
        let Some(piece) = self
            .selected
            .and_then(|sel| self.pieces.get_mut(sel.piece.index()))
        else {
            return false;
        };
        piece.move_to(x, y);
        self.hooks.on_drag(piece);
        true
    }

    /// Returns true if `piece` may be dropped on `peg`.
    #[instrument(skip(self))]
    pub fn can_drop(&self, peg: PegId, piece: PieceId) -> bool {
        rules::check_drop(&self.pegs, &self.pieces, peg, piece).is_ok()
    }

    /// Returns the peg the piece's current bounds were dropped on, if any.
    #[instrument(skip(self))]
    pub fn accepting_peg(&self, piece: PieceId) -> Option<PegId> {
        let rect = self.piece(piece)?.rect();
        rules::accepting_peg(&self.pegs, rect)
    }

    /// Returns true if the win peg holds every piece.
    pub fn is_won(&self) -> bool {
        rules::is_won(&self.pegs, self.win_peg, self.pieces.len())
    }

    /// Resolves the release of the selected piece.
    ///
    /// The piece either moves onto the accepting peg (popped from its source,
    /// pushed onto the destination, re-snapshotted) or returns to where the
    /// drag began. A piece that is not the top of its source peg always goes
    /// back. The drop hook fires either way, then the win state is
    /// re-evaluated. Returns `None` only when nothing is selected.
    #[instrument(skip(self))]
    pub fn drop_selected(&mut self) -> Option<DropOutcome> {
        let selection = self.selected?;
        let piece = selection.piece;
        let index = piece.index();

        let resolution = match (selection.source, self.accepting_peg(piece)) {
            (Some(peg), _) if !self.can_drag() => {
                Resolution::RolledBack(RejectReason::NotTop { piece, peg })
            }
            (_, None) => Resolution::RolledBack(RejectReason::NoTarget),
            (source, Some(dest)) => match rules::check_drop(&self.pegs, &self.pieces, dest, piece) {
                Err(reason) => Resolution::RolledBack(reason),
                Ok(()) => match source {
                    Some(from) if self.commit(piece, from, dest) => {
                        Resolution::Committed { from, to: dest }
                    }
                    Some(peg) => Resolution::RolledBack(RejectReason::NotTop { piece, peg }),
                    None => Resolution::RolledBack(RejectReason::Unplaced),
                },
            },
        };

        match resolution {
            Resolution::Committed { from, to } => {
                self.stats.record_move();
                self.selected = Some(Selection {
                    piece,
                    source: Some(to),
                });
                info!(piece = %piece, %from, %to, moves = self.stats.moves(), "Move committed");
            }
            Resolution::RolledBack(reason) => {
                if let Some(p) = self.pieces.get_mut(index) {
                    p.restore_position();
                }
                self.stats.record_rejection();
                info!(piece = %piece, %reason, "Drop rejected");
            }
        }

        let won = self.is_won();
        let position = self.pieces.get(index)?.rect().origin();
        let outcome = DropOutcome::new(piece, resolution, position, won);

        if let Some(dropped) = self.pieces.get(index) {
            debug!(piece = %dropped.name(), "Piece dropped");
            self.hooks.on_drop(dropped, &outcome);
        }

        if won && !self.won {
            self.won = true;
            info!(moves = self.stats.moves(), rejected = self.stats.rejected(), "Level won");
            self.hooks.on_win(&self.stats);
        }

        Some(outcome)
    }

    /// Moves `piece` from the top of `from` onto `to`.
    ///
    /// Leaves every stack untouched and returns false unless `piece` is the
    /// top of `from` and both pegs exist.
    fn commit(&mut self, piece: PieceId, from: PegId, to: PegId) -> bool {
        let Some(dest) = self.pegs.get(to.index()) else {
            return false;
        };
        let source_top = self.peg(from).and_then(Peg::top);
        if source_top != Some(piece) {
            warn!(piece = %piece, %from, top = ?source_top, "Refusing to commit a buried piece");
            return false;
        }
        let top = dest.top().and_then(|id| self.pieces.get(id.index()));
        let Some(moving) = self.pieces.get(piece.index()) else {
            return false;
        };
        let Point { x, y } = rules::fit_position(dest, top, moving);

        if let Some(source) = self.pegs.get_mut(from.index()) {
            source.pop();
        }
        if let Some(dest) = self.pegs.get_mut(to.index()) {
            dest.push(piece);
        }
        if let Some(moving) = self.pieces.get_mut(piece.index()) {
            moving.move_to(x, y);
            moving.save();
        }

        self.assert_invariants();
        true
    }

    fn assert_invariants(&self) {
        if !cfg!(any(debug_assertions, feature = "strict-invariants")) {
            return;
        }
        if let Err(violations) = PuzzleInvariants::check_all(self) {
            for violation in &violations {
                warn!(invariant = %violation.description, "Invariant violated");
            }
            debug_assert!(violations.is_empty(), "Postcondition failed after drop");
        }
    }
}

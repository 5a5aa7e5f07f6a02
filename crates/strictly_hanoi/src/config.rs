//! Level descriptions.
//!
//! A level is fixed once built: where the pegs stand, which pieces exist and
//! which peg wins. Levels load from TOML or come from the built-in
//! constructors.

use super::error::{ConfigError, LevelError};
use super::geometry::Rectangle;
use super::peg::Peg;
use super::types::{Fill, SelectionStyle};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Placement and look of one peg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PegSpec {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    #[serde(default = "default_peg_width")]
    pub width: f64,
    /// Height.
    #[serde(default = "default_peg_height")]
    pub height: f64,
    /// Colour.
    #[serde(default = "default_peg_fill")]
    pub fill: Fill,
}

impl PegSpec {
    /// A default-sized peg at `(x, y)`.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            width: default_peg_width(),
            height: default_peg_height(),
            fill: default_peg_fill(),
        }
    }
}

/// Size and look of one piece. Position is derived when the level is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceSpec {
    /// Width; also the stacking rank.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Colour.
    #[serde(default = "default_piece_fill")]
    pub fill: Fill,
    /// Whether the piece can be picked up.
    #[serde(default = "default_draggable")]
    pub draggable: bool,
}

impl PieceSpec {
    /// A draggable piece with the given size and colour.
    pub fn new(width: f64, height: f64, fill: impl Into<Fill>) -> Self {
        Self {
            width,
            height,
            fill: fill.into(),
            draggable: true,
        }
    }
}

fn default_peg_width() -> f64 {
    Peg::DEFAULT_WIDTH
}

fn default_peg_height() -> f64 {
    Peg::DEFAULT_HEIGHT
}

fn default_peg_fill() -> Fill {
    Fill::new(Fill::DEFAULT_PEG)
}

fn default_piece_fill() -> Fill {
    Fill::new(Fill::DEFAULT_PIECE)
}

fn default_draggable() -> bool {
    true
}

fn default_name() -> String {
    "Untitled".to_string()
}

fn default_surface() -> f64 {
    300.0
}

fn default_win_peg() -> usize {
    2
}

/// Complete description of a level.
///
/// Pieces are listed bottom-first and all start stacked on `start_peg`.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Level name.
    #[serde(default = "default_name")]
    name: String,
    /// Drawing surface width.
    #[serde(default = "default_surface")]
    width: f64,
    /// Drawing surface height.
    #[serde(default = "default_surface")]
    height: f64,
    /// Index of the peg that must hold every piece to win.
    #[serde(default = "default_win_peg")]
    win_peg: usize,
    /// Index of the peg holding the initial tower.
    #[serde(default)]
    start_peg: usize,
    /// Highlight drawn around the selected piece.
    #[serde(default)]
    selection: SelectionStyle,
    /// Pegs in creation order.
    pegs: Vec<PegSpec>,
    /// Pieces, bottom of the initial tower first.
    pieces: Vec<PieceSpec>,
}

const PALETTE: [&str; 6] = [
    "rgba(20, 217, 94, .5)",
    "rgba(61, 114, 232, .5)",
    "rgba(231, 82, 82, .5)",
    "rgba(240, 200, 40, .5)",
    "rgba(170, 90, 220, .5)",
    "rgba(40, 200, 210, .5)",
];

impl LevelConfig {
    /// Creates a level from its parts with default surface and selection style.
    #[instrument(skip_all, fields(pegs = pegs.len(), pieces = pieces.len()))]
    pub fn new(name: impl Into<String>, pegs: Vec<PegSpec>, pieces: Vec<PieceSpec>) -> Self {
        Self {
            name: name.into(),
            width: default_surface(),
            height: default_surface(),
            win_peg: default_win_peg(),
            start_peg: 0,
            selection: SelectionStyle::default(),
            pegs,
            pieces,
        }
    }

    /// The three-piece level "First".
    #[instrument]
    pub fn classic() -> Self {
        Self::new(
            "First",
            vec![
                PegSpec::at(62.0, 190.0),
                PegSpec::at(142.0, 190.0),
                PegSpec::at(222.0, 190.0),
            ],
            vec![
                PieceSpec::new(85.0, 20.0, PALETTE[0]),
                PieceSpec::new(60.0, 20.0, PALETTE[1]),
                PieceSpec::new(40.0, 20.0, PALETTE[2]),
            ],
        )
    }

    /// A three-peg level with `pieces` blocks of strictly decreasing width.
    #[instrument]
    pub fn tower(pieces: usize) -> Self {
        const PIECE_HEIGHT: f64 = 20.0;
        const STEP: f64 = 15.0;
        const MIN_WIDTH: f64 = 25.0;
        const GAP: f64 = 15.0;
        const TOP: f64 = 40.0;

        let widest = MIN_WIDTH + STEP * pieces.saturating_sub(1) as f64;
        let column = widest + GAP;
        let peg_height = PIECE_HEIGHT * pieces as f64 + PIECE_HEIGHT;

        let pegs = (0..3)
            .map(|i| PegSpec {
                height: peg_height,
                ..PegSpec::at(
                    GAP + column * i as f64 + widest / 2.0 - Peg::DEFAULT_WIDTH / 2.0,
                    TOP,
                )
            })
            .collect();
        let specs = (0..pieces)
            .map(|i| {
                PieceSpec::new(
                    MIN_WIDTH + STEP * (pieces - 1 - i) as f64,
                    PIECE_HEIGHT,
                    PALETTE[i % PALETTE.len()],
                )
            })
            .collect();

        let mut config = Self::new(format!("Tower of {}", pieces), pegs, specs);
        config.width = GAP + column * 3.0;
        config.height = TOP + peg_height + 2.0 * PIECE_HEIGHT;
        config
    }

    /// Parses a level from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        debug!(name = %config.name, "Level parsed");
        Ok(config)
    }

    /// Loads a level from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        info!(name = %config.name, "Level loaded");
        Ok(config)
    }

    /// Serializes the level as TOML.
    #[instrument(skip(self))]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::new(format!("Failed to serialize level: {}", e)))
    }

    /// Sets the winning peg index.
    pub fn with_win_peg(mut self, index: usize) -> Self {
        self.win_peg = index;
        self
    }

    /// Sets the starting peg index.
    pub fn with_start_peg(mut self, index: usize) -> Self {
        self.start_peg = index;
        self
    }

    /// Sets the drawing surface size.
    pub fn with_surface(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the selection highlight.
    pub fn with_selection(mut self, selection: SelectionStyle) -> Self {
        self.selection = selection;
        self
    }

    /// Checks everything a level needs before play can start.
    #[instrument(skip(self), fields(name = %self.name))]
    pub fn validate(&self) -> Result<(), LevelError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(LevelError::InvalidSurface {
                width: self.width,
                height: self.height,
            });
        }
        if self.pegs.is_empty() {
            return Err(LevelError::NoPegs);
        }
        if self.pieces.is_empty() {
            return Err(LevelError::NoPieces);
        }
        if self.win_peg >= self.pegs.len() {
            return Err(LevelError::WinPegOutOfRange {
                index: self.win_peg,
                pegs: self.pegs.len(),
            });
        }
        if self.start_peg >= self.pegs.len() {
            return Err(LevelError::StartPegOutOfRange {
                index: self.start_peg,
                pegs: self.pegs.len(),
            });
        }
        for (i, peg) in self.pegs.iter().enumerate() {
            Rectangle::new(peg.x, peg.y, peg.width, peg.height).map_err(|reason| {
                LevelError::InvalidDimensions {
                    shape: format!("peg {}", i + 1),
                    reason,
                }
            })?;
        }
        for (i, piece) in self.pieces.iter().enumerate() {
            Rectangle::new(0.0, 0.0, piece.width, piece.height).map_err(|reason| {
                LevelError::InvalidDimensions {
                    shape: format!("piece {}", i + 1),
                    reason,
                }
            })?;
        }
        for (i, pair) in self.pieces.windows(2).enumerate() {
            if pair[1].width > pair[0].width {
                return Err(LevelError::UnorderedStack {
                    index: i + 1,
                    width: pair[1].width,
                    below: pair[0].width,
                });
            }
        }
        Ok(())
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::classic()
    }
}

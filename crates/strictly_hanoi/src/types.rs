//! Identity and value types shared by pieces, pegs and the board.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Stable identity of a piece within a level (creation order, zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("Piece{}", _0 + 1)]
pub struct PieceId(pub usize);

/// Stable identity of a peg within a level (creation order, zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("Peg{}", _0 + 1)]
pub struct PegId(pub usize);

impl PieceId {
    /// Returns the zero-based index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl PegId {
    /// Returns the zero-based index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordering key for stacking, derived from a piece's width.
///
/// A piece may rest on another only if its rank is less than or equal to the
/// rank of the piece below it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Display)]
#[display("{}", _0)]
pub struct Rank(f64);

impl Rank {
    /// Derives the rank from a width.
    pub fn from_width(width: f64) -> Self {
        Self(width)
    }

    /// Returns the underlying key.
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Opaque visual tag, typically a CSS-style colour string.
///
/// The core never interprets it; renderers do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
pub struct Fill(String);

impl Fill {
    /// Default fill for pieces with no explicit colour.
    pub const DEFAULT_PIECE: &'static str = "#AAAAAA";
    /// Default fill for pegs.
    pub const DEFAULT_PEG: &'static str = "rgba(66, 70, 72, .8)";

    /// Wraps a colour string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw colour string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Fill {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Stroke style used to highlight the current selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionStyle {
    /// Stroke colour.
    #[serde(default = "default_selection_color")]
    pub color: Fill,
    /// Stroke width in surface units.
    #[serde(default = "default_selection_width")]
    pub width: f64,
}

fn default_selection_color() -> Fill {
    Fill::new("#CC0000")
}

fn default_selection_width() -> f64 {
    2.0
}

impl Default for SelectionStyle {
    fn default() -> Self {
        Self {
            color: default_selection_color(),
            width: default_selection_width(),
        }
    }
}

//! Setup-time error types.
//!
//! Gameplay itself never fails: rejected drops roll back and precondition
//! misses answer `false` or `None`. Everything here is raised while building
//! a level and is fatal to that level.

use super::geometry::GeometryError;
use derive_more::{Display, Error};
use tracing::instrument;

/// Failure to read or parse a level file, with caller location.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(format!("Failed to parse level: {}", err))
    }
}

impl From<std::io::Error> for ConfigError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("Failed to read level file: {}", err))
    }
}

/// A level description that cannot be played.
#[derive(Debug, Clone, Display, Error)]
pub enum LevelError {
    /// The level has no pegs.
    #[display("Level has no pegs")]
    NoPegs,

    /// The level has no pieces.
    #[display("Level has no pieces")]
    NoPieces,

    /// The win peg index does not name a peg.
    #[display("Win peg {} is out of range ({} pegs)", index, pegs)]
    WinPegOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of pegs.
        pegs: usize,
    },

    /// The start peg index does not name a peg.
    #[display("Start peg {} is out of range ({} pegs)", index, pegs)]
    StartPegOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of pegs.
        pegs: usize,
    },

    /// A peg or piece has an unusable size.
    #[display("Invalid dimensions for {}: {}", shape, reason)]
    InvalidDimensions {
        /// Which shape, e.g. `piece 2`.
        shape: String,
        /// Underlying geometry failure.
        reason: GeometryError,
    },

    /// The initial stack is not ordered widest-first.
    #[display("Piece {} (width {}) cannot rest on a piece of width {}", index, width, below)]
    UnorderedStack {
        /// Index of the offending piece.
        index: usize,
        /// Its width.
        width: f64,
        /// Width of the piece below it.
        below: f64,
    },

    /// The surface has no area.
    #[display("Surface must be positive, got {}x{}", width, height)]
    InvalidSurface {
        /// Surface width.
        width: f64,
        /// Surface height.
        height: f64,
    },

    /// The level file could not be loaded.
    #[display("{}", _0)]
    Config(ConfigError),
}

impl From<ConfigError> for LevelError {
    fn from(err: ConfigError) -> Self {
        LevelError::Config(err)
    }
}

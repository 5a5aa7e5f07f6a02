//! Strictly Hanoi - a drag-and-drop peg puzzle engine
//!
//! Pieces of different widths sit stacked on vertical pegs. The player drags
//! the top piece of a stack onto another peg; a piece may only rest on a wider
//! one. The level is won once every piece sits on the designated win peg.
//!
//! # Architecture
//!
//! - **Geometry**: rectangles, containment and edge-overlap hit tests
//! - **Level**: the rules engine; owns pegs and pieces and is the only writer
//!   of peg stacks
//! - **Board**: pointer interaction (pick, drag, release) and repaint
//!   bookkeeping over a frontend-supplied [`Surface`]
//! - **Rules** and **Invariants**: pure legality checks and postconditions
//!
//! # Example
//!
//! ```
//! use strictly_hanoi::{Board, Level, LevelConfig};
//!
//! # fn example() -> Result<(), strictly_hanoi::LevelError> {
//! let level = Level::new(&LevelConfig::classic())?;
//! let mut board = Board::new(level);
//!
//! // Grab the top piece of the first peg and carry it to the third.
//! board.pick(60.0, 220.0);
//! board.drag_to(220.0, 250.0);
//! let outcome = board.release().expect("a drag was in progress");
//! assert!(outcome.resolution().is_committed());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod config;
mod error;
mod geometry;
mod hooks;
mod level;
mod outcome;
mod peg;
mod piece;
mod shape;
mod types;

// Public module declarations
pub mod invariants;
pub mod rules;

// Crate-level exports - Geometry
pub use geometry::{GeometryError, Point, Rectangle};

// Crate-level exports - Shared value types
pub use types::{Fill, PegId, PieceId, Rank, SelectionStyle};

// Crate-level exports - Shapes
pub use peg::Peg;
pub use piece::{Piece, Snapshot};
pub use shape::{Annotation, Shape, ShapeId, Surface};

// Crate-level exports - Configuration and errors
pub use config::{LevelConfig, PegSpec, PieceSpec};
pub use error::{ConfigError, LevelError};

// Crate-level exports - Rules engine
pub use hooks::{LevelHooks, NoHooks, Statistics};
pub use level::{Level, Selection};
pub use outcome::{DropOutcome, RejectReason, Resolution};

// Crate-level exports - Interaction
pub use board::{Board, InteractionPhase};

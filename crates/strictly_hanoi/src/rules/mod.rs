//! Game rules for the peg puzzle.
//!
//! Pure functions over pegs and pieces. The level owns the state and calls
//! these to decide legality; nothing here mutates anything.

pub mod stacking;
pub mod target;
pub mod win;

pub use stacking::{check_drop, find_peg, fit_position};
pub use target::accepting_peg;
pub use win::is_won;

//! Terminal frontend for Strictly Hanoi
//!
//! Renders a [`strictly_hanoi::Board`] into a ratatui buffer and feeds it
//! mouse events from crossterm. Gameplay events reach the status line through
//! an unbounded channel installed as the level's hooks.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod app;
mod cli;
mod events;
mod input;
mod surface;
mod ui;

// Crate-level exports - Application
pub use app::App;
pub use cli::{Cli, Command};
pub use ui::draw;

// Crate-level exports - Events
pub use events::{ChannelHooks, GameEvent};

// Crate-level exports - Input and rendering
pub use input::{Action, CellMapper, map_event};
pub use surface::{Scale, TerminalSurface, outline_symbol, parse_color};

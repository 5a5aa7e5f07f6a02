//! Application state and logic.

use crate::events::{ChannelHooks, GameEvent};
use crate::input::{Action, CellMapper};
use crate::surface::{Scale, TerminalSurface};
use ratatui::{buffer::Buffer, layout::Rect};
use strictly_hanoi::{Annotation, Board, Fill, Level, LevelConfig, LevelError, Rectangle};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Main application state.
pub struct App {
    board: Board,
    events: mpsc::UnboundedReceiver<GameEvent>,
    message: String,
    scale: Scale,
    mapper: CellMapper,
    redraw: bool,
    quit: bool,
}

impl App {
    /// Builds the level and wires its hooks to the status line.
    #[instrument(skip(config), fields(level = %config.name()))]
    pub fn new(config: &LevelConfig, scale: Scale) -> Result<Self, LevelError> {
        let (tx, events) = mpsc::unbounded_channel();
        let level = Level::new(config)?.with_hooks(ChannelHooks::new(tx));
        let mut board = Board::new(level);
        if let Some(label) = goal_label(board.level()) {
            board.add_annotation(label);
        }
        info!("Application ready");

        Ok(Self {
            board,
            events,
            message: "Drag the top block onto another spike.".to_string(),
            scale,
            mapper: CellMapper::new(Rect::default(), scale),
            redraw: true,
            quit: false,
        })
    }

    /// Gets the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Gets the latest status message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the cell mapping from the last paint.
    pub fn mapper(&self) -> &CellMapper {
        &self.mapper
    }

    /// Returns true once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Returns true if the screen is out of date.
    pub fn needs_redraw(&self) -> bool {
        self.redraw || self.board.is_dirty()
    }

    /// Full status line: level, phase, counters and the latest message.
    pub fn status_line(&self) -> String {
        let level = self.board.level();
        format!(
            "{} | {} | moves: {} | {}",
            level.name(),
            self.board.phase(),
            level.stats().moves(),
            self.message
        )
    }

    /// Applies a user action to the board.
    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Pick(point) => {
                self.board.pick(point.x, point.y);
            }
            Action::Drag(point) => {
                self.board.drag_to(point.x, point.y);
            }
            Action::Release => {
                if let Some(outcome) = self.board.release() {
                    debug!(%outcome, "Drop resolved");
                }
            }
            Action::Restart => {
                self.board.reset();
                self.message = "Level restarted.".to_string();
                self.redraw = true;
            }
            Action::Quit => {
                info!("User quit");
                self.quit = true;
            }
            Action::Resize => {
                self.redraw = true;
            }
        }
        self.drain_events();
    }

    /// Pulls pending gameplay events into the status message.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(?event, "Handling game event");
            self.message = event.to_string();
            self.redraw = true;
        }
    }

    /// Paints the board into `area` and remembers the mapping for mouse input.
    pub fn paint(&mut self, buffer: &mut Buffer, area: Rect) {
        self.mapper = CellMapper::new(area, self.scale);
        let mut surface = TerminalSurface::new(buffer, area, self.scale);
        self.board.repaint(&mut surface);
        self.redraw = false;
    }
}

/// Label under the win peg.
fn goal_label(level: &Level) -> Option<Annotation> {
    let peg = level.peg(level.win_peg())?.rect();
    let rect = Rectangle::new(peg.center_x() - 20.0, peg.bottom() + 5.0, 40.0, 10.0).ok()?;
    Some(Annotation::new(rect, Fill::new("#303030"), "goal"))
}

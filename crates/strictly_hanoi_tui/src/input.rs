//! Translating terminal events into board actions.

use crate::surface::Scale;
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use strictly_hanoi::Point;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Left button pressed at a level point.
    Pick(Point),
    /// Mouse moved with the left button held.
    Drag(Point),
    /// Left button released.
    Release,
    /// Restart the level.
    Restart,
    /// Leave the game.
    Quit,
    /// The terminal changed size.
    Resize,
}

/// Maps terminal cells to level coordinates for the canvas region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMapper {
    area: Rect,
    scale: Scale,
}

impl CellMapper {
    /// Creates a mapper for a canvas drawn at `area`.
    pub fn new(area: Rect, scale: Scale) -> Self {
        Self { area, scale }
    }

    /// Level point at the centre of the given cell.
    ///
    /// Cells outside the canvas map to points outside the level surface.
    pub fn to_core(&self, column: u16, row: u16) -> Point {
        let x = (f64::from(column) - f64::from(self.area.x) + 0.5) * self.scale.x;
        let y = (f64::from(row) - f64::from(self.area.y) + 0.5) * self.scale.y;
        Point::new(x, y)
    }
}

/// Maps a crossterm event to an action, if it means anything to the game.
pub fn map_event(event: &Event, mapper: &CellMapper) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Restart),
            _ => None,
        },
        Event::Mouse(mouse) => {
            let point = || mapper.to_core(mouse.column, mouse.row);
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Action::Pick(point())),
                MouseEventKind::Drag(MouseButton::Left) => Some(Action::Drag(point())),
                MouseEventKind::Up(MouseButton::Left) => Some(Action::Release),
                _ => None,
            }
        }
        Event::Resize(..) => Some(Action::Resize),
        _ => None,
    }
}

//! Screen layout: title, canvas and status line.

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(5),    // Canvas
            Constraint::Length(3), // Status
        ])
        .split(area);

    // Title
    let title = Paragraph::new(format!("Strictly Hanoi - {}", app.board().level().name()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    // Canvas
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" r: restart  q: quit ")
        .border_style(Style::default().fg(Color::DarkGray));
    let canvas = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);
    app.paint(frame.buffer_mut(), canvas);

    // Status
    let won = app.board().level().has_won();
    let status = Paragraph::new(app.status_line())
        .style(Style::default().fg(if won { Color::Green } else { Color::Yellow }))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);
}

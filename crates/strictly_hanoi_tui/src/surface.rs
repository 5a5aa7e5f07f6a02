//! Rendering level shapes onto a ratatui buffer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
};
use strictly_hanoi::{Fill, Rectangle, Surface};
use tracing::warn;
use unicode_width::UnicodeWidthStr;

/// Level units covered by one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    /// Units per column.
    pub x: f64,
    /// Units per row.
    pub y: f64,
}

impl Scale {
    /// Creates a scale, falling back to the default for non-positive values.
    pub fn new(x: f64, y: f64) -> Self {
        let fallback = Self::default();
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(x) || !valid(y) {
            warn!(x, y, "Invalid cell scale, using default");
        }
        Self {
            x: if valid(x) { x } else { fallback.x },
            y: if valid(y) { y } else { fallback.y },
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self { x: 4.0, y: 10.0 }
    }
}

/// Parses `#RRGGBB`, `#RGB`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
///
/// Alpha is ignored; terminals have no blending.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = value.to_ascii_lowercase();
    let inner = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = parts.next()?.parse::<u8>().ok()?;
    let g = parts.next()?.parse::<u8>().ok()?;
    let b = parts.next()?.parse::<u8>().ok()?;
    Some(Color::Rgb(r, g, b))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => Some(Color::Rgb(
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        )),
        _ => None,
    }
}

/// Box-drawing character for a cell on the outline of a `width` x `height` box.
///
/// Returns `None` for interior cells.
pub fn outline_symbol(column: u16, row: u16, width: u16, height: u16) -> Option<char> {
    let last_col = width.saturating_sub(1);
    let last_row = height.saturating_sub(1);
    let left = column == 0;
    let right = column == last_col;
    let top = row == 0;
    let bottom = row == last_row;

    let symbol = match (width, height) {
        (1, 1) => '□',
        (1, _) => '│',
        (_, 1) if left => '[',
        (_, 1) if right => ']',
        (_, 1) => '─',
        _ => match (left, right, top, bottom) {
            (true, _, true, _) => '┌',
            (_, true, true, _) => '┐',
            (true, _, _, true) => '└',
            (_, true, _, true) => '┘',
            (true, _, _, _) | (_, true, _, _) => '│',
            (_, _, true, _) | (_, _, _, true) => '─',
            _ => return None,
        },
    };
    Some(symbol)
}

/// A [`Surface`] painting into a region of a ratatui buffer.
///
/// Level coordinates are divided by the [`Scale`] to find cells. Every shape
/// covers at least one cell; anything past the region is clipped.
pub struct TerminalSurface<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
    scale: Scale,
}

impl<'a> TerminalSurface<'a> {
    /// Paints into `area` of `buffer`.
    pub fn new(buffer: &'a mut Buffer, area: Rect, scale: Scale) -> Self {
        let area = area.intersection(buffer.area);
        Self {
            buffer,
            area,
            scale,
        }
    }

    /// Cells covered by `rect`, clipped to the region.
    pub fn cells(&self, rect: &Rectangle) -> Option<Rect> {
        let left = (rect.x() / self.scale.x).floor();
        let top = (rect.y() / self.scale.y).floor();
        let right = (rect.right() / self.scale.x).ceil().max(left + 1.0);
        let bottom = (rect.bottom() / self.scale.y).ceil().max(top + 1.0);

        let width = f64::from(self.area.width);
        let height = f64::from(self.area.height);
        let (left, right) = (left.clamp(0.0, width), right.clamp(0.0, width));
        let (top, bottom) = (top.clamp(0.0, height), bottom.clamp(0.0, height));
        if right <= left || bottom <= top {
            return None;
        }

        Some(Rect::new(
            self.area.x + left as u16,
            self.area.y + top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }
}

impl Surface for TerminalSurface<'_> {
    fn clear(&mut self, _width: f64, _height: f64) {
        for position in self.area.positions() {
            if let Some(cell) = self.buffer.cell_mut(position) {
                cell.reset();
            }
        }
    }

    fn fill_rect(&mut self, rect: &Rectangle, fill: &Fill) {
        let Some(cells) = self.cells(rect) else {
            return;
        };
        let color = parse_color(fill.as_str()).unwrap_or(Color::Gray);
        for position in cells.positions() {
            if let Some(cell) = self.buffer.cell_mut(position) {
                cell.set_char(' ').set_bg(color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: &Rectangle, stroke: &Fill, _width: f64) {
        let Some(cells) = self.cells(rect) else {
            return;
        };
        let color = parse_color(stroke.as_str()).unwrap_or(Color::Red);
        for position in cells.positions() {
            let column = position.x - cells.x;
            let row = position.y - cells.y;
            let Some(symbol) = outline_symbol(column, row, cells.width, cells.height) else {
                continue;
            };
            if let Some(cell) = self.buffer.cell_mut(position) {
                cell.set_char(symbol).set_fg(color);
            }
        }
    }

    fn fill_text(&mut self, rect: &Rectangle, text: &str, _fill: &Fill) {
        let Some(cells) = self.cells(rect) else {
            return;
        };
        let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
        let x = cells.x + cells.width.saturating_sub(width) / 2;
        let y = cells.y + cells.height.saturating_sub(1) / 2;
        let max_width = usize::from(cells.right() - x);
        // Keep the background painted by fill_rect.
        self.buffer
            .set_stringn(x, y, text, max_width, Style::default().fg(Color::White));
    }
}

//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to
//! the visible area and centralizes clipping logic.
//
//! Docks and embedded surfaces compute rectangles from observed content
//! sizes, which can drift partially outside the terminal buffer while a
//! resize is settling. Writing out-of-bounds into the underlying `Buffer`
//! can panic or corrupt rendering; routing every draw through this type
//! keeps the drawing code free of manual bounds checks.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer. This powers
    /// offscreen rendering in tests.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    /// Write `text` at (`x`, `y`), clipped to `bounds`.
    pub fn draw_text(&mut self, bounds: Rect, x: u16, y: u16, text: &str, style: Style) {
        let bounds = bounds.intersection(self.area).intersection(self.buffer.area);
        safe_set_string(self.buffer, bounds, x, y, text, style);
    }

    /// Fill every cell of `rect` with the given background color.
    pub fn fill_bg(&mut self, rect: Rect, bg: Color) {
        let bounds = rect.intersection(self.area).intersection(self.buffer.area);
        for y in bounds.y..bounds.y.saturating_add(bounds.height) {
            for x in bounds.x..bounds.x.saturating_add(bounds.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    let mut style = cell.style();
                    style.bg = Some(bg);
                    cell.set_style(style);
                }
            }
        }
    }

    /// Set the background of one row segment, clipped to `bounds`.
    pub fn tint_row(&mut self, bounds: Rect, row: u16, x: u16, width: u16, bg: Color) {
        let bounds = bounds.intersection(self.area).intersection(self.buffer.area);
        if row < bounds.y || row >= bounds.y.saturating_add(bounds.height) {
            return;
        }
        let max_x = bounds.x.saturating_add(bounds.width);
        let end = x.saturating_add(width).min(max_x);
        for col in x.max(bounds.x)..end {
            if let Some(cell) = self.buffer.cell_mut((col, row)) {
                let mut style = cell.style();
                style.bg = Some(bg);
                cell.set_style(style);
            }
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

// SPDX-License-Identifier: MIT
//
// Block: a bordered frame with an optional centered title.
//
// Borders are drawn with single-line box glyphs. Corners appear only where
// two present edges meet; an edge without its neighbours runs to the end of
// the area. Side borders fill the rows between the top and bottom edges.
//
// The title sits in the top edge as " <title> ", centered in the space
// between the corners. It is only drawn when that space is wider than four
// columns, and is cut to fit when it is wider than the space.

use bitflags::bitflags;

use super::Widget;
use crate::buffer::ScreenBuffer;
use crate::geometry::Rect;
use crate::style::Style;

const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

/// Minimum interior width (exclusive) for a title to be drawn.
const MIN_TITLE_SPACE: u16 = 4;

bitflags! {
    /// Which edges of a [`Block`] are drawn.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Borders: u8 {
        const TOP    = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT   = 1 << 2;
        const RIGHT  = 1 << 3;
        const ALL    = Self::TOP.bits() | Self::BOTTOM.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

impl Borders {
    fn count(self, flag: Self) -> u16 {
        u16::from(self.contains(flag))
    }
}

/// A bordered, optionally titled frame.
///
/// ```
/// use minitui::buffer::ScreenBuffer;
/// use minitui::geometry::Rect;
/// use minitui::widgets::{Block, Borders, Widget};
///
/// let block = Block::new().title("Apps").borders(Borders::ALL);
/// let mut buf = ScreenBuffer::new(12, 3);
/// let area = buf.area();
/// block.render_to_buffer(&mut buf, area);
/// assert_eq!(buf.row_text(0), "┌── Apps ──┐");
/// assert_eq!(buf.row_text(1), "│          │");
/// assert_eq!(buf.row_text(2), "└──────────┘");
/// assert_eq!(block.inner_area(buf.area()), Rect::new(1, 1, 10, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    title: Option<String>,
    borders: Borders,
    border_style: Option<Style>,
}

impl Block {
    /// A block with no borders and no title.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            borders: Borders::empty(),
            border_style: None,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub const fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    /// Style for every border and title cell.
    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = Some(style);
        self
    }

    /// The area left inside the borders: each present edge takes one cell.
    #[must_use]
    pub fn inner_area(&self, area: Rect) -> Rect {
        area.inset(
            self.borders.count(Borders::LEFT),
            self.borders.count(Borders::TOP),
            self.borders.count(Borders::RIGHT),
            self.borders.count(Borders::BOTTOM),
        )
    }

    /// Paint one horizontal edge: optional corners around a run of `─`.
    /// Returns the x just past the left corner and the run's width.
    fn edge(
        &self,
        buffer: &mut ScreenBuffer,
        area: Rect,
        y: u16,
        corners: (char, char),
    ) -> (u16, u16) {
        let style = self.border_style.as_ref();
        let has_left = self.borders.contains(Borders::LEFT);
        let has_right = self.borders.contains(Borders::RIGHT);

        let start = area.x.saturating_add(self.borders.count(Borders::LEFT));
        let end = area.right().saturating_sub(self.borders.count(Borders::RIGHT));
        let width = end.saturating_sub(start);

        if has_left {
            buffer.set(area.x, y, corners.0, style);
        }
        for x in start..start + width {
            buffer.set(x, y, HORIZONTAL, style);
        }
        if has_right {
            buffer.set(area.right() - 1, y, corners.1, style);
        }
        (start, width)
    }

    fn render_title(&self, buffer: &mut ScreenBuffer, x: u16, y: u16, width: u16) {
        let Some(title) = &self.title else { return };
        if width <= MIN_TITLE_SPACE {
            return;
        }

        let label: Vec<char> = format!(" {title} ").chars().take(usize::from(width)).collect();
        let len = u16::try_from(label.len()).unwrap_or(width);
        let left_pad = (width - len) / 2;

        for (i, ch) in (0..).zip(label) {
            buffer.set(x + left_pad + i, y, ch, self.border_style.as_ref());
        }
    }
}

impl Widget for Block {
    fn render_to_buffer(&self, buffer: &mut ScreenBuffer, area: Rect) {
        if area.is_empty() {
            return;
        }
        let style = self.border_style.as_ref();
        let last_row = area.bottom() - 1;

        if self.borders.contains(Borders::TOP) {
            let (x, width) = self.edge(buffer, area, area.y, (TOP_LEFT, TOP_RIGHT));
            self.render_title(buffer, x, area.y, width);
        }
        if self.borders.contains(Borders::BOTTOM) {
            self.edge(buffer, area, last_row, (BOTTOM_LEFT, BOTTOM_RIGHT));
        }

        let first_side = area.y.saturating_add(self.borders.count(Borders::TOP));
        let end_side = area.bottom().saturating_sub(self.borders.count(Borders::BOTTOM));
        for y in first_side..end_side {
            if self.borders.contains(Borders::LEFT) {
                buffer.set(area.x, y, VERTICAL, style);
            }
            if self.borders.contains(Borders::RIGHT) {
                buffer.set(area.right() - 1, y, VERTICAL, style);
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use pretty_assertions::assert_eq;

    fn draw(block: &Block, width: u16, height: u16) -> Vec<String> {
        let mut buf = ScreenBuffer::new(width, height);
        let area = buf.area();
        block.render_to_buffer(&mut buf, area);
        (0..height).map(|y| buf.row_text(y)).collect()
    }

    // ── Borders ─────────────────────────────────────────────────────────

    #[test]
    fn all_borders_box() {
        let rows = draw(&Block::new().borders(Borders::ALL), 5, 4);
        assert_eq!(rows, vec!["┌───┐", "│   │", "│   │", "└───┘"]);
    }

    #[test]
    fn top_only_runs_full_width() {
        let rows = draw(&Block::new().borders(Borders::TOP), 4, 2);
        assert_eq!(rows, vec!["────", "    "]);
    }

    #[test]
    fn left_and_bottom() {
        let rows = draw(&Block::new().borders(Borders::LEFT | Borders::BOTTOM), 4, 3);
        assert_eq!(rows, vec!["│   ", "│   ", "└───"]);
    }

    #[test]
    fn sides_only_cover_every_row() {
        let rows = draw(&Block::new().borders(Borders::LEFT | Borders::RIGHT), 3, 2);
        assert_eq!(rows, vec!["│ │", "│ │"]);
    }

    #[test]
    fn no_borders_draws_nothing() {
        let rows = draw(&Block::new().title("ignored"), 10, 2);
        assert_eq!(rows, vec!["          ", "          "]);
    }

    #[test]
    fn border_style_applies_to_every_border_cell() {
        let style = Style::new().fg(Color::Blue);
        let block = Block::new().borders(Borders::ALL).border_style(style.clone());
        let mut buf = ScreenBuffer::new(3, 3);
        let area = buf.area();
        block.render_to_buffer(&mut buf, area);
        assert_eq!(buf.get(0, 0).unwrap().style, Some(style.clone()));
        assert_eq!(buf.get(2, 1).unwrap().style, Some(style));
        assert_eq!(buf.get(1, 1).unwrap().style, None);
    }

    #[test]
    fn offset_area() {
        let mut buf = ScreenBuffer::new(6, 4);
        Block::new()
            .borders(Borders::ALL)
            .render_to_buffer(&mut buf, Rect::new(2, 1, 3, 3));
        assert_eq!(buf.row_text(0), "      ");
        assert_eq!(buf.row_text(1), "  ┌─┐ ");
        assert_eq!(buf.row_text(2), "  │ │ ");
        assert_eq!(buf.row_text(3), "  └─┘ ");
    }

    #[test]
    fn empty_area_is_noop() {
        let mut buf = ScreenBuffer::new(3, 3);
        let before = buf.clone();
        Block::new()
            .borders(Borders::ALL)
            .render_to_buffer(&mut buf, Rect::new(1, 1, 0, 2));
        assert_eq!(buf, before);
    }

    // ── Title ───────────────────────────────────────────────────────────

    #[test]
    fn title_is_centered() {
        let rows = draw(&Block::new().title("Hi").borders(Borders::ALL), 10, 2);
        assert_eq!(rows[0], "┌── Hi ──┐");
    }

    #[test]
    fn odd_padding_goes_right() {
        let rows = draw(&Block::new().title("Hi").borders(Borders::ALL), 11, 2);
        assert_eq!(rows[0], "┌── Hi ───┐");
    }

    #[test]
    fn title_needs_more_than_four_columns() {
        let rows = draw(&Block::new().title("X").borders(Borders::ALL), 6, 2);
        assert_eq!(rows[0], "┌────┐");
        let rows = draw(&Block::new().title("X").borders(Borders::ALL), 7, 2);
        assert_eq!(rows[0], "┌─ X ─┐");
    }

    #[test]
    fn long_title_is_cut_to_fit() {
        let rows = draw(&Block::new().title("Applications").borders(Borders::ALL), 8, 2);
        assert_eq!(rows[0], "┌ Appli┐");
    }

    // ── inner_area ──────────────────────────────────────────────────────

    #[test]
    fn inner_area_all_borders() {
        let block = Block::new().borders(Borders::ALL);
        assert_eq!(block.inner_area(Rect::new(3, 4, 10, 6)), Rect::new(4, 5, 8, 4));
    }

    #[test]
    fn inner_area_no_borders_is_identity() {
        let area = Rect::new(3, 4, 10, 6);
        assert_eq!(Block::new().inner_area(area), area);
    }

    #[test]
    fn inner_area_partial_and_clamped() {
        let block = Block::new().borders(Borders::TOP | Borders::LEFT);
        assert_eq!(block.inner_area(Rect::new(0, 0, 5, 5)), Rect::new(1, 1, 4, 4));
        let all = Block::new().borders(Borders::ALL);
        assert_eq!(all.inner_area(Rect::new(0, 0, 1, 1)).width, 0);
        assert_eq!(all.inner_area(Rect::new(0, 0, 1, 1)).height, 0);
    }
}

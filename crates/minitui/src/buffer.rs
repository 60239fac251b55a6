// SPDX-License-Identifier: MIT
//
// ScreenBuffer: the 2D cell grid every widget paints to.
//
// One buffer is one frame. The host allocates a fresh buffer per frame,
// widgets paint into it, and the diff renderer (diff.rs) compares it row by
// row against the previous frame's buffer before the runtime keeps it as the
// new "previous". The two buffers are independent values; nothing ever
// mutates both.
//
// Design:
//
//   - Flat `Vec<Cell>` with row-major indexing. A row is a contiguous slice,
//     so the per-row diff is a single slice comparison.
//
//   - Every write is bounds-checked and silently dropped when out of range.
//     Widgets routinely compute geometry that reaches one cell past an edge;
//     that must never abort a frame.
//
//   - Zero-width characters (controls, combining marks) are never stored.
//
//   - A double-width character occupies its cell plus a continuation cell
//     to the right, so a row never covers more terminal columns than the
//     buffer is wide. Overwriting either half of a wide character blanks
//     the other half. A wide character that would straddle the right edge
//     is not drawn.

use unicode_width::UnicodeWidthChar;

use crate::ansi::{self, Token};
use crate::cell::Cell;
use crate::geometry::Rect;
use crate::style::Style;
use crate::text::TextLine;

// ─── ScreenBuffer ────────────────────────────────────────────────────────────

/// A `width × height` grid of cells.
///
/// # Examples
///
/// ```
/// use minitui::buffer::ScreenBuffer;
///
/// let mut buf = ScreenBuffer::new(10, 3);
/// buf.set(1, 0, 'H', None);
/// buf.set(99, 0, 'X', None); // out of bounds: ignored
/// assert_eq!(buf.get(1, 0).unwrap().ch, 'H');
/// assert_eq!(buf.row_text(0), " H        ");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ScreenBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl ScreenBuffer {
    // ─── Construction ────────────────────────────────────────────────────

    /// Create a buffer filled with blank cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; size],
        }
    }

    /// Create a buffer covering `area`'s size. The origin is not kept.
    #[must_use]
    pub fn for_area(area: Rect) -> Self {
        Self::new(area.width, area.height)
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The whole buffer as a rectangle at the origin.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Whether `(x, y)` is within the buffer.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a cell, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// A single row as a slice. Returns `None` if `y` is out of bounds.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            Some(&self.cells[start..start + usize::from(self.width)])
        } else {
            None
        }
    }

    /// The characters of row `y`, styles dropped. Empty if out of bounds.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .map(|cells| {
                cells
                    .iter()
                    .filter(|c| !c.is_continuation())
                    .map(|c| c.ch)
                    .collect()
            })
            .unwrap_or_default()
    }

    // ─── Cell Writes ─────────────────────────────────────────────────────

    /// Write one character. Out-of-bounds positions are silently ignored.
    ///
    /// Zero-width characters are replaced by a space so the cell still
    /// occupies exactly one column. A double-width character also takes the
    /// cell to its right; in the last column it becomes a space instead.
    pub fn set(&mut self, x: u16, y: u16, ch: char, style: Option<&Style>) {
        if !self.in_bounds(x, y) {
            return;
        }
        match char_width(ch) {
            0 => self.put(x, y, Cell::new(' ', style)),
            1 => self.put(x, y, Cell::new(ch, style)),
            _ if x + 1 >= self.width => self.put(x, y, Cell::new(' ', style)),
            _ => {
                self.put(x, y, Cell::new(ch, style));
                self.put(x + 1, y, Cell::continuation(style));
            }
        }
    }

    /// Store `cell` at an in-bounds position, blanking the other half of
    /// any wide character it lands on.
    fn put(&mut self, x: u16, y: u16, cell: Cell) {
        let idx = self.index(x, y);
        if self.cells[idx].is_continuation() && x > 0 {
            let owner = &mut self.cells[idx - 1];
            *owner = Cell::new(' ', owner.style.as_ref());
        } else if x + 1 < self.width && self.cells[idx + 1].is_continuation() {
            let next = &mut self.cells[idx + 1];
            *next = Cell::new(' ', next.style.as_ref());
        }
        self.cells[idx] = cell;
    }

    /// Fill `area` (clipped to the buffer) with `ch` in `style`.
    ///
    /// A double-width `ch` is placed every other column.
    pub fn fill(&mut self, area: Rect, ch: char, style: Option<&Style>) {
        let x_end = area.right().min(self.width);
        let y_end = area.bottom().min(self.height);
        let step = if char_width(ch) > 1 { 2 } else { 1 };
        for y in area.y..y_end {
            for x in (area.x..x_end).step_by(step) {
                self.set(x, y, ch, style);
            }
        }
    }

    /// Reset `area` to blank, unstyled cells.
    pub fn clear_area(&mut self, area: Rect) {
        self.fill(area, ' ', None);
    }

    // ─── String Writes ───────────────────────────────────────────────────

    /// Write a string that may carry embedded SGR / OSC 8 escape codes.
    ///
    /// Escape sequences are consumed as style changes, never drawn: an SGR
    /// sequence replaces the current style with [`Style::parse`] applied to
    /// `style` (the base passed in here), and an OSC 8 sequence sets or
    /// clears the hyperlink carried by the following cells.
    ///
    /// Characters stop at the right edge of the buffer, or at the first
    /// character that does not fit there whole. When the write starts at
    /// column 0, the rest of the row after the text is blanked so a shorter
    /// line fully replaces a longer one.
    ///
    /// Returns the number of columns written.
    pub fn write_string(&mut self, x: u16, y: u16, text: &str, style: Option<&Style>) -> u16 {
        self.write_string_clipped(x, y, text, style, u16::MAX)
    }

    /// [`write_string`](Self::write_string), additionally stopping after
    /// `max_width` columns. Blanking at column 0 still runs to the row end.
    pub fn write_string_clipped(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        style: Option<&Style>,
        max_width: u16,
    ) -> u16 {
        if y >= self.height {
            return 0;
        }
        let limit = x.saturating_add(max_width).min(self.width);

        let mut visible_x = x;
        let mut current = style.cloned();
        let mut link: Option<String> = None;

        for token in ansi::tokenize(text) {
            match token {
                Token::Control(seq) => current = Style::parse(&seq, style),
                Token::Link(url) => link = url,
                Token::Char(ch) => {
                    let Some(w) = columns(ch) else { continue };
                    if u32::from(visible_x) + u32::from(w) > u32::from(limit) {
                        break;
                    }
                    let cell_style = with_link(current.as_ref(), link.as_deref());
                    self.set(visible_x, y, ch, cell_style.as_ref());
                    visible_x += w;
                }
            }
        }

        if x == 0 {
            for fill_x in visible_x..self.width {
                self.set(fill_x, y, ' ', None);
            }
        }

        visible_x.saturating_sub(x)
    }

    /// Paint a [`TextLine`] span by span, each character keeping its span's
    /// style, truncated at `max_width` columns (and at the buffer's right
    /// edge). The rest of the `max_width` columns are blanked.
    pub fn write_line(&mut self, x: u16, y: u16, line: &TextLine, max_width: u16) {
        let end = x.saturating_add(max_width);
        let limit = end.min(self.width);
        let mut col = x;

        'spans: for span in line.spans() {
            for ch in span.content().chars() {
                let Some(w) = columns(ch) else { continue };
                if u32::from(col) + u32::from(w) > u32::from(limit) {
                    break 'spans;
                }
                self.set(col, y, ch, span.style());
                col += w;
            }
        }

        while col < end {
            self.set(col, y, ' ', None);
            col += 1;
        }
    }
}

/// Columns `ch` takes in a cell write, or `None` when it takes none.
const fn columns_of(width: usize) -> Option<u16> {
    match width {
        0 => None,
        1 => Some(1),
        _ => Some(2),
    }
}

#[inline]
fn columns(ch: char) -> Option<u16> {
    columns_of(char_width(ch))
}

/// `style` with its link replaced by an OSC 8 link, when one is open.
fn with_link(style: Option<&Style>, link: Option<&str>) -> Option<Style> {
    match link {
        None => style.cloned(),
        Some(url) => Some(style.cloned().unwrap_or_default().link(url)),
    }
}

impl std::fmt::Debug for ScreenBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ScreenBuffer({}x{})", self.width, self.height)
    }
}

// ─── Text Width Utilities ────────────────────────────────────────────────────

/// Display width of a character in terminal columns.
///
/// Returns 0 for control characters and combining marks. Those never get a
/// cell of their own.
///
/// ```
/// use minitui::buffer::char_width;
///
/// assert_eq!(char_width('a'), 1);
/// assert_eq!(char_width('\n'), 0);
/// ```
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

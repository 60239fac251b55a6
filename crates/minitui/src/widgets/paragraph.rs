// SPDX-License-Identifier: MIT
//
// Paragraph: lines of text, one per row, top to bottom.

use super::{Line, Widget};
use crate::buffer::ScreenBuffer;
use crate::geometry::Rect;
use crate::style::Style;

/// Static text. Lines past the area's height are dropped, and each line is
/// cut at the area's width.
///
/// ```
/// use minitui::buffer::ScreenBuffer;
/// use minitui::widgets::{Paragraph, Widget};
///
/// let mut buf = ScreenBuffer::new(8, 2);
/// let area = buf.area();
/// Paragraph::from_lines(["one", "two", "three"]).render_to_buffer(&mut buf, area);
/// assert_eq!(buf.row_text(0), "one     ");
/// assert_eq!(buf.row_text(1), "two     ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    lines: Vec<Line>,
    style: Option<Style>,
}

impl Paragraph {
    /// A single-line paragraph.
    #[must_use]
    pub fn new(line: impl Into<Line>) -> Self {
        Self {
            lines: vec![line.into()],
            style: None,
        }
    }

    #[must_use]
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Line>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            style: None,
        }
    }

    /// Style applied to plain-string lines. Styled lines keep their own.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

impl Widget for Paragraph {
    fn render_to_buffer(&self, buffer: &mut ScreenBuffer, area: Rect) {
        for (y, line) in (area.y..area.bottom()).zip(&self.lines) {
            line.paint(buffer, area.x, y, area.width, self.style.as_ref());
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

// SPDX-License-Identifier: MIT
//
// Widgets: stateless renderers that paint into a region of a ScreenBuffer.
//
// A widget holds only what it draws. It borrows the buffer for the duration
// of one `render_to_buffer` call and keeps nothing afterwards. Every write
// goes through the buffer's bounds-checked API, so a widget handed an area
// that hangs off the screen simply loses the part that does not fit.

mod block;
mod clear;
mod list;
mod paragraph;

pub use block::{Block, Borders};
pub use clear::Clear;
pub use list::List;
pub use paragraph::Paragraph;

use crate::buffer::ScreenBuffer;
use crate::geometry::Rect;
use crate::style::Style;
use crate::text::{TextLine, TextSpan};

/// Something that can paint itself into a rectangle of a buffer.
pub trait Widget {
    fn render_to_buffer(&self, buffer: &mut ScreenBuffer, area: Rect);
}

impl<W: Widget + ?Sized> Widget for &W {
    fn render_to_buffer(&self, buffer: &mut ScreenBuffer, area: Rect) {
        (**self).render_to_buffer(buffer, area);
    }
}

// ─── Line ────────────────────────────────────────────────────────────────────

/// One row of Paragraph or List content.
///
/// A `Plain` string may carry embedded escape codes and is written through
/// [`ScreenBuffer::write_string`]. A `Styled` line is painted span by span,
/// each cell keeping its span's style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Plain(String),
    Styled(TextLine),
}

impl Line {
    /// Paint this line at `(x, y)`, at most `width` columns wide.
    ///
    /// A `Plain` line is wrapped in `style` and written with `style` as the
    /// base for its escape codes. A `Styled` line ignores `style`, always
    /// covers exactly `width` columns, and blanks what its spans leave over.
    pub(crate) fn paint(
        &self,
        buffer: &mut ScreenBuffer,
        x: u16,
        y: u16,
        width: u16,
        style: Option<&Style>,
    ) {
        match self {
            Self::Plain(text) => {
                let text = style.map_or_else(|| text.clone(), |s| s.apply(text));
                buffer.write_string_clipped(x, y, &text, style, width);
            }
            Self::Styled(line) => buffer.write_line(x, y, line, width),
        }
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::Plain(s.to_owned())
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self::Plain(s)
    }
}

impl From<TextLine> for Line {
    fn from(line: TextLine) -> Self {
        Self::Styled(line)
    }
}

impl From<TextSpan> for Line {
    fn from(span: TextSpan) -> Self {
        Self::Styled(TextLine::from(span))
    }
}

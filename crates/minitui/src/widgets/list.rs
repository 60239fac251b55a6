// SPDX-License-Identifier: MIT
//
// List: rows of items inside an optional Block.
//
// The block (if any) is drawn first and the items go into its inner area.
// Rows below the last item are blanked down to the bottom of that area, so
// a list that shrinks between frames leaves no stale rows behind.

use super::{Block, Line, Widget};
use crate::buffer::ScreenBuffer;
use crate::geometry::Rect;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct List {
    items: Vec<Line>,
    block: Option<Block>,
}

impl List {
    #[must_use]
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Line>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            block: None,
        }
    }

    /// Wrap the list in `block`.
    #[must_use]
    pub fn block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for List {
    fn render_to_buffer(&self, buffer: &mut ScreenBuffer, area: Rect) {
        let inner = match &self.block {
            Some(block) => {
                block.render_to_buffer(buffer, area);
                block.inner_area(area)
            }
            None => area,
        };

        let mut rows = inner.y..inner.bottom();
        // Items drive the zip so the first unused row stays in `rows`.
        for (item, y) in self.items.iter().zip(rows.by_ref()) {
            item.paint(buffer, inner.x, y, inner.width, None);
        }
        for y in rows {
            buffer.clear_area(Rect::new(inner.x, y, inner.width, 1));
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, Style};
    use crate::text::{TextLine, TextSpan};
    use crate::widgets::Borders;
    use pretty_assertions::assert_eq;

    fn draw(list: &List, width: u16, height: u16) -> Vec<String> {
        let mut buf = ScreenBuffer::new(width, height);
        buf.fill(buf.area(), '.', None);
        let area = buf.area();
        list.render_to_buffer(&mut buf, area);
        (0..height).map(|y| buf.row_text(y)).collect()
    }

    #[test]
    fn items_then_blank_rows() {
        let rows = draw(&List::new(["app-1", "app-2"]), 6, 4);
        assert_eq!(rows, vec!["app-1 ", "app-2 ", "      ", "      "]);
    }

    #[test]
    fn items_inside_block() {
        let list = List::new(["web", "db"]).block(Block::new().title("Apps").borders(Borders::ALL));
        let rows = draw(&list, 10, 5);
        assert_eq!(
            rows,
            vec!["┌─ Apps ─┐", "│web.....│", "│db......│", "│        │", "└────────┘"]
        );
    }

    #[test]
    fn overflowing_items_dropped() {
        let rows = draw(&List::new(["a", "b", "c"]), 3, 2);
        assert_eq!(rows, vec!["a  ", "b  "]);
    }

    #[test]
    fn text_line_items_fill_inner_width() {
        let ok = Style::new().fg(Color::Green);
        let item = TextLine::new(vec![TextSpan::styled("●", ok.clone()), TextSpan::raw(" api")]);
        let list = List::new([item]).block(Block::new().borders(Borders::LEFT));
        let mut buf = ScreenBuffer::new(8, 1);
        buf.fill(buf.area(), '.', None);
        let area = buf.area();
        list.render_to_buffer(&mut buf, area);
        assert_eq!(buf.row_text(0), "│● api  ");
        assert_eq!(buf.get(1, 0).unwrap().style, Some(ok));
    }

    #[test]
    fn empty_list_blanks_inner_area() {
        let list = List::default().block(Block::new().borders(Borders::ALL));
        let rows = draw(&list, 4, 3);
        assert_eq!(rows, vec!["┌──┐", "│  │", "└──┘"]);
    }
}

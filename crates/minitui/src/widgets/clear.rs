// SPDX-License-Identifier: MIT
//
// Clear: resets an area to blank, unstyled cells.

use super::Widget;
use crate::buffer::ScreenBuffer;
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Clear;

impl Widget for Clear {
    fn render_to_buffer(&self, buffer: &mut ScreenBuffer, area: Rect) {
        buffer.clear_area(area);
    }
}

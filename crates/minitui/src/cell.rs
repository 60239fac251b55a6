// SPDX-License-Identifier: MIT
//
// Cell: the atomic unit of a ScreenBuffer.
//
// Every character position on screen is one Cell: a character and an
// optional style. The character is never empty; a blank cell holds a space.
// Cells are only mutated through ScreenBuffer writes, and two buffers are
// compared row by row through Cell's derived equality.
//
// Only what reaches the terminal is stored: italic is dropped (it is never
// emitted) and an empty style becomes `None`. A cell written with
// `Style::new().italic()` therefore compares equal to a plain cell, and the
// diff never reports a row as changed when nothing visible differs.
//
// A double-width character (CJK, most emoji) takes two cells. The first
// holds the character; the second is a continuation cell that produces no
// output of its own.

use crate::style::{Modifier, Style};

/// Marker character of a continuation cell.
const CONTINUATION: char = '\0';

/// A single terminal cell.
///
/// ```
/// use minitui::cell::Cell;
/// use minitui::style::Style;
///
/// assert_eq!(Cell::EMPTY.ch, ' ');
/// assert_eq!(Cell::new('x', Some(&Style::new())), Cell::new('x', None));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Character to display.
    pub ch: char,
    /// Style, or `None` for the terminal default.
    pub style: Option<Style>,
}

impl Cell {
    /// A blank cell: space, no style.
    pub const EMPTY: Self = Self {
        ch: ' ',
        style: None,
    };

    /// Create a cell, keeping only the visible part of `style`.
    #[must_use]
    pub fn new(ch: char, style: Option<&Style>) -> Self {
        Self {
            ch,
            style: visible(style),
        }
    }

    /// The second column of a double-width character.
    ///
    /// Carries the owner's style so both columns share a background.
    #[must_use]
    pub fn continuation(style: Option<&Style>) -> Self {
        Self {
            ch: CONTINUATION,
            style: visible(style),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        self.ch == CONTINUATION
    }

    /// Whether this cell is a space with no style.
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.ch == ' ' && self.style.is_none()
    }

    /// The hyperlink target, if any.
    #[inline]
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.style.as_ref().and_then(|s| s.link.as_deref())
    }
}

fn visible(style: Option<&Style>) -> Option<Style> {
    let mut style = style?.clone();
    style.modifiers.remove(Modifier::ITALIC);
    (!style.is_empty()).then_some(style)
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn empty_is_space_without_style() {
        assert_eq!(Cell::EMPTY.ch, ' ');
        assert!(Cell::EMPTY.style.is_none());
        assert!(Cell::EMPTY.is_blank());
        assert_eq!(Cell::default(), Cell::EMPTY);
    }

    #[test]
    fn new_keeps_real_style() {
        let style = Style::new().fg(Color::Red);
        let cell = Cell::new('a', Some(&style));
        assert_eq!(cell.style, Some(style));
        assert!(!cell.is_blank());
    }

    #[test]
    fn new_collapses_empty_style() {
        assert_eq!(Cell::new(' ', Some(&Style::new())), Cell::EMPTY);
    }

    #[test]
    fn styled_space_is_not_blank() {
        let cell = Cell::new(' ', Some(&Style::new().bg(Color::Blue)));
        assert!(!cell.is_blank());
    }

    #[test]
    fn italic_is_not_stored() {
        assert_eq!(Cell::new('x', Some(&Style::new().italic())), Cell::new('x', None));
        let bold = Style::new().bold();
        assert_eq!(
            Cell::new('x', Some(&bold.clone().italic())),
            Cell::new('x', Some(&bold))
        );
    }

    #[test]
    fn continuation_cell() {
        let style = Style::new().bg(Color::Blue);
        let cell = Cell::continuation(Some(&style));
        assert!(cell.is_continuation());
        assert!(!cell.is_blank());
        assert_eq!(cell.style, Some(style));
        assert!(!Cell::EMPTY.is_continuation());
    }

    #[test]
    fn link_accessor() {
        let cell = Cell::new('x', Some(&Style::new().link("https://a")));
        assert_eq!(cell.link(), Some("https://a"));
        assert_eq!(Cell::EMPTY.link(), None);
    }

    #[test]
    fn equality_considers_style() {
        let a = Cell::new('x', Some(&Style::new().bold()));
        let b = Cell::new('x', Some(&Style::new().dim()));
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }
}

// SPDX-License-Identifier: MIT
//
// Styled text: spans and lines.
//
// A TextSpan is a run of characters sharing one style. A TextLine is an
// ordered list of spans drawn left to right with nothing in between. Both
// are immutable once built; widgets read them, never modify them.

use crate::style::Style;

// ─── TextSpan ────────────────────────────────────────────────────────────────

/// An atomic styled run of text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextSpan {
    content: String,
    style: Option<Style>,
}

impl TextSpan {
    /// An unstyled span.
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: None,
        }
    }

    /// A span drawn with `style`.
    #[must_use]
    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            content: content.into(),
            style: Some(style),
        }
    }

    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    #[must_use]
    pub const fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    /// Number of characters in the content.
    #[must_use]
    pub fn visible_length(&self) -> usize {
        self.content.chars().count()
    }

    /// The content wrapped in this span's escape sequences.
    #[must_use]
    pub fn render(&self) -> String {
        self.style
            .as_ref()
            .map_or_else(|| self.content.clone(), |s| s.apply(&self.content))
    }
}

impl From<&str> for TextSpan {
    fn from(s: &str) -> Self {
        Self::raw(s)
    }
}

impl From<String> for TextSpan {
    fn from(s: String) -> Self {
        Self::raw(s)
    }
}

// ─── TextLine ────────────────────────────────────────────────────────────────

/// An ordered sequence of spans forming one line.
///
/// ```
/// use minitui::style::{Color, Style};
/// use minitui::text::{TextLine, TextSpan};
///
/// let line = TextLine::new(vec![
///     TextSpan::raw("hello "),
///     TextSpan::styled("world", Style::new().fg(Color::Cyan)),
/// ]);
/// assert_eq!(line.visible_length(), 11);
/// assert_eq!(line.render(), "hello \x1b[36mworld\x1b[0m");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextLine {
    spans: Vec<TextSpan>,
}

impl TextLine {
    #[must_use]
    pub const fn new(spans: Vec<TextSpan>) -> Self {
        Self { spans }
    }

    #[inline]
    #[must_use]
    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    /// Sum of span lengths. Escape sequences never count.
    #[must_use]
    pub fn visible_length(&self) -> usize {
        self.spans.iter().map(TextSpan::visible_length).sum()
    }

    /// Every span rendered and concatenated.
    #[must_use]
    pub fn render(&self) -> String {
        self.spans.iter().map(TextSpan::render).collect()
    }
}

impl From<TextSpan> for TextLine {
    fn from(span: TextSpan) -> Self {
        Self::new(vec![span])
    }
}

impl From<Vec<TextSpan>> for TextLine {
    fn from(spans: Vec<TextSpan>) -> Self {
        Self::new(spans)
    }
}

impl From<&str> for TextLine {
    fn from(s: &str) -> Self {
        Self::from(TextSpan::raw(s))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn raw_span_renders_content() {
        let span = TextSpan::raw("hello");
        assert_eq!(span.render(), "hello");
        assert_eq!(span.visible_length(), 5);
        assert!(span.style().is_none());
    }

    #[test]
    fn styled_span_renders_escapes() {
        let span = TextSpan::styled("hello", Style::new().fg(Color::Red));
        assert_eq!(span.render(), "\x1b[31mhello\x1b[0m");
        assert_eq!(span.visible_length(), 5);
    }

    #[test]
    fn visible_length_counts_chars_not_bytes() {
        assert_eq!(TextSpan::raw("─────").visible_length(), 5);
    }

    #[test]
    fn line_concatenates_without_separators() {
        let line = TextLine::new(vec![
            TextSpan::raw("a"),
            TextSpan::styled("b", Style::new().bold()),
            TextSpan::raw("c"),
        ]);
        assert_eq!(line.render(), "a\x1b[1mb\x1b[0mc");
        assert_eq!(line.visible_length(), 3);
        assert_eq!(line.spans().len(), 3);
    }

    #[test]
    fn empty_line() {
        let line = TextLine::default();
        assert_eq!(line.visible_length(), 0);
        assert_eq!(line.render(), "");
    }

    #[test]
    fn conversions() {
        assert_eq!(TextSpan::from("x"), TextSpan::raw("x"));
        assert_eq!(TextLine::from("x").spans(), &[TextSpan::raw("x")]);
        assert_eq!(
            TextLine::from(TextSpan::raw(String::from("y"))).visible_length(),
            1
        );
    }
}

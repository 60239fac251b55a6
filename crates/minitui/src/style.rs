// SPDX-License-Identifier: MIT
//
// Style model: colors, text modifiers, hyperlinks.
//
// A `Style` is a value: optional foreground and background drawn from the
// sixteen named terminal colors, a bitfield of modifiers, and an optional
// OSC 8 hyperlink target. An unset field means "whatever the terminal
// default is", never an explicit reset.
//
// Two directions of translation live here:
//
//   apply()  Style → SGR-wrapped string, used to pre-render TextSpans and
//            styled paragraph lines.
//   parse()  SGR sequence → Style, used by ScreenBuffer::write_string to
//            turn escape codes embedded in a string back into cell styles.
//
// Italic is accepted and stored but has no SGR mapping in either direction.
// Code 4 (underline) is emitted by apply() but not recognised by parse().

use std::fmt::Write as _;

use bitflags::bitflags;

use crate::ansi::{LINK_CLOSE, RESET};

// ─── Color ──────────────────────────────────────────────────────────────────

/// The sixteen named terminal colors.
///
/// Foreground codes are 30–37 for the standard eight and 90–97 for the
/// bright eight; background codes are the foreground code plus 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    DarkGray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    LightWhite,
}

impl Color {
    /// All sixteen colors in SGR order (standard, then bright).
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::DarkGray,
        Self::LightRed,
        Self::LightGreen,
        Self::LightYellow,
        Self::LightBlue,
        Self::LightMagenta,
        Self::LightCyan,
        Self::LightWhite,
    ];

    /// SGR foreground code (30–37, 90–97).
    #[must_use]
    pub const fn fg_code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::DarkGray => 90,
            Self::LightRed => 91,
            Self::LightGreen => 92,
            Self::LightYellow => 93,
            Self::LightBlue => 94,
            Self::LightMagenta => 95,
            Self::LightCyan => 96,
            Self::LightWhite => 97,
        }
    }

    /// SGR background code (40–47, 100–107).
    #[inline]
    #[must_use]
    pub const fn bg_code(self) -> u8 {
        self.fg_code() + 10
    }

    /// Inverse of [`fg_code`](Self::fg_code).
    #[must_use]
    pub fn from_fg_code(code: u16) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| u16::from(c.fg_code()) == code)
    }

    /// Inverse of [`bg_code`](Self::bg_code).
    #[must_use]
    pub fn from_bg_code(code: u16) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| u16::from(c.bg_code()) == code)
    }
}

// ─── Modifier ───────────────────────────────────────────────────────────────

bitflags! {
    /// Boolean text attributes.
    ///
    /// ```
    /// use minitui::style::Modifier;
    ///
    /// let m = Modifier::BOLD | Modifier::UNDERLINE;
    /// assert!(m.contains(Modifier::BOLD));
    /// assert!(!m.contains(Modifier::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifier: u8 {
        /// SGR 1.
        const BOLD      = 1 << 0;
        /// SGR 2.
        const DIM       = 1 << 1;
        /// Stored only; never emitted.
        const ITALIC    = 1 << 2;
        /// SGR 4.
        const UNDERLINE = 1 << 3;
    }
}

// ─── Style ──────────────────────────────────────────────────────────────────

/// A composable set of text attributes.
///
/// Built with chained setters:
///
/// ```
/// use minitui::style::{Color, Style};
///
/// let s = Style::new().fg(Color::Green).bold();
/// assert_eq!(s.apply("hello"), "\x1b[32;1mhello\x1b[0m");
/// assert_eq!(Style::new().apply("hello"), "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub modifiers: Modifier,
    /// OSC 8 hyperlink target.
    pub link: Option<String>,
}

impl Style {
    /// A style with nothing set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            modifiers: Modifier::empty(),
            link: None,
        }
    }

    /// A style carrying the given modifiers and nothing else.
    #[must_use]
    pub fn with_modifiers(modifiers: &[Modifier]) -> Self {
        Self {
            modifiers: modifiers.iter().fold(Modifier::empty(), |acc, m| acc | *m),
            ..Self::new()
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.modifiers |= Modifier::BOLD;
        self
    }

    #[must_use]
    pub fn dim(mut self) -> Self {
        self.modifiers |= Modifier::DIM;
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.modifiers |= Modifier::ITALIC;
        self
    }

    #[must_use]
    pub fn underline(mut self) -> Self {
        self.modifiers |= Modifier::UNDERLINE;
        self
    }

    #[must_use]
    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    #[inline]
    #[must_use]
    pub const fn is_bold(&self) -> bool {
        self.modifiers.contains(Modifier::BOLD)
    }

    #[inline]
    #[must_use]
    pub const fn is_dim(&self) -> bool {
        self.modifiers.contains(Modifier::DIM)
    }

    #[inline]
    #[must_use]
    pub const fn is_italic(&self) -> bool {
        self.modifiers.contains(Modifier::ITALIC)
    }

    #[inline]
    #[must_use]
    pub const fn is_underline(&self) -> bool {
        self.modifiers.contains(Modifier::UNDERLINE)
    }

    /// Whether no field at all is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.modifiers.is_empty() && self.link.is_none()
    }

    /// The same style with the hyperlink removed.
    #[must_use]
    pub fn without_link(&self) -> Self {
        Self {
            link: None,
            ..self.clone()
        }
    }

    /// SGR parameters in emission order: fg, bg, bold, dim, underline.
    #[must_use]
    pub fn sgr_codes(&self) -> Vec<u8> {
        let mut codes = Vec::with_capacity(5);
        if let Some(fg) = self.fg {
            codes.push(fg.fg_code());
        }
        if let Some(bg) = self.bg {
            codes.push(bg.bg_code());
        }
        if self.is_bold() {
            codes.push(1);
        }
        if self.is_dim() {
            codes.push(2);
        }
        if self.is_underline() {
            codes.push(4);
        }
        codes
    }

    /// Wrap `text` in the escape sequences for this style.
    ///
    /// SGR attributes become `ESC[<codes>m … ESC[0m`; a link additionally
    /// wraps the result in an OSC 8 open/close pair. With nothing to emit,
    /// `text` comes back unchanged.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let codes = self.sgr_codes();
        let mut out = String::with_capacity(text.len() + 16);

        if let Some(url) = &self.link {
            let _ = write!(out, "\x1b]8;;{url}\x1b\\");
        }
        if codes.is_empty() {
            out.push_str(text);
        } else {
            out.push_str("\x1b[");
            for (i, code) in codes.iter().enumerate() {
                if i > 0 {
                    out.push(';');
                }
                let _ = write!(out, "{code}");
            }
            out.push('m');
            out.push_str(text);
            out.push_str(RESET);
        }
        if self.link.is_some() {
            out.push_str(LINK_CLOSE);
        }
        out
    }

    /// Recover a style from an SGR sequence such as `ESC[36;1m`.
    ///
    /// - `ESC[0m` yields `None` (full reset, base included).
    /// - A sequence with no numeric parameters, or one that is not SGR at
    ///   all, yields `base` unchanged.
    /// - Otherwise codes are applied on top of `base`: 0 resets, 1 bold,
    ///   2 dim, 30–37/90–97 foreground, 40–47/100–107 background. Anything
    ///   else is ignored.
    ///
    /// A resulting style with nothing set collapses to `None`.
    #[must_use]
    pub fn parse(sequence: &str, base: Option<&Self>) -> Option<Self> {
        if sequence == RESET {
            return None;
        }

        let codes = sgr_params(sequence);
        if codes.is_empty() {
            return base.cloned();
        }

        let mut style = base.cloned().unwrap_or_default();
        for code in codes {
            match code {
                0 => style = Self::new(),
                1 => style.modifiers |= Modifier::BOLD,
                2 => style.modifiers |= Modifier::DIM,
                30..=37 | 90..=97 => style.fg = Color::from_fg_code(code),
                40..=47 | 100..=107 => style.bg = Color::from_bg_code(code),
                _ => {}
            }
        }

        (!style.is_empty()).then_some(style)
    }
}

/// Numeric parameters of the first `ESC[<digits and ;>m` in `seq`.
///
/// Empty parameters (`ESC[;1m`) read as 0. Returns an empty list when no
/// SGR sequence is present or it has no parameters.
fn sgr_params(seq: &str) -> Vec<u16> {
    let Some(start) = seq.find("\x1b[") else {
        return Vec::new();
    };
    let body = &seq[start + 2..];
    let Some(end) = body.find(|c: char| !(c.is_ascii_digit() || c == ';')) else {
        return Vec::new();
    };
    if !body[end..].starts_with('m') {
        return Vec::new();
    }
    let params = &body[..end];
    if params.is_empty() {
        return Vec::new();
    }
    params
        .split(';')
        .map(|p| p.parse::<u16>().unwrap_or(0))
        .collect()
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Color ───────────────────────────────────────────────────────────

    #[test]
    fn color_codes_standard_and_bright() {
        assert_eq!(Color::Black.fg_code(), 30);
        assert_eq!(Color::White.fg_code(), 37);
        assert_eq!(Color::DarkGray.fg_code(), 90);
        assert_eq!(Color::LightWhite.fg_code(), 97);
        assert_eq!(Color::Red.bg_code(), 41);
        assert_eq!(Color::LightCyan.bg_code(), 106);
    }

    #[test]
    fn color_code_lookup_inverts() {
        for color in Color::ALL {
            assert_eq!(Color::from_fg_code(u16::from(color.fg_code())), Some(color));
            assert_eq!(Color::from_bg_code(u16::from(color.bg_code())), Some(color));
        }
        assert_eq!(Color::from_fg_code(38), None);
        assert_eq!(Color::from_bg_code(37), None);
    }

    // ── apply ───────────────────────────────────────────────────────────

    #[test]
    fn apply_foreground() {
        assert_eq!(Style::new().fg(Color::Cyan).apply("hello"), "\x1b[36mhello\x1b[0m");
    }

    #[test]
    fn apply_bold() {
        assert_eq!(Style::new().bold().apply("hello"), "\x1b[1mhello\x1b[0m");
    }

    #[test]
    fn apply_dim() {
        assert_eq!(Style::new().dim().apply("hello"), "\x1b[2mhello\x1b[0m");
    }

    #[test]
    fn apply_combined_in_fixed_order() {
        assert_eq!(
            Style::new().fg(Color::Green).bold().apply("hello"),
            "\x1b[32;1mhello\x1b[0m"
        );
        let all = Style::new()
            .underline()
            .dim()
            .bold()
            .bg(Color::Blue)
            .fg(Color::LightRed);
        assert_eq!(all.apply("x"), "\x1b[91;44;1;2;4mx\x1b[0m");
    }

    #[test]
    fn apply_nothing_is_identity() {
        assert_eq!(Style::new().apply("hello"), "hello");
    }

    #[test]
    fn apply_italic_emits_nothing() {
        assert_eq!(Style::new().italic().apply("hello"), "hello");
        assert_eq!(
            Style::new().italic().bold().apply("hello"),
            "\x1b[1mhello\x1b[0m"
        );
    }

    #[test]
    fn apply_link_wraps_everything() {
        let s = Style::new().fg(Color::Cyan).link("https://example.com");
        assert_eq!(
            s.apply("click me"),
            "\x1b]8;;https://example.com\x1b\\\x1b[36mclick me\x1b[0m\x1b]8;;\x1b\\"
        );
    }

    #[test]
    fn apply_link_only() {
        let s = Style::new().link("https://a.b");
        assert_eq!(s.apply("x"), "\x1b]8;;https://a.b\x1b\\x\x1b]8;;\x1b\\");
    }

    // ── builders ────────────────────────────────────────────────────────

    #[test]
    fn with_modifiers_sets_flags() {
        let s = Style::with_modifiers(&[Modifier::BOLD, Modifier::DIM]).fg(Color::Red);
        assert!(s.is_bold());
        assert!(s.is_dim());
        assert!(!s.is_underline());
        assert_eq!(s.fg, Some(Color::Red));
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(Style::new().bold().fg(Color::Red), Style::new().fg(Color::Red).bold());
        assert_ne!(Style::new().bold(), Style::new().dim());
    }

    #[test]
    fn empty_and_without_link() {
        assert!(Style::new().is_empty());
        assert!(!Style::new().italic().is_empty());
        let linked = Style::new().bold().link("u");
        assert_eq!(linked.without_link(), Style::new().bold());
    }

    // ── parse ───────────────────────────────────────────────────────────

    #[test]
    fn parse_reset_is_none() {
        let base = Style::new().bold();
        assert_eq!(Style::parse("\x1b[0m", Some(&base)), None);
    }

    #[test]
    fn parse_foreground_and_bold() {
        assert_eq!(
            Style::parse("\x1b[36;1m", None),
            Some(Style::new().fg(Color::Cyan).bold())
        );
    }

    #[test]
    fn parse_bright_colors() {
        assert_eq!(
            Style::parse("\x1b[93;104m", None),
            Some(Style::new().fg(Color::LightYellow).bg(Color::LightBlue))
        );
    }

    #[test]
    fn parse_builds_on_base() {
        let base = Style::new().bg(Color::Black);
        assert_eq!(
            Style::parse("\x1b[2m", Some(&base)),
            Some(Style::new().bg(Color::Black).dim())
        );
    }

    #[test]
    fn parse_zero_inside_list_resets_then_continues() {
        let base = Style::new().bold();
        assert_eq!(
            Style::parse("\x1b[0;31m", Some(&base)),
            Some(Style::new().fg(Color::Red))
        );
    }

    #[test]
    fn parse_unknown_codes_ignored() {
        assert_eq!(Style::parse("\x1b[4m", None), None);
        assert_eq!(Style::parse("\x1b[3;1m", None), Some(Style::new().bold()));
    }

    #[test]
    fn parse_non_sgr_returns_base() {
        let base = Style::new().fg(Color::Red);
        assert_eq!(Style::parse("\x1b[K", Some(&base)), Some(base.clone()));
        assert_eq!(Style::parse("\x1b[m", Some(&base)), Some(base));
        assert_eq!(Style::parse("\x1b[2J", None), None);
    }

    #[test]
    fn parse_recovers_apply_prefix() {
        let style = Style::new().fg(Color::Magenta).bg(Color::White).bold().dim();
        let rendered = style.apply("x");
        let prefix = &rendered[..rendered.find('x').unwrap()];
        assert_eq!(Style::parse(prefix, None), Some(style));
    }
}

// SPDX-License-Identifier: MIT
//
// ANSI / OSC escape sequences: generation and scanning.
//
// The writer half is a set of pure functions that write sequences to any
// `impl Write`. No state, no decisions about when to emit; that is the
// `RowWriter`'s job. Row numbers are 0-indexed in our API and converted to
// the 1-indexed form the terminal expects.
//
// The scanner half splits a string that may carry embedded escape codes into
// visible characters, control sequences, and hyperlink changes. It is a
// small state machine: each step consumes the current state by value and
// returns the next one, so the accumulated sequence is never aliased.

use std::io::{self, Write};

/// SGR 0: reset every attribute.
pub const RESET: &str = "\x1b[0m";

/// OSC 8 with an empty target: closes the current hyperlink.
pub const LINK_CLOSE: &str = "\x1b]8;;\x1b\\";

const ESC: char = '\x1b';
const BEL: char = '\x07';

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to column 0 of row `y` (`ESC[<y+1>;1H`).
#[inline]
pub fn cursor_to_row(w: &mut impl Write, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};1H", u32::from(y) + 1)
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Clear from the cursor to the end of the line (EL 0).
#[inline]
pub fn clear_line(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[K")
}

/// Enter the alternate screen buffer (DEC Private Mode 1049).
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

/// Exit the alternate screen buffer and restore original content.
#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

// ─── SGR ─────────────────────────────────────────────────────────────────────

/// Reset all SGR attributes (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(RESET.as_bytes())
}

/// Emit one SGR sequence with semicolon-separated parameters.
///
/// `[32, 1]` becomes `ESC[32;1m`. Does nothing for an empty list.
pub fn sgr(w: &mut impl Write, codes: &[u8]) -> io::Result<()> {
    let Some((first, rest)) = codes.split_first() else {
        return Ok(());
    };
    write!(w, "\x1b[{first}")?;
    for code in rest {
        write!(w, ";{code}")?;
    }
    w.write_all(b"m")
}

// ─── Hyperlinks ──────────────────────────────────────────────────────────────

/// Open an OSC 8 hyperlink to `url`.
#[inline]
pub fn link_open(w: &mut impl Write, url: &str) -> io::Result<()> {
    write!(w, "\x1b]8;;{url}\x1b\\")
}

/// Close the current OSC 8 hyperlink.
#[inline]
pub fn link_close(w: &mut impl Write) -> io::Result<()> {
    w.write_all(LINK_CLOSE.as_bytes())
}

// ─── Scanning ────────────────────────────────────────────────────────────────

/// One unit of a scanned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A character to draw.
    Char(char),
    /// A complete escape sequence ending in an ASCII letter, ESC included.
    Control(String),
    /// An OSC 8 hyperlink change: `Some(url)` opens, `None` closes.
    Link(Option<String>),
}

/// Escape-sequence scanner state.
///
/// - `Text`: outside any sequence.
/// - `Escape`: just saw ESC.
/// - `Sequence`: accumulating until an ASCII letter terminates it.
/// - `Osc` / `OscEscape`: inside an OSC string, terminated by BEL or `ESC \`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scanner {
    #[default]
    Text,
    Escape,
    Sequence(String),
    Osc(String),
    OscEscape(String),
}

impl Scanner {
    /// Consume one character, returning the next state and any finished token.
    #[must_use]
    pub fn step(self, ch: char) -> (Self, Option<Token>) {
        match self {
            Self::Text if ch == ESC => (Self::Escape, None),
            Self::Text => (Self::Text, Some(Token::Char(ch))),
            Self::Escape => match ch {
                ESC => (Self::Escape, None),
                ']' => (Self::Osc(String::new()), None),
                c if c.is_ascii_alphabetic() => {
                    (Self::Text, Some(Token::Control(format!("{ESC}{c}"))))
                }
                c => (Self::Sequence(format!("{ESC}{c}")), None),
            },
            Self::Sequence(_) if ch == ESC => (Self::Escape, None),
            Self::Sequence(mut seq) => {
                seq.push(ch);
                if ch.is_ascii_alphabetic() {
                    (Self::Text, Some(Token::Control(seq)))
                } else {
                    (Self::Sequence(seq), None)
                }
            }
            Self::Osc(body) if ch == BEL => (Self::Text, osc_token(&body)),
            Self::Osc(body) if ch == ESC => (Self::OscEscape(body), None),
            Self::Osc(mut body) => {
                body.push(ch);
                (Self::Osc(body), None)
            }
            // `ESC \` is the proper terminator; anything else after ESC also
            // ends the string and is swallowed with it.
            Self::OscEscape(body) => (Self::Text, osc_token(&body)),
        }
    }
}

/// Interpret a finished OSC body. Only OSC 8 produces a token.
fn osc_token(body: &str) -> Option<Token> {
    let rest = body.strip_prefix("8;")?;
    let (_params, url) = rest.split_once(';')?;
    Some(Token::Link((!url.is_empty()).then(|| url.to_owned())))
}

/// Scan a whole string into tokens. An unterminated trailing sequence is
/// dropped.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut state = Scanner::default();
    for ch in text.chars() {
        let (next, token) = state.step(ch);
        state = next;
        tokens.extend(token);
    }
    tokens
}

// ─── Tests ───────────────────────────────────────────────────────────────────

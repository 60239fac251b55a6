// SPDX-License-Identifier: MIT
//
// Output buffering and stateful row rendering.
//
// Two components work together to minimize terminal I/O:
//
//   OutputBuffer: accumulates all escape bytes in memory so the entire frame
//   can be written with a single write_all() and one flush.
//
//   RowWriter: turns one row of cells into text plus the escape sequences
//   needed to style it. It remembers the SGR style and the hyperlink that are
//   currently open and only emits a sequence when a cell actually changes
//   one of them. A run of identically styled cells costs one SGR sequence.
//
// Hyperlinks are tracked apart from the other attributes: a link change
// emits OSC 8 close/open and never disturbs the open SGR style, and an SGR
// change never closes the link.

use std::io::{self, Write};

use crate::ansi;
use crate::cell::Cell;
use crate::style::Style;

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// A byte buffer that accumulates escape output for a single write.
///
/// Default capacity: 16 KB, enough for most frames without reallocation.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// Create an empty buffer with default capacity (16 KB).
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append one character as UTF-8.
    #[inline]
    pub fn push_char(&mut self, ch: char) {
        let mut enc = [0u8; 4];
        self.buf.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to `w`, flush it, and clear the buffer.
    ///
    /// An empty buffer writes nothing and does not flush.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // No-op. Real flushing goes through flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── RowWriter ───────────────────────────────────────────────────────────────

/// Stateful renderer for one row of cells.
///
/// - **Link**: on change, close the open link (if any) and open the new one
///   (if any).
/// - **Style**: compared with the link stripped. On change, reset when a
///   style was open, then emit the new style's SGR codes. A style without
///   codes counts as no style.
/// - **Continuation cells** produce nothing: the wide character before them
///   already covers their column.
/// - **End of row**: [`finish`](Self::finish) closes an open link and resets
///   an open style, so no attribute bleeds into the next row or into the
///   erase-to-end-of-line that follows.
#[derive(Debug, Default)]
pub struct RowWriter {
    open_style: Option<Style>,
    open_link: Option<String>,
}

impl RowWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            open_style: None,
            open_link: None,
        }
    }

    /// Emit a single cell, with whatever sequences its style requires.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn write_cell(&mut self, out: &mut OutputBuffer, cell: &Cell) -> io::Result<()> {
        if cell.is_continuation() {
            return Ok(());
        }

        let link = cell.link();
        if link != self.open_link.as_deref() {
            if self.open_link.is_some() {
                ansi::link_close(out)?;
            }
            if let Some(url) = link {
                ansi::link_open(out, url)?;
            }
            self.open_link = link.map(str::to_owned);
        }

        let style = cell
            .style
            .as_ref()
            .map(Style::without_link)
            .filter(|s| !s.sgr_codes().is_empty());
        if style != self.open_style {
            if self.open_style.is_some() {
                ansi::reset(out)?;
            }
            if let Some(s) = &style {
                ansi::sgr(out, &s.sgr_codes())?;
            }
            self.open_style = style;
        }

        out.push_char(cell.ch);
        Ok(())
    }

    /// Close whatever is still open and return to the initial state.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn finish(&mut self, out: &mut OutputBuffer) -> io::Result<()> {
        if self.open_link.take().is_some() {
            ansi::link_close(out)?;
        }
        if self.open_style.take().is_some() {
            ansi::reset(out)?;
        }
        Ok(())
    }

    /// Render a full row: every cell, then [`finish`](Self::finish).
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn write_row(&mut self, out: &mut OutputBuffer, cells: &[Cell]) -> io::Result<()> {
        for cell in cells {
            self.write_cell(out, cell)?;
        }
        self.finish(out)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

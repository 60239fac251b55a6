// SPDX-License-Identifier: MIT
//
// Differential renderer: row-granular frame updates.
//
// Instead of redrawing the whole screen every frame, the current
// ScreenBuffer is compared row by row against the previous frame and only
// rows that differ are emitted. A dashboard that refreshes a clock touches
// one row out of dozens; that one row is all the terminal sees.
//
// Per changed row the output is:
//
//   ESC[<y+1>;1H   move to column 0 of the row
//   <row>          cells with minimal SGR / OSC 8 changes (RowWriter)
//   ESC[K          erase whatever the terminal still shows past the text
//
// Rules:
//
//   - No previous frame: every row is drawn.
//   - Previous frame with different dimensions: ESC[2J, then every row.
//     Stale content outside the new bounds would otherwise linger.
//   - Same dimensions: a row is skipped when its cell slice compares equal.
//     An unchanged frame emits zero bytes.
//
// All output for the frame is accumulated in an OutputBuffer and handed to
// the writer in one write.

use std::io::{self, Write};

use crate::ansi;
use crate::buffer::ScreenBuffer;
use crate::output::{OutputBuffer, RowWriter};

// ─── RenderStats ─────────────────────────────────────────────────────────────

/// Statistics from a render pass, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Rows that differed from the previous frame and were emitted.
    pub rows_rendered: usize,
    /// Rows that matched the previous frame and were skipped.
    pub rows_skipped: usize,
    /// Total bytes handed to the writer.
    pub bytes_written: usize,
}

impl RenderStats {
    /// Total rows processed (rendered + skipped).
    #[inline]
    #[must_use]
    pub const fn total_rows(&self) -> usize {
        self.rows_rendered + self.rows_skipped
    }
}

// ─── Rendering ───────────────────────────────────────────────────────────────

impl ScreenBuffer {
    /// Render this frame to `w`, emitting only rows that differ from
    /// `previous`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn render_to(
        &self,
        previous: Option<&Self>,
        w: &mut impl Write,
    ) -> io::Result<RenderStats> {
        let mut out = OutputBuffer::new();
        let stats = self.render_into(previous, &mut out)?;
        out.flush_to(w)?;
        Ok(stats)
    }

    /// Render this frame to stdout. See [`render_to`](Self::render_to).
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn render_to_terminal(&self, previous: Option<&Self>) -> io::Result<RenderStats> {
        self.render_to(previous, &mut io::stdout().lock())
    }

    fn render_into(
        &self,
        previous: Option<&Self>,
        out: &mut OutputBuffer,
    ) -> io::Result<RenderStats> {
        let mut stats = RenderStats::default();

        // A previous frame of another size cannot be diffed against.
        let previous = match previous {
            Some(prev) if prev.width() != self.width() || prev.height() != self.height() => {
                tracing::debug!(
                    from = ?(prev.width(), prev.height()),
                    to = ?(self.width(), self.height()),
                    "frame size changed; full redraw"
                );
                ansi::clear_screen(out)?;
                None
            }
            other => other,
        };

        let mut writer = RowWriter::new();
        for y in 0..self.height() {
            let Some(row) = self.row(y) else { break };

            if previous.and_then(|p| p.row(y)) == Some(row) {
                stats.rows_skipped += 1;
                continue;
            }

            ansi::cursor_to_row(out, y)?;
            writer.write_row(out, row)?;
            ansi::clear_line(out)?;
            stats.rows_rendered += 1;
        }

        stats.bytes_written = out.len();
        tracing::debug!(
            rows_rendered = stats.rows_rendered,
            rows_skipped = stats.rows_skipped,
            bytes = stats.bytes_written,
            "frame rendered"
        );
        Ok(stats)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, Style};
    use pretty_assertions::assert_eq;

    /// Helper: render a frame and return (stats, output string).
    fn render(frame: &ScreenBuffer, previous: Option<&ScreenBuffer>) -> (RenderStats, String) {
        let mut out = Vec::new();
        let stats = frame.render_to(previous, &mut out).unwrap();
        (stats, String::from_utf8(out).unwrap())
    }

    // ── First Render ────────────────────────────────────────────────────

    #[test]
    fn first_render_draws_every_row() {
        let mut frame = ScreenBuffer::new(4, 2);
        frame.write_string(0, 0, "ab", None);
        let (stats, output) = render(&frame, None);
        assert_eq!(stats.rows_rendered, 2);
        assert_eq!(stats.rows_skipped, 0);
        assert_eq!(output, "\x1b[1;1Hab  \x1b[K\x1b[2;1H    \x1b[K");
        assert_eq!(stats.bytes_written, output.len());
    }

    #[test]
    fn first_render_does_not_clear_screen() {
        let (_, output) = render(&ScreenBuffer::new(4, 2), None);
        assert!(!output.contains("\x1b[2J"));
    }

    // ── Identical Frames ────────────────────────────────────────────────

    #[test]
    fn identical_frames_emit_nothing() {
        let mut frame = ScreenBuffer::new(10, 5);
        frame.write_string(0, 1, "hello", Some(&Style::new().bold()));
        let (stats, output) = render(&frame, Some(&frame.clone()));
        assert_eq!(output, "");
        assert_eq!(stats.rows_rendered, 0);
        assert_eq!(stats.rows_skipped, 5);
        assert_eq!(stats.bytes_written, 0);
    }

    // ── Partial Changes ─────────────────────────────────────────────────

    #[test]
    fn single_changed_row_positions_once() {
        let mut a = ScreenBuffer::new(10, 5);
        a.write_string(0, 0, "same", None);
        let mut b = a.clone();
        b.write_string(0, 2, "new", None);

        let (stats, output) = render(&b, Some(&a));
        assert_eq!(stats.rows_rendered, 1);
        assert_eq!(stats.rows_skipped, 4);
        assert_eq!(output.matches(";1H").count(), 1);
        assert!(output.starts_with("\x1b[3;1Hnew"));
        assert!(output.ends_with("\x1b[K"));
    }

    #[test]
    fn style_only_change_is_a_change() {
        let mut a = ScreenBuffer::new(5, 1);
        a.write_string(0, 0, "x", None);
        let mut b = ScreenBuffer::new(5, 1);
        b.write_string(0, 0, "x", Some(&Style::new().fg(Color::Red)));
        let (stats, output) = render(&b, Some(&a));
        assert_eq!(stats.rows_rendered, 1);
        assert_eq!(output, "\x1b[1;1H\x1b[31mx\x1b[0m    \x1b[K");
    }

    #[test]
    fn rendered_row_closes_link_and_style() {
        let mut frame = ScreenBuffer::new(3, 1);
        let style = Style::new().fg(Color::Cyan).link("https://e.com");
        frame.set(2, 0, 'z', Some(&style));
        let (_, output) = render(&frame, None);
        assert_eq!(
            output,
            "\x1b[1;1H  \x1b]8;;https://e.com\x1b\\\x1b[36mz\x1b]8;;\x1b\\\x1b[0m\x1b[K"
        );
    }

    // ── Resize ──────────────────────────────────────────────────────────

    #[test]
    fn size_change_clears_and_redraws() {
        let small = ScreenBuffer::new(10, 5);
        let big = ScreenBuffer::new(20, 10);
        let (stats, output) = render(&big, Some(&small));
        assert!(output.starts_with("\x1b[2J"));
        assert_eq!(stats.rows_rendered, 10);
        assert_eq!(stats.rows_skipped, 0);
    }

    // ── Zero-Size Buffer ────────────────────────────────────────────────

    #[test]
    fn zero_size_buffer_produces_no_output() {
        let frame = ScreenBuffer::new(0, 0);
        let (stats, output) = render(&frame, None);
        assert_eq!(output, "");
        assert_eq!(stats.total_rows(), 0);
    }

    // ── Consecutive Frames ──────────────────────────────────────────────

    #[test]
    fn consecutive_frames() {
        let a = ScreenBuffer::new(8, 3);
        let mut b = a.clone();
        b.write_string(0, 1, "tick", None);
        let mut c = b.clone();
        c.write_string(0, 1, "tock", None);

        assert_eq!(render(&a, None).0.rows_rendered, 3);
        assert_eq!(render(&b, Some(&a)).0.rows_rendered, 1);
        assert_eq!(render(&c, Some(&b)).0.rows_rendered, 1);
        assert_eq!(render(&c, Some(&c)).0.rows_rendered, 0);
    }

    #[test]
    fn render_stats_total_rows() {
        let stats = RenderStats {
            rows_rendered: 2,
            rows_skipped: 22,
            bytes_written: 64,
        };
        assert_eq!(stats.total_rows(), 24);
    }

    // ── Logging ─────────────────────────────────────────────────────────

    /// Shared sink for a test subscriber.
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured_at(level: tracing::Level, f: impl FnOnce()) -> String {
        let sink = Captured::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = sink.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn frame_stats_are_logged_at_debug() {
        let frame = ScreenBuffer::new(4, 2);
        let log = captured_at(tracing::Level::DEBUG, || {
            render(&frame, None);
        });
        assert!(log.contains("DEBUG"));
        assert!(log.contains("frame rendered"));
        assert!(log.contains("rows_rendered=2"));
    }

    #[test]
    fn frame_stats_are_quiet_at_info() {
        let frame = ScreenBuffer::new(4, 2);
        let log = captured_at(tracing::Level::INFO, || {
            render(&frame, None);
        });
        assert!(!log.contains("frame rendered"));
    }
}

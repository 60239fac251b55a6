// SPDX-License-Identifier: MIT
//
// Runtime: the host-driven frame loop.
//
// The engine never owns the loop. The host enters the terminal, then
// alternates between two calls for as long as it likes:
//
//   draw(|frame| ...)  paint a fresh buffer, diff it against the last one,
//                      flush the changed rows in a single write
//   poll_event(ms)     block up to `ms` for one key
//
// Every draw starts from a blank buffer sized to the terminal as it is
// right now. When the size changed since the last draw, the diff sees
// mismatched buffers and redraws everything, so there is no resize signal
// to handle.
//
// `run()` scopes all of that: it enters, hands the Runtime to a closure,
// and tears down on every exit path. A panic inside the closure unwinds
// through the terminal's Drop, which restores it.

use std::io::{self, Write};
use std::time::Duration;

use crate::buffer::ScreenBuffer;
use crate::diff::RenderStats;
use crate::error::Result;
use crate::geometry::Rect;
use crate::input::{Event, InputSource, StdinSource, read_event};
use crate::layout::{self, Constraint, Direction};
use crate::terminal::{Size, Terminal};
use crate::widgets::Widget;

// ─── Config ─────────────────────────────────────────────────────────────────

/// Timing and fallback settings for the [`Runtime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// How long to wait for each follow-up byte of an escape sequence
    /// before reporting a lone Escape. Default: 50ms.
    pub escape_timeout: Duration,

    /// Timeout used by [`Runtime::poll_default`]. Default: 500ms.
    pub default_poll_timeout: Duration,

    /// Size assumed when the terminal cannot report one. Default: 80×24.
    pub fallback_size: Size,
}

impl RuntimeConfig {
    #[must_use]
    pub const fn with_escape_timeout(mut self, timeout: Duration) -> Self {
        self.escape_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_default_poll_timeout(mut self, timeout: Duration) -> Self {
        self.default_poll_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_fallback_size(mut self, size: Size) -> Self {
        self.fallback_size = size;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            escape_timeout: Duration::from_millis(50),
            default_poll_timeout: Duration::from_millis(500),
            fallback_size: Size::new(80, 24),
        }
    }
}

// ─── Frame ──────────────────────────────────────────────────────────────────

/// One frame being painted. Handed to the closure passed to
/// [`Runtime::draw`].
pub struct Frame<'a> {
    area: Rect,
    buffer: &'a mut ScreenBuffer,
}

impl<'a> Frame<'a> {
    pub(crate) const fn new(buffer: &'a mut ScreenBuffer) -> Self {
        Self {
            area: buffer.area(),
            buffer,
        }
    }

    /// The whole screen.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Direct access to the buffer for painting outside of widgets.
    pub const fn buffer_mut(&mut self) -> &mut ScreenBuffer {
        self.buffer
    }

    /// Render `widget` into `area` of this frame.
    pub fn render_widget(&mut self, widget: impl Widget, area: Rect) {
        widget.render_to_buffer(self.buffer, area);
    }
}

// ─── Runtime ────────────────────────────────────────────────────────────────

/// Owns the terminal, the input source, and the last flushed frame.
///
/// Usually obtained through [`run`]. Building one directly does not touch
/// the terminal until [`enter`](Self::enter) is called.
pub struct Runtime<S: InputSource = StdinSource> {
    terminal: Terminal,
    input: S,
    previous: Option<ScreenBuffer>,
    config: RuntimeConfig,
}

impl Runtime {
    /// A runtime reading keys from stdin.
    #[must_use]
    pub const fn new(config: RuntimeConfig) -> Self {
        Self::with_source(config, StdinSource)
    }
}

impl<S: InputSource> Runtime<S> {
    /// A runtime reading keys from `input`.
    #[must_use]
    pub const fn with_source(config: RuntimeConfig, input: S) -> Self {
        Self {
            terminal: Terminal::new(config.fallback_size),
            input,
            previous: None,
            config,
        }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Enter raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// See [`Terminal::enter`].
    pub fn enter(&mut self) -> Result<()> {
        self.previous = None;
        self.terminal.enter()
    }

    /// Restore the terminal. Also runs on drop.
    ///
    /// # Errors
    ///
    /// Returns an error if the restore sequences cannot be written.
    pub fn leave(&mut self) -> Result<()> {
        self.previous = None;
        Ok(self.terminal.leave()?)
    }

    /// The full screen rectangle, from the terminal's current size.
    pub fn area(&mut self) -> Rect {
        let size = self.terminal.size();
        Rect::new(0, 0, size.cols, size.rows)
    }

    /// Split `rect` along `direction`. Same as [`layout::split`].
    #[must_use]
    pub fn layout_split(
        &self,
        rect: Rect,
        direction: Direction,
        constraints: &[Constraint],
    ) -> Vec<Rect> {
        layout::split(rect, direction, constraints)
    }

    /// Paint a frame with `paint` and flush what changed to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn draw<F>(&mut self, paint: F) -> Result<RenderStats>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        let area = self.area();
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.draw_into(area, &mut lock, paint)
    }

    /// Paint a frame covering `area` and flush what changed to `out`.
    fn draw_into<F>(&mut self, area: Rect, out: &mut impl Write, paint: F) -> Result<RenderStats>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        let mut buffer = ScreenBuffer::for_area(area);
        paint(&mut Frame::new(&mut buffer));

        let stats = buffer.render_to(self.previous.as_ref(), out)?;
        self.previous = Some(buffer);
        Ok(stats)
    }

    /// Wait up to `timeout_ms` milliseconds for one input event.
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin fails or stdin has been closed.
    pub fn poll_event(&mut self, timeout_ms: u64) -> Result<Option<Event>> {
        self.poll_timeout(Duration::from_millis(timeout_ms))
    }

    /// [`poll_event`](Self::poll_event) with the configured default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin fails or stdin has been closed.
    pub fn poll_default(&mut self) -> Result<Option<Event>> {
        self.poll_timeout(self.config.default_poll_timeout)
    }

    fn poll_timeout(&mut self, timeout: Duration) -> Result<Option<Event>> {
        Ok(read_event(
            &mut self.input,
            timeout,
            self.config.escape_timeout,
        )?)
    }
}

/// Enter the terminal, run `body`, and restore the terminal however `body`
/// exits.
///
/// ```no_run
/// use minitui::{Event, KeyCode, KeyEvent, Paragraph, RuntimeConfig};
///
/// minitui::run(RuntimeConfig::default(), |rt| {
///     loop {
///         rt.draw(|frame| frame.render_widget(Paragraph::new("press q"), frame.area()))?;
///         if let Some(Event::Key(KeyEvent { code: KeyCode::Char('q'), .. })) = rt.poll_default()? {
///             return Ok(());
///         }
///     }
/// })?;
/// # Ok::<(), minitui::Error>(())
/// ```
///
/// # Errors
///
/// Returns the error from entering the terminal or from `body`. When `body`
/// succeeds, a failure to write the restore sequences is returned instead.
pub fn run<T, F>(config: RuntimeConfig, body: F) -> Result<T>
where
    F: FnOnce(&mut Runtime) -> Result<T>,
{
    let mut runtime = Runtime::new(config);
    runtime.enter()?;

    let result = body(&mut runtime);
    let left = runtime.leave();

    let value = result?;
    left?;
    Ok(value)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

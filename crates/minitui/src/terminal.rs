// SPDX-License-Identifier: MIT
//
// Terminal control: raw mode, alternate screen, and RAII cleanup.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), isatty, and raw fd writes. These are
// the standard POSIX interfaces for terminal control; there is no safe
// alternative. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// Lifecycle:
//
//   Normal ──enter()──▶ Raw + alternate screen ──leave()──▶ Normal
//
// enter() saves the terminal attributes, switches to raw mode (no canonical
// line editing, no echo), enters the alternate screen, clears it once, and
// hides the cursor. leave() shows the cursor, leaves the alternate screen,
// and restores the saved attributes. Restoring is best-effort: a failure is
// logged and otherwise ignored, so teardown always runs to completion.
//
// The saved attributes live in a `SavedMode` handle owned by the Terminal.
// It is produced by entering raw mode and consumed by restoring it; there is
// no process-wide copy. Drop calls leave(), so a host loop that returns
// early, errors, or unwinds from a panic still restores the terminal.
//
// The panic hook writes a short restore sequence straight to fd 1, bypassing
// the stdout lock in case the panic happened mid-flush, before the panic
// message prints. Attribute restore then follows from Drop during unwinding.

use std::io::{self, Write};
use std::sync::Once;

use crate::ansi;
use crate::error::{Error, Result};

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Total number of cells (`cols × rows`).
    #[inline]
    #[must_use]
    pub const fn area(self) -> u32 {
        self.cols as u32 * self.rows as u32
    }
}

impl Default for Size {
    /// The conventional 80×24.
    fn default() -> Self {
        Self::new(80, 24)
    }
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    // SAFETY: winsize is plain data; zeroed is a valid value.
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    // SAFETY: TIOCGWINSZ writes into `ws`, which outlives the call.
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size::new(ws.ws_col, ws.ws_row))
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Check whether stdin is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    // SAFETY: isatty only inspects the descriptor.
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Raw Mode ───────────────────────────────────────────────────────────────

/// Terminal attributes captured before entering raw mode.
///
/// Only obtainable from [`enable_raw_mode`] and consumed by
/// [`restore_mode`], so attributes are restored at most once.
#[cfg(unix)]
pub struct SavedMode(libc::termios);

#[cfg(not(unix))]
pub struct SavedMode(());

/// Switch stdin into raw mode, returning the previous attributes.
///
/// Returns `Ok(None)` when stdin is not a terminal: there is nothing to
/// switch, and nothing to restore later.
///
/// # Errors
///
/// Returns an error if the attributes cannot be read or written.
#[cfg(unix)]
pub fn enable_raw_mode() -> io::Result<Option<SavedMode>> {
    if !is_tty() {
        return Ok(None);
    }

    let fd = libc::STDIN_FILENO;
    // SAFETY: termios is plain data; tcgetattr fills it before any read.
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };
    // SAFETY: `termios` is valid for writes for the duration of the call.
    if unsafe { libc::tcgetattr(fd, &raw mut termios) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let saved = SavedMode(termios);

    // cfmakeraw equivalent: disable all line processing.
    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    // VMIN=1, VTIME=0: read() blocks until at least 1 byte is available.
    // Waiting with a timeout is done by poll() in the input source.
    termios.c_cc[libc::VMIN] = 1;
    termios.c_cc[libc::VTIME] = 0;

    // SAFETY: `termios` is a fully initialised attribute set.
    if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(Some(saved))
}

/// Raw mode is not available here; there is nothing to save.
///
/// # Errors
///
/// Never fails.
#[cfg(not(unix))]
pub fn enable_raw_mode() -> io::Result<Option<SavedMode>> {
    Ok(None)
}

/// Put back the attributes captured by [`enable_raw_mode`].
///
/// # Errors
///
/// Returns an error if the attributes cannot be written.
#[cfg(unix)]
#[allow(clippy::needless_pass_by_value)] // Consuming the handle is the point.
pub fn restore_mode(saved: SavedMode) -> io::Result<()> {
    // SAFETY: `saved.0` came from tcgetattr on the same descriptor.
    if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const saved.0) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Nothing to restore here.
///
/// # Errors
///
/// Never fails.
#[cfg(not(unix))]
#[allow(clippy::needless_pass_by_value)]
pub fn restore_mode(_saved: SavedMode) -> io::Result<()> {
    Ok(())
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Restore sequence for emergency use: reset SGR attributes, show the
/// cursor, exit the alternate screen. The alternate screen exit is last so
/// the shell content comes back with no TUI artifacts.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[0m\x1b[?25h\x1b[?1049l";

/// Panic hook guard: ensures the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the screen before printing the error.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();
            original(info);
        }));
    });
}

/// Write [`EMERGENCY_RESTORE`] directly to stdout's file descriptor.
fn emergency_restore() {
    #[cfg(unix)]
    // SAFETY: writing a static byte slice to fd 1.
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Terminal handle with RAII cleanup.
///
/// ```no_run
/// use minitui::terminal::{Size, Terminal};
///
/// let mut term = Terminal::new(Size::default());
/// term.enter()?;
/// // ... render frames, read input ...
/// // Restored automatically on drop.
/// # Ok::<(), minitui::Error>(())
/// ```
pub struct Terminal {
    /// Attributes to restore on leave. `None` when stdin is not a TTY.
    saved: Option<SavedMode>,

    /// Size reported when the OS cannot tell us.
    fallback: Size,

    /// Whether the size fallback has been logged yet.
    fallback_logged: bool,

    /// Whether we're in TUI mode (raw + alt screen).
    active: bool,
}

impl Terminal {
    /// Create a handle. Does **not** enter TUI mode.
    #[must_use]
    pub const fn new(fallback: Size) -> Self {
        Self {
            saved: None,
            fallback,
            fallback_logged: false,
            active: false,
        }
    }

    /// Current terminal size, queried from the OS on every call.
    ///
    /// Falls back to the configured size (80×24 by default) when the query
    /// fails, e.g. in tests or when stdout is piped.
    pub fn size(&mut self) -> Size {
        get_size().unwrap_or_else(|| {
            if !self.fallback_logged {
                tracing::warn!(
                    cols = self.fallback.cols,
                    rows = self.fallback.rows,
                    "terminal size unavailable; using fallback"
                );
                self.fallback_logged = true;
            }
            self.fallback
        })
    }

    /// Whether we're currently in TUI mode.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Enter TUI mode: raw mode, alternate screen, one clear, hidden cursor.
    ///
    /// Idempotent: calling `enter()` while already active is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::RawMode`] if raw mode cannot be set, [`Error::Io`] if the
    /// mode-switch sequences cannot be written.
    pub fn enter(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }

        install_panic_hook();

        self.saved = enable_raw_mode().map_err(Error::RawMode)?;
        self.active = true;

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        ansi::enter_alt_screen(&mut lock)?;
        ansi::clear_screen(&mut lock)?;
        ansi::cursor_hide(&mut lock)?;
        lock.flush()?;

        tracing::debug!(raw = self.saved.is_some(), "terminal entered");
        Ok(())
    }

    /// Leave TUI mode and restore the terminal.
    ///
    /// Every step runs even if an earlier one fails. Idempotent: calling
    /// `leave()` while inactive is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the first error from writing the restore sequences. A failed
    /// attribute restore is logged, not returned.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let written = {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            ansi::reset(&mut lock)
                .and_then(|()| ansi::cursor_show(&mut lock))
                .and_then(|()| ansi::exit_alt_screen(&mut lock))
                .and_then(|()| lock.flush())
        };

        if let Some(saved) = self.saved.take() {
            if let Err(err) = restore_mode(saved) {
                tracing::warn!(%err, "failed to restore terminal attributes");
            }
        }

        tracing::debug!("terminal left");
        written
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            tracing::warn!(%err, "terminal teardown failed");
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

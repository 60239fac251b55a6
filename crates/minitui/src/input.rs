// SPDX-License-Identifier: MIT
//
// Terminal input: blocking-with-timeout key decoding.
//
// One call to `read_event` yields at most one event. It waits up to the
// caller's timeout for the first byte, then decodes:
//
// - CR / LF → Enter, DEL / BS → Backspace, HT → Tab
// - Other control bytes 0x01–0x1A → Ctrl + letter (0x03 is Ctrl+C)
// - ESC [ A/B/C/D → arrow keys
// - Printable ASCII and UTF-8 multi-byte characters → Char
//
// A lone ESC is ambiguous: it is either the Escape key or the start of an
// arrow sequence. Each follow-up byte gets a short sub-timeout (50 ms by
// default). When it does not arrive, or arrives but is not part of a
// recognised sequence, the result is Escape. Incomplete input never blocks
// past the sub-timeout and never leaks as literal characters.
//
// Bytes come from an `InputSource`. On unix the stdin source polls the file
// descriptor with `poll()`, so no reader thread is needed; tests use an
// in-memory source.

use std::io;
use std::time::Duration;

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// A decoded terminal input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
}

/// A key with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key pressed with no modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// Ctrl + `ch`.
    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            modifiers: Modifiers::CTRL,
        }
    }

    /// Whether this is Ctrl + `ch`.
    #[must_use]
    pub const fn is_ctrl(self, ch: char) -> bool {
        matches!(self.code, KeyCode::Char(c) if c == ch) && self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A printable character (or the letter of a Ctrl chord).
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
}

bitflags! {
    /// Keyboard modifier flags. Single raw bytes can only carry Ctrl;
    /// Alt and Shift never reach a raw-mode reader distinctly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const CTRL = 0b0000_0001;
    }
}

// ─── InputSource ────────────────────────────────────────────────────────────

/// A byte stream that can be waited on with a timeout.
pub trait InputSource {
    /// Wait up to `timeout` for a byte. Returns `Ok(true)` if one can be
    /// read without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying wait fails.
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Read one byte. `Ok(None)` means end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Raw stdin.
#[derive(Debug, Default)]
pub struct StdinSource;

#[cfg(unix)]
#[allow(unsafe_code)]
impl InputSource for StdinSource {
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool> {
        let millis = libc::c_int::try_from(timeout.as_millis()).unwrap_or(libc::c_int::MAX);
        let mut pfd = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };
        // SAFETY: `pfd` is a valid pollfd for the duration of the call.
        let ready = unsafe { libc::poll(&raw mut pfd, 1, millis) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            // A signal (SIGWINCH on resize) interrupts the wait; that is a timeout.
            return if err.kind() == io::ErrorKind::Interrupted {
                Ok(false)
            } else {
                Err(err)
            };
        }
        Ok(ready > 0)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        // SAFETY: reading at most one byte into a valid one-byte buffer.
        let n = unsafe { libc::read(libc::STDIN_FILENO, (&raw mut byte).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            0 => Ok(None),
            _ => Err(io::Error::last_os_error()),
        }
    }
}

/// Without `poll()` the wait cannot time out; reads simply block.
#[cfg(not(unix))]
impl InputSource for StdinSource {
    fn wait_readable(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(true)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        use std::io::Read;

        let mut byte = [0u8; 1];
        match io::stdin().lock().read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}

// ─── Decoding ───────────────────────────────────────────────────────────────

const ESC: u8 = 0x1B;

/// Wait up to `timeout` for input and decode at most one event.
///
/// `escape_timeout` bounds each wait for a follow-up byte inside an escape
/// sequence or a multi-byte character.
///
/// # Errors
///
/// Returns an error when the source fails, and
/// [`io::ErrorKind::UnexpectedEof`] when it reports readable but has no more
/// bytes (a closed pipe, a hung-up terminal). Such a source stays readable
/// forever, so treating it as a timeout would spin the caller's loop.
pub fn read_event(
    source: &mut impl InputSource,
    timeout: Duration,
    escape_timeout: Duration,
) -> io::Result<Option<Event>> {
    if !source.wait_readable(timeout)? {
        return Ok(None);
    }
    let Some(byte) = source.read_byte()? else {
        tracing::debug!("input closed");
        return Err(io::ErrorKind::UnexpectedEof.into());
    };

    let key = match byte {
        ESC => Some(decode_escape(source, escape_timeout)?),
        b'\r' | b'\n' => Some(KeyEvent::plain(KeyCode::Enter)),
        0x7F | 0x08 => Some(KeyEvent::plain(KeyCode::Backspace)),
        b'\t' => Some(KeyEvent::plain(KeyCode::Tab)),
        b @ 0x01..=0x1A => Some(KeyEvent::ctrl(char::from(b + b'a' - 1))),
        b @ 0x20..=0x7E => Some(KeyEvent::plain(KeyCode::Char(char::from(b)))),
        b @ 0xC0..=0xF7 => decode_utf8(source, b, escape_timeout)?
            .map(|ch| KeyEvent::plain(KeyCode::Char(ch))),
        // NUL, 0x1C–0x1F, stray continuation bytes: nothing to report.
        _ => None,
    };

    if let Some(key) = key {
        tracing::trace!(?key, "key event");
    }
    Ok(key.map(Event::Key))
}

/// Read the next byte if it arrives within `timeout`.
fn next_byte(source: &mut impl InputSource, timeout: Duration) -> io::Result<Option<u8>> {
    if source.wait_readable(timeout)? {
        source.read_byte()
    } else {
        Ok(None)
    }
}

/// Decode what follows an ESC. Anything unrecognised is Escape.
fn decode_escape(source: &mut impl InputSource, timeout: Duration) -> io::Result<KeyEvent> {
    if next_byte(source, timeout)? != Some(b'[') {
        return Ok(KeyEvent::plain(KeyCode::Escape));
    }
    let code = match next_byte(source, timeout)? {
        Some(b'A') => KeyCode::Up,
        Some(b'B') => KeyCode::Down,
        Some(b'C') => KeyCode::Right,
        Some(b'D') => KeyCode::Left,
        _ => KeyCode::Escape,
    };
    Ok(KeyEvent::plain(code))
}

/// Expected byte length of a UTF-8 character from its lead byte.
const fn utf8_char_len(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Complete a multi-byte character. Returns `None` if a continuation byte
/// is missing or the sequence is not valid UTF-8.
fn decode_utf8(
    source: &mut impl InputSource,
    lead: u8,
    timeout: Duration,
) -> io::Result<Option<char>> {
    let len = utf8_char_len(lead);
    let mut bytes = [lead, 0, 0, 0];
    for slot in &mut bytes[1..len] {
        match next_byte(source, timeout)? {
            Some(b) if b & 0xC0 == 0x80 => *slot = b,
            _ => return Ok(None),
        }
    }
    Ok(std::str::from_utf8(&bytes[..len])
        .ok()
        .and_then(|s| s.chars().next()))
}

// ─── Tests ──────────────────────────────────────────────────────────────────

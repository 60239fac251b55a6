// SPDX-License-Identifier: MIT
//
// Engine errors.
//
// Only real terminal I/O can fail. Everything the engine absorbs on purpose
// (out-of-range writes, unknown SGR codes, a failed size query, a failed
// attribute restore) never becomes an Error.

use std::io;

/// Errors surfaced by the runtime.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Writing frames to stdout or reading input from stdin failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Switching the terminal into raw mode failed.
    #[error("failed to enter raw mode: {0}")]
    RawMode(#[source] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "terminal I/O failed: pipe closed");
    }

    #[test]
    fn raw_mode_message() {
        let err = Error::RawMode(io::Error::other("not a tty"));
        assert_eq!(err.to_string(), "failed to enter raw mode: not a tty");
        assert!(std::error::Error::source(&err).is_some());
    }
}

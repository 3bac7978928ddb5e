//! Low-level terminal access.
//!
//! This module owns everything that touches the terminal device directly:
//! switching raw mode on and off, querying the window size, and the line
//! reader that drives the REPL.
//!
//! # Modules
//!
//! - `history`: Bounded recall buffer of previously entered lines
//! - `line_reader`: Line editing over raw mode, with a buffered fallback

pub mod history;
pub mod line_reader;

use std::fs::File;
use std::io::{self, BufReader, Cursor, Empty, IsTerminal, Read, Stdin};
use std::os::fd::{AsFd, BorrowedFd};
use termion::raw::{IntoRawMode, RawTerminal};
use thiserror::Error;

/// Rows and columns assumed when the terminal cannot be measured.
pub const DEFAULT_SIZE: (u16, u16) = (24, 80);

/// Failures while reading from or controlling the terminal.
#[derive(Error, Debug)]
pub enum TerminalError {
    /// Raw mode could not be enabled, usually because input is not a terminal.
    #[error("terminal unavailable: {0}")]
    Unavailable(#[source] io::Error),

    /// The input stream ended, or the user pressed Ctrl+D on an empty line.
    #[error("end of input")]
    Eof,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// An input stream that may be backed by a terminal.
///
/// Streams without a file descriptor (in-memory buffers, test fixtures) keep
/// the default and are always read in buffered mode.
pub trait TerminalInput: Read {
    fn terminal_fd(&self) -> Option<BorrowedFd<'_>> {
        None
    }
}

impl TerminalInput for Stdin {
    fn terminal_fd(&self) -> Option<BorrowedFd<'_>> {
        Some(self.as_fd())
    }
}

impl TerminalInput for File {
    fn terminal_fd(&self) -> Option<BorrowedFd<'_>> {
        Some(self.as_fd())
    }
}

impl TerminalInput for &[u8] {}

impl<T: AsRef<[u8]>> TerminalInput for Cursor<T> {}

impl TerminalInput for Empty {}

impl<R: TerminalInput> TerminalInput for BufReader<R> {
    fn terminal_fd(&self) -> Option<BorrowedFd<'_>> {
        self.get_ref().terminal_fd()
    }
}

impl<R: TerminalInput + ?Sized> TerminalInput for &mut R {
    fn terminal_fd(&self) -> Option<BorrowedFd<'_>> {
        (**self).terminal_fd()
    }
}

/// Returns true if `input` is attached to a real terminal.
pub fn is_interactive<R: TerminalInput + ?Sized>(input: &R) -> bool {
    input.terminal_fd().is_some_and(|fd| fd.is_terminal())
}

/// Scoped raw mode on a terminal.
///
/// While the guard lives, the terminal delivers unbuffered, unechoed input
/// with signal generation and flow control disabled, so Ctrl+C arrives as a
/// plain byte. Dropping the guard restores the settings captured on entry.
pub struct RawMode {
    _terminal: RawTerminal<File>,
}

impl RawMode {
    /// Switches the terminal behind `fd` into raw mode.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::Unavailable`] if `fd` is not a terminal or its
    /// attributes cannot be changed.
    pub fn enable(fd: BorrowedFd<'_>) -> Result<Self, TerminalError> {
        if !fd.is_terminal() {
            return Err(TerminalError::Unavailable(io::Error::new(
                io::ErrorKind::Unsupported,
                "input is not a terminal",
            )));
        }
        let owned = fd.try_clone_to_owned().map_err(TerminalError::Unavailable)?;
        let terminal = File::from(owned)
            .into_raw_mode()
            .map_err(TerminalError::Unavailable)?;
        tracing::debug!("raw mode enabled");
        Ok(Self {
            _terminal: terminal,
        })
    }

    /// Restores the original terminal settings.
    pub fn disable(self) {}
}

impl Drop for RawMode {
    fn drop(&mut self) {
        tracing::debug!("raw mode disabled");
    }
}

/// Terminal dimensions as `(rows, cols)`, falling back to 24x80.
pub fn term_size() -> (u16, u16) {
    dimensions_or_default(termion::terminal_size().ok())
}

/// Converts a `(cols, rows)` measurement into `(rows, cols)`, substituting the
/// default when missing or degenerate.
pub(crate) fn dimensions_or_default(measured: Option<(u16, u16)>) -> (u16, u16) {
    match measured {
        Some((cols, rows)) if cols > 0 && rows > 0 => (rows, cols),
        _ => DEFAULT_SIZE,
    }
}

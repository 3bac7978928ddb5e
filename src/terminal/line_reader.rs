//! Line input with in-place editing.
//!
//! [`LineReader`] reads one line per call. On a terminal it switches to raw
//! mode for the duration of the read and runs [`edit_line`], which supports
//! cursor movement, word motion and history recall. On anything else (a pipe,
//! a file, an in-memory buffer) it reads plain newline-terminated lines.
//!
//! Both modes return the same text for the same keystrokes; only the echo
//! differs.
//!
//! # Example
//!
//! ```
//! use dtree::terminal::line_reader::LineReader;
//! use dtree::terminal::TerminalError;
//!
//! let input: &[u8] = b"add action Go\nlist";
//! let mut reader = LineReader::new(input, Vec::new());
//!
//! assert_eq!(reader.read_line("> ").unwrap(), "add action Go");
//! assert_eq!(reader.read_line("> ").unwrap(), "list");
//! assert!(matches!(reader.read_line("> "), Err(TerminalError::Eof)));
//! ```

use super::history::{InputHistory, Recall};
use super::{is_interactive, RawMode, TerminalError, TerminalInput};
use std::io::{self, BufRead, BufReader, Read, Write};
use termion::event::{parse_event, Event, Key};
use termion::{clear, cursor};

/// Lines remembered for recall unless configured otherwise.
pub const DEFAULT_HISTORY_SIZE: usize = 500;

/// Reads prompted lines from a terminal or a plain stream.
pub struct LineReader<R: TerminalInput, W: Write> {
    input: BufReader<R>,
    output: W,
    history: InputHistory,
    interactive: bool,
}

impl<R: TerminalInput, W: Write> LineReader<R, W> {
    /// Creates a reader, detecting whether `input` is a terminal.
    pub fn new(input: R, output: W) -> Self {
        Self::with_history_size(input, output, DEFAULT_HISTORY_SIZE)
    }

    pub fn with_history_size(input: R, output: W, history_size: usize) -> Self {
        let interactive = is_interactive(&input);
        tracing::debug!(interactive, "line reader created");
        Self {
            input: BufReader::new(input),
            output,
            history: InputHistory::new(history_size),
            interactive,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn history(&self) -> &InputHistory {
        &self.history
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Borrows the buffered input and the output at the same time, so another
    /// component (the browser) can read keys from the same stream.
    pub fn split_mut(&mut self) -> (&mut BufReader<R>, &mut W) {
        (&mut self.input, &mut self.output)
    }

    /// Shows `prompt` and reads one line, without its line terminator.
    ///
    /// # Errors
    ///
    /// - [`TerminalError::Eof`] when the input is exhausted, or on Ctrl+D at an
    ///   empty interactive line
    /// - [`TerminalError::Io`] if reading or writing fails
    ///
    /// If raw mode cannot be enabled the reader falls back to buffered mode
    /// for the rest of its life.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, TerminalError> {
        if self.interactive {
            match self.read_line_raw(prompt) {
                Err(TerminalError::Unavailable(e)) => {
                    tracing::warn!("raw mode unavailable, using buffered input: {}", e);
                    self.interactive = false;
                }
                result => return result,
            }
        }
        self.read_line_buffered(prompt)
    }

    fn read_line_raw(&mut self, prompt: &str) -> Result<String, TerminalError> {
        let fd = self.input.get_ref().terminal_fd().ok_or_else(|| {
            TerminalError::Unavailable(io::Error::new(
                io::ErrorKind::Unsupported,
                "input has no file descriptor",
            ))
        })?;
        let _raw = RawMode::enable(fd)?;
        let mut bytes = (&mut self.input).bytes();
        edit_line(&mut bytes, &mut self.output, &mut self.history, prompt)
    }

    /// A final line without a trailing newline is still returned; the next
    /// call then reports EOF.
    fn read_line_buffered(&mut self, prompt: &str) -> Result<String, TerminalError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(TerminalError::Eof);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

/// The line being edited: characters plus a cursor between them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Replaces the contents, leaving the cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
    }

    pub fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.chars.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Ctrl+K: drop everything from the cursor on.
    pub fn kill_to_end(&mut self) {
        self.chars.truncate(self.cursor);
    }

    /// Ctrl+U: drop everything before the cursor.
    pub fn kill_to_start(&mut self) {
        self.chars.drain(..self.cursor);
        self.cursor = 0;
    }

    fn word_start_left(&self) -> usize {
        let mut pos = self.cursor;
        while pos > 0 && self.chars[pos - 1] == ' ' {
            pos -= 1;
        }
        while pos > 0 && self.chars[pos - 1] != ' ' {
            pos -= 1;
        }
        pos
    }

    /// Skips spaces left of the cursor, then the word before them.
    pub fn word_left(&mut self) {
        self.cursor = self.word_start_left();
    }

    /// Skips the word under the cursor, then the spaces after it.
    pub fn word_right(&mut self) {
        let len = self.chars.len();
        while self.cursor < len && self.chars[self.cursor] != ' ' {
            self.cursor += 1;
        }
        while self.cursor < len && self.chars[self.cursor] == ' ' {
            self.cursor += 1;
        }
    }

    pub fn delete_word_left(&mut self) {
        let start = self.word_start_left();
        self.chars.drain(start..self.cursor);
        self.cursor = start;
    }
}

/// Runs the interactive editing loop over an input stream already in raw mode.
///
/// Submitted lines are added to `history`. Unrecognized escape sequences are
/// ignored.
///
/// # Errors
///
/// [`TerminalError::Eof`] when the stream ends or on Ctrl+D at an empty line;
/// [`TerminalError::Io`] on read or write failure.
pub fn edit_line<I, W>(
    bytes: &mut I,
    out: &mut W,
    history: &mut InputHistory,
    prompt: &str,
) -> Result<String, TerminalError>
where
    I: Iterator<Item = io::Result<u8>>,
    W: Write,
{
    history.reset();
    let mut line = LineBuffer::default();
    // The line being typed before history recall started.
    let mut stash: Option<String> = None;

    write!(out, "{}", prompt)?;
    out.flush()?;

    loop {
        let byte = match bytes.next() {
            Some(byte) => byte?,
            None => return Err(TerminalError::Eof),
        };
        let key = match parse_event(byte, &mut *bytes) {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(e) => {
                tracing::trace!("ignoring unrecognized input: {}", e);
                continue;
            }
        };

        match key {
            Key::Char('\n') => {
                write!(out, "\r\n")?;
                out.flush()?;
                let text = line.text();
                history.add(&text);
                return Ok(text);
            }
            Key::Char(c) if !c.is_control() => line.insert(c),
            Key::Backspace | Key::Ctrl('h') => line.backspace(),
            Key::Ctrl('c') => line.clear(),
            Key::Ctrl('d') => {
                if line.is_empty() {
                    write!(out, "\r\n")?;
                    out.flush()?;
                    return Err(TerminalError::Eof);
                }
                continue;
            }
            Key::Ctrl('a') => line.move_home(),
            Key::Ctrl('e') => line.move_end(),
            Key::Ctrl('k') => line.kill_to_end(),
            Key::Ctrl('u') => line.kill_to_start(),
            Key::Up => match history.prev() {
                Some(entry) => {
                    if stash.is_none() {
                        stash = Some(line.text());
                    }
                    line.set(entry);
                }
                None => continue,
            },
            Key::Down => match history.next() {
                Some(Recall::Entry(entry)) => line.set(entry),
                Some(Recall::Fresh) => match stash.take() {
                    Some(pending) => line.set(&pending),
                    None => continue,
                },
                None => continue,
            },
            Key::Left => line.move_left(),
            Key::Right => line.move_right(),
            Key::AltLeft | Key::Alt('b') => line.word_left(),
            Key::AltRight | Key::Alt('f') => line.word_right(),
            Key::Alt('\x7f') | Key::Alt('\x08') => line.delete_word_left(),
            _ => continue,
        }

        redraw(out, prompt, &line)?;
    }
}

fn redraw<W: Write>(out: &mut W, prompt: &str, line: &LineBuffer) -> io::Result<()> {
    write!(out, "\r{}{}{}", clear::CurrentLine, prompt, line.text())?;
    let behind = line.len() - line.cursor();
    if behind > 0 {
        write!(out, "{}", cursor::Left(behind as u16))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(input: &[u8], history: &mut InputHistory) -> Result<String, TerminalError> {
        let mut bytes = input.bytes();
        let mut out = Vec::new();
        edit_line(&mut bytes, &mut out, history, "> ")
    }

    fn buffer(text: &str, cursor: usize) -> LineBuffer {
        let mut line = LineBuffer::default();
        line.set(text);
        line.cursor = cursor;
        line
    }

    #[test]
    fn test_word_motion() {
        let mut line = buffer("add  decision Ready", 19);
        line.word_left();
        assert_eq!(line.cursor(), 14);
        line.word_left();
        assert_eq!(line.cursor(), 5);
        line.word_left();
        assert_eq!(line.cursor(), 0);
        line.word_left();
        assert_eq!(line.cursor(), 0);

        line.word_right();
        assert_eq!(line.cursor(), 5);
        line.word_right();
        assert_eq!(line.cursor(), 14);
        line.word_right();
        assert_eq!(line.cursor(), 19);
    }

    #[test]
    fn test_delete_word_left() {
        let mut line = buffer("edit n1 label ", 14);
        line.delete_word_left();
        assert_eq!(line.text(), "edit n1 ");
        assert_eq!(line.cursor(), 8);
    }

    #[test]
    fn test_kill_commands() {
        let mut line = buffer("hello world", 5);
        line.kill_to_end();
        assert_eq!(line.text(), "hello");

        let mut line = buffer("hello world", 6);
        line.kill_to_start();
        assert_eq!(line.text(), "world");
        assert_eq!(line.cursor(), 0);
    }

    #[test]
    fn test_insert_mid_line() {
        let mut h = InputHistory::new(10);
        // "ac", Left, "b"
        assert_eq!(edit(b"ac\x1b[Db\r", &mut h).unwrap(), "abc");
    }

    #[test]
    fn test_backspace_both_codes() {
        let mut h = InputHistory::new(10);
        assert_eq!(edit(b"abc\x7f\x08d\n", &mut h).unwrap(), "ad");
    }

    #[test]
    fn test_ctrl_c_clears_line() {
        let mut h = InputHistory::new(10);
        assert_eq!(edit(b"oops\x03ok\r", &mut h).unwrap(), "ok");
    }

    #[test]
    fn test_ctrl_d_on_empty_line_is_eof() {
        let mut h = InputHistory::new(10);
        assert!(matches!(edit(b"\x04", &mut h), Err(TerminalError::Eof)));
        assert_eq!(edit(b"x\x04y\r", &mut h).unwrap(), "xy");
    }

    #[test]
    fn test_end_of_stream_is_eof() {
        let mut h = InputHistory::new(10);
        assert!(matches!(edit(b"partial", &mut h), Err(TerminalError::Eof)));
    }

    #[test]
    fn test_home_end_and_unknown_sequences() {
        let mut h = InputHistory::new(10);
        // Ctrl+A, insert "x", Ctrl+E, unknown CSI, insert "y"
        assert_eq!(edit(b"ab\x01x\x05\x1b[99~y\r", &mut h).unwrap(), "xaby");
    }

    #[test]
    fn test_history_recall_and_stash() {
        let mut h = InputHistory::new(10);
        h.add("first");
        h.add("second");

        // Up, Up, Enter
        assert_eq!(edit(b"\x1b[A\x1b[A\r", &mut h).unwrap(), "first");
        // Typing, Up, Down restores the typed text.
        assert_eq!(edit(b"draft\x1b[A\x1b[B\r", &mut h).unwrap(), "draft");
        assert_eq!(h.entries().last(), Some("draft"));
    }

    #[test]
    fn test_alt_word_keys() {
        let mut h = InputHistory::new(10);
        // Alt+B moves before "two", then insert "X".
        assert_eq!(edit(b"one two\x1bbX\r", &mut h).unwrap(), "one Xtwo");
        // Alt+Backspace deletes "two".
        assert_eq!(edit(b"one two\x1b\x7f\r", &mut h).unwrap(), "one ");
    }

    #[test]
    fn test_submitted_lines_enter_history() {
        let mut h = InputHistory::new(10);
        edit(b"list\r", &mut h).unwrap();
        edit(b"list\r", &mut h).unwrap();
        edit(b"\r", &mut h).unwrap();
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_redraw_moves_cursor_back() {
        let mut out = Vec::new();
        let line = buffer("abc", 1);
        redraw(&mut out, "> ", &line).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('\r'));
        assert!(text.contains("> abc"));
        assert!(text.ends_with(&format!("{}", cursor::Left(2))));
    }

    #[test]
    fn test_buffered_mode_strips_crlf() {
        let input: &[u8] = b"one\r\ntwo\n";
        let mut reader = LineReader::new(input, Vec::new());
        assert!(!reader.is_interactive());
        assert_eq!(reader.read_line("> ").unwrap(), "one");
        assert_eq!(reader.read_line("> ").unwrap(), "two");
        assert!(matches!(reader.read_line("> "), Err(TerminalError::Eof)));
    }

    #[test]
    fn test_buffered_mode_writes_prompt() {
        let input: &[u8] = b"cmd\n";
        let mut reader = LineReader::new(input, Vec::new());
        reader.read_line("dt> ").unwrap();
        assert_eq!(reader.output().as_slice(), b"dt> ");
    }

    #[test]
    fn test_blank_line_is_not_eof() {
        let input: &[u8] = b"\n";
        let mut reader = LineReader::new(input, Vec::new());
        assert_eq!(reader.read_line("> ").unwrap(), "");
        assert!(matches!(reader.read_line("> "), Err(TerminalError::Eof)));
    }
}

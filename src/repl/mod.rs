//! Line-oriented command interface.
//!
//! The REPL reads one line at a time through a [`LineReader`], tokenizes it
//! and hands the command to a handler. Command failures are printed and the
//! loop carries on; end of input ends the session.
//!
//! # Modules
//!
//! - `commands`: One handler per command, plus the help text
//! - `parser`: Quote-aware tokenizer
//!
//! # Example
//!
//! ```
//! use dtree::config::Config;
//! use dtree::document::tree::DecisionTree;
//! use dtree::editor::session::Session;
//! use dtree::repl::Repl;
//! use dtree::terminal::line_reader::LineReader;
//! use dtree::theme::Theme;
//!
//! let input: &[u8] = b"add action Go\nlist\n";
//! let mut reader = LineReader::new(input, Vec::new());
//! let mut repl = Repl::new(Session::new(DecisionTree::new("t")), Config::default(), Theme::default());
//! repl.run(&mut reader).unwrap();
//!
//! let out = String::from_utf8(reader.output().clone()).unwrap();
//! assert!(out.contains("Added node n1\n"));
//! assert!(out.contains("n1 [action] \"Go\"\n"));
//! ```

pub mod commands;
pub mod parser;

use crate::config::Config;
use crate::editor::session::Session;
use crate::terminal::line_reader::LineReader;
use crate::terminal::{TerminalError, TerminalInput};
use crate::theme::Theme;
use crate::ui;
use anyhow::Result;
use commands::Flow;
use std::io::Write;

pub const BANNER: &str = "Decision Tree CLI (type 'help' for commands)";

/// The REPL and the session it edits.
pub struct Repl {
    session: Session,
    config: Config,
    theme: Theme,
}

impl Repl {
    pub fn new(session: Session, config: Config, theme: Theme) -> Self {
        Self {
            session,
            config,
            theme,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Prints the banner and processes lines until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the output fails. Read failures
    /// end the session like end of input does.
    pub fn run<R, W>(&mut self, reader: &mut LineReader<R, W>) -> Result<()>
    where
        R: TerminalInput,
        W: Write,
    {
        writeln!(reader.output(), "{}", BANNER)?;
        loop {
            let line = match reader.read_line(&self.config.prompt) {
                Ok(line) => line,
                Err(TerminalError::Eof) => {
                    writeln!(reader.output(), "Goodbye!")?;
                    return Ok(());
                }
                Err(err) => {
                    tracing::warn!(%err, "input failed, ending session");
                    writeln!(reader.output(), "Goodbye!")?;
                    return Ok(());
                }
            };
            let Some(cmd) = parser::parse(&line) else {
                continue;
            };
            tracing::debug!(command = %cmd.name, args = cmd.args.len(), "running command");

            match commands::execute(&mut self.session, &self.config, &cmd, reader.output())? {
                Flow::Continue => {}
                Flow::Quit => return Ok(()),
                Flow::Browse => self.browse(reader)?,
            }
        }
    }

    /// Runs the full-screen browser on the reader's input and output.
    ///
    /// A browser that cannot start (for example on piped input) is reported
    /// on the output and leaves the session untouched.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing the report fails.
    pub fn browse<R, W>(&mut self, reader: &mut LineReader<R, W>) -> Result<()>
    where
        R: TerminalInput,
        W: Write,
    {
        let (input, output) = reader.split_mut();
        if let Err(err) = ui::browse(&mut self.session, self.theme.clone(), input, &mut *output) {
            tracing::warn!("browser failed: {:#}", err);
            writeln!(output, "Error: {:#}", err)?;
        }
        Ok(())
    }
}

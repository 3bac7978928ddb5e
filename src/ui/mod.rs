//! Full-screen interactive tree browser.
//!
//! The browser shows the tree as one row per reachable node, with a status
//! line and a message line underneath:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ rows (scrolls with cursor)   │
//! ├──────────────────────────────┤
//! │ status line                  │
//! │ message / prompt             │
//! └──────────────────────────────┘
//! ```
//!
//! Keys are read one at a time from any `Iterator<Item = io::Result<Key>>`,
//! so the browser runs the same over a terminal or a test key list. Every
//! edit goes through the session's history and can be undone with `u`.
//!
//! # Modules
//!
//! - `edit_prompt`: One-line text prompt
//! - `message_area`: Outcome of the last operation
//! - `status_line`: Key hints or connect-mode source
//! - `template_picker`: Popup listing the template catalog
//! - `tree_view`: The rows themselves

pub mod edit_prompt;
pub mod message_area;
pub mod status_line;
pub mod template_picker;
pub mod tree_view;

use std::io::{self, Write};

use anyhow::Result;
use ratatui::backend::{Backend, TermionBackend};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;
use termion::cursor::HideCursor;
use termion::event::Key;
use termion::input::TermRead;
use termion::screen::IntoAlternateScreen;

use crate::document::error::TreeError;
use crate::document::node::NodeType;
use crate::editor::session::Session;
use crate::editor::templates::{self, TreeTemplate};
use crate::editor::undo::{Command, Outcome};
use crate::input::{map_key, BrowseMode, BrowserAction};
use crate::render::ascii::{flatten, Row};
use crate::terminal::{dimensions_or_default, term_size, RawMode, TerminalInput};
use crate::theme::Theme;
use edit_prompt::Prompt;
use message_area::Message;

enum Flow {
    Continue,
    Quit,
}

/// Browser state over a borrowed session.
///
/// # Example
///
/// ```
/// use dtree::document::tree::DecisionTree;
/// use dtree::editor::session::Session;
/// use dtree::theme::Theme;
/// use dtree::ui::Browser;
/// use ratatui::backend::TestBackend;
/// use ratatui::Terminal;
/// use termion::event::Key;
///
/// let mut session = Session::new(DecisionTree::new("demo"));
/// let terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
/// let mut browser = Browser::new(&mut session, terminal, Theme::default()).unwrap();
///
/// let mut keys = "ainit".chars().map(Key::Char).chain([Key::Char('\n')]).map(Ok);
/// browser.run(&mut keys).unwrap();
/// assert_eq!(browser.message(), Some("Error: unknown node type: \"init\""));
/// ```
pub struct Browser<'s, B: Backend> {
    session: &'s mut Session,
    terminal: Terminal<B>,
    theme: Theme,
    rows: Vec<Row>,
    cursor: usize,
    offset: usize,
    height: usize,
    width: usize,
    mode: BrowseMode,
    connect_from: Option<String>,
    message: Option<Message>,
    prompt: Option<Prompt>,
    picker: Option<usize>,
}

impl<'s, B: Backend> Browser<'s, B> {
    /// Creates a browser positioned on the first row.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be read.
    pub fn new(session: &'s mut Session, terminal: Terminal<B>, theme: Theme) -> Result<Self> {
        let mut browser = Self {
            session,
            terminal,
            theme,
            rows: Vec::new(),
            cursor: 0,
            offset: 0,
            height: 1,
            width: 0,
            mode: BrowseMode::Normal,
            connect_from: None,
            message: None,
            prompt: None,
            picker: None,
        };
        browser.refresh()?;
        Ok(browser)
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Index of the selected row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the first visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Rows available for the tree view.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn mode(&self) -> BrowseMode {
        self.mode
    }

    /// Source node while in connect mode.
    pub fn connect_from(&self) -> Option<&str> {
        self.connect_from.as_deref()
    }

    /// Text of the message shown on the last render.
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    /// ID of the node under the cursor.
    pub fn selected(&self) -> Option<&str> {
        self.rows.get(self.cursor).map(|row| row.node_id.as_str())
    }

    /// Draws, reads a key, handles it, and repeats until quit or end of input.
    ///
    /// A read error ends the loop the same way as end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if drawing to the terminal fails.
    pub fn run<I>(&mut self, keys: &mut I) -> Result<()>
    where
        I: Iterator<Item = io::Result<Key>>,
    {
        loop {
            self.draw()?;
            let key = match keys.next() {
                Some(Ok(key)) => key,
                Some(Err(err)) => {
                    tracing::warn!(%err, "input error, leaving browser");
                    return Ok(());
                }
                None => return Ok(()),
            };
            self.message = None;
            if let Flow::Quit = self.dispatch(key, keys)? {
                return Ok(());
            }
        }
    }

    fn dispatch<I>(&mut self, key: Key, keys: &mut I) -> Result<Flow>
    where
        I: Iterator<Item = io::Result<Key>>,
    {
        match map_key(key, self.mode) {
            BrowserAction::Quit => return Ok(Flow::Quit),
            BrowserAction::MoveUp => self.move_up(),
            BrowserAction::MoveDown => self.move_down(),
            BrowserAction::EditLabel => self.edit_label(keys)?,
            BrowserAction::CycleType => self.cycle_type()?,
            BrowserAction::SetRoot => self.set_root()?,
            BrowserAction::Delete => self.delete()?,
            BrowserAction::AddChild => self.add_child(keys)?,
            BrowserAction::Copy => self.copy(),
            BrowserAction::Paste => self.paste()?,
            BrowserAction::Connect => self.start_connect(),
            BrowserAction::ConfirmConnect => self.confirm_connect(keys)?,
            BrowserAction::CancelConnect => {
                self.mode = BrowseMode::Normal;
                self.connect_from = None;
                self.info("Connect cancelled");
            }
            BrowserAction::Disconnect => self.disconnect()?,
            BrowserAction::Init => self.init(keys)?,
            BrowserAction::Undo => {
                let result = self.session.undo().map(|_| "Undone".to_string());
                self.report(result)?;
            }
            BrowserAction::Redo => {
                let result = self.session.redo().map(|_| "Redone".to_string());
                self.report(result)?;
            }
            BrowserAction::Unknown => {}
        }
        Ok(Flow::Continue)
    }

    fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.scroll_to_cursor();
        }
    }

    fn move_down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
            self.scroll_to_cursor();
        }
    }

    fn edit_label<I>(&mut self, keys: &mut I) -> Result<()>
    where
        I: Iterator<Item = io::Result<Key>>,
    {
        let Some(id) = self.selected().map(str::to_string) else {
            return Ok(());
        };
        let current = self
            .session
            .tree()
            .get_node(&id)
            .map(|node| node.label.clone())
            .unwrap_or_default();

        let Some(label) = self.read_text(keys, &format!("Label for {}: ", id), &current)? else {
            self.info("Edit cancelled");
            return Ok(());
        };
        let result = self
            .session
            .execute(Command::edit_label(&id, label))
            .map(|_| format!("Updated {} label", id));
        self.report(result)
    }

    fn cycle_type(&mut self) -> Result<()> {
        let Some(id) = self.selected().map(str::to_string) else {
            return Ok(());
        };
        let Some(next) = self.session.tree().get_node(&id).map(|n| n.node_type.next()) else {
            return Ok(());
        };
        let result = self
            .session
            .execute(Command::edit_type(&id, next))
            .map(|_| format!("{} type → {}", id, next));
        self.report(result)
    }

    fn set_root(&mut self) -> Result<()> {
        let Some(id) = self.selected().map(str::to_string) else {
            return Ok(());
        };
        let result = self
            .session
            .execute(Command::set_root(&id))
            .map(|_| format!("Root set to {}", id));
        self.report(result)
    }

    fn delete(&mut self) -> Result<()> {
        let Some(id) = self.selected().map(str::to_string) else {
            return Ok(());
        };
        let result = self
            .session
            .execute(Command::remove_node(&id))
            .map(|_| format!("Deleted {}", id));
        self.report(result)
    }

    fn add_child<I>(&mut self, keys: &mut I) -> Result<()>
    where
        I: Iterator<Item = io::Result<Key>>,
    {
        let Some(parent) = self.selected().map(str::to_string) else {
            return self.add_root(keys);
        };

        let Some(node_type) = self.read_node_type(keys, "Type (decision/action/startend/io): ")?
        else {
            return Ok(());
        };
        let Some(label) = self.read_text(keys, "Label: ", "")? else {
            self.info("Add cancelled");
            return Ok(());
        };
        let Some(edge_label) = self.read_text(keys, "Edge label (optional): ", "")? else {
            self.info("Add cancelled");
            return Ok(());
        };

        let child = match self.session.execute(Command::add_node(node_type, label)) {
            Ok(Outcome::Added(id)) => id,
            Ok(_) => return Ok(()),
            Err(err) => {
                self.error(format!("Error: {}", err));
                return Ok(());
            }
        };
        match self
            .session
            .execute(Command::connect(&parent, &child, edge_label.trim()))
        {
            Ok(_) => self.info(format!("Added {} as child of {}", child, parent)),
            Err(err) => self.error(format!("Error connecting: {}", err)),
        }
        self.refresh()?;
        self.select(&child);
        Ok(())
    }

    /// Creates a root when there is no row to hang a child from.
    fn add_root<I>(&mut self, keys: &mut I) -> Result<()>
    where
        I: Iterator<Item = io::Result<Key>>,
    {
        // Templates replace the whole tree, so detached nodes rule them out.
        let offer_template = self.session.tree().is_empty();
        let label = if offer_template {
            "Root type (decision/action/startend/io, or 'template'): "
        } else {
            "Root type (decision/action/startend/io): "
        };
        let Some(answer) = self.read_text(keys, label, "")? else {
            self.info("Add cancelled");
            return Ok(());
        };
        if offer_template && answer.trim().eq_ignore_ascii_case("template") {
            return self.init(keys);
        }
        let node_type = match answer.trim().parse::<NodeType>() {
            Ok(node_type) => node_type,
            Err(err) => {
                self.error(format!("Error: {}", err));
                return Ok(());
            }
        };
        let Some(label) = self.read_text(keys, "Label: ", "")? else {
            self.info("Add cancelled");
            return Ok(());
        };

        let id = match self.session.execute(Command::add_node(node_type, label)) {
            Ok(Outcome::Added(id)) => id,
            Ok(_) => return Ok(()),
            Err(err) => {
                self.error(format!("Error: {}", err));
                return Ok(());
            }
        };
        let result = self
            .session
            .execute(Command::set_root(&id))
            .map(|_| format!("Created root node {}", id));
        self.report(result)?;
        self.select(&id);
        Ok(())
    }

    fn copy(&mut self) {
        let Some(id) = self.selected().map(str::to_string) else {
            return;
        };
        match self.session.copy(&id) {
            Ok(count) => self.info(format!("Copied subtree from {} ({} nodes)", id, count)),
            Err(err) => self.error(format!("Error: {}", err)),
        }
    }

    fn paste(&mut self) -> Result<()> {
        let (new_root, count) = match self.session.paste() {
            Ok(Some(pasted)) => pasted,
            Ok(None) => {
                self.info("Clipboard is empty");
                return Ok(());
            }
            Err(err) => {
                self.error(format!("Error: {}", err));
                return Ok(());
            }
        };

        match self.selected().map(str::to_string) {
            Some(parent) => match self.session.execute(Command::connect(&parent, &new_root, "")) {
                Ok(_) => self.info(format!("Pasted {} nodes under {}", count, parent)),
                Err(err) => self.error(format!("Pasted but could not connect: {}", err)),
            },
            None => self.info(format!("Pasted {} nodes", count)),
        }
        self.refresh()?;
        self.select(&new_root);
        Ok(())
    }

    fn start_connect(&mut self) {
        if let Some(id) = self.selected().map(str::to_string) {
            self.connect_from = Some(id);
            self.mode = BrowseMode::Connect;
        }
    }

    fn confirm_connect<I>(&mut self, keys: &mut I) -> Result<()>
    where
        I: Iterator<Item = io::Result<Key>>,
    {
        self.mode = BrowseMode::Normal;
        let Some(from) = self.connect_from.take() else {
            return Ok(());
        };
        let Some(to) = self.selected().map(str::to_string) else {
            return Ok(());
        };
        if from == to {
            self.error("Cannot connect node to itself");
            return Ok(());
        }

        let Some(label) = self.read_text(keys, "Edge label (optional): ", "")? else {
            self.info("Connect cancelled");
            return Ok(());
        };
        let result = self
            .session
            .execute(Command::connect(&from, &to, label.trim()))
            .map(|_| format!("Connected {} → {}", from, to));
        self.report(result)
    }

    fn disconnect(&mut self) -> Result<()> {
        let Some(id) = self.selected().map(str::to_string) else {
            return Ok(());
        };
        let Some(parent) = self.session.tree().parent(&id).map(|e| e.from.clone()) else {
            self.error(format!("{} has no parent edge", id));
            return Ok(());
        };
        let result = self
            .session
            .execute(Command::disconnect(&parent, &id))
            .map(|_| format!("Disconnected {} from {}", id, parent));
        self.report(result)
    }

    fn init<I>(&mut self, keys: &mut I) -> Result<()>
    where
        I: Iterator<Item = io::Result<Key>>,
    {
        if !self.session.tree().is_empty() {
            self.error("Init only works on an empty tree");
            return Ok(());
        }
        let Some(template) = self.pick_template(keys)? else {
            self.info("Init cancelled");
            return Ok(());
        };
        match template.instantiate() {
            Ok(tree) => {
                let count = tree.node_count();
                self.session.replace_tree(tree);
                self.cursor = 0;
                self.offset = 0;
                self.info(format!(
                    "Initialized from \"{}\" ({} nodes)",
                    template.name, count
                ));
                self.refresh()?;
            }
            Err(err) => self.error(format!("Error: {}", err)),
        }
        Ok(())
    }

    /// Shows the template picker until a template is chosen or the picker is dismissed.
    fn pick_template<I>(&mut self, keys: &mut I) -> Result<Option<&'static TreeTemplate>>
    where
        I: Iterator<Item = io::Result<Key>>,
    {
        let catalog = templates::all();
        if catalog.is_empty() {
            return Ok(None);
        }
        self.picker = Some(0);

        let choice = loop {
            self.draw()?;
            let Some(Ok(key)) = keys.next() else {
                break None;
            };
            self.message = None;
            let selected = self.picker.unwrap_or(0);
            match key {
                Key::Up | Key::Char('k') => self.picker = Some(selected.saturating_sub(1)),
                Key::Down | Key::Char('j') => {
                    self.picker = Some((selected + 1).min(catalog.len() - 1))
                }
                Key::Char('\n') => break catalog.get(selected),
                Key::Esc | Key::Char('q') => break None,
                Key::Char(c) if c.is_ascii_digit() => {
                    let picked = c
                        .to_digit(10)
                        .and_then(|d| (d as usize).checked_sub(1))
                        .and_then(|idx| catalog.get(idx));
                    match picked {
                        Some(template) => break Some(template),
                        None => self.error("Invalid choice"),
                    }
                }
                _ => {}
            }
        };

        self.picker = None;
        Ok(choice)
    }

    /// Asks for a node type, reporting a cancel or an unknown type itself.
    fn read_node_type<I>(&mut self, keys: &mut I, label: &str) -> Result<Option<NodeType>>
    where
        I: Iterator<Item = io::Result<Key>>,
    {
        let Some(answer) = self.read_text(keys, label, "")? else {
            self.info("Add cancelled");
            return Ok(None);
        };
        match answer.trim().parse::<NodeType>() {
            Ok(node_type) => Ok(Some(node_type)),
            Err(err) => {
                self.error(format!("Error: {}", err));
                Ok(None)
            }
        }
    }

    /// Reads one line of text in the message area.
    ///
    /// Enter submits, Esc or end of input cancels, Backspace deletes the last
    /// character and Ctrl+U clears the line.
    fn read_text<I>(&mut self, keys: &mut I, label: &str, initial: &str) -> Result<Option<String>>
    where
        I: Iterator<Item = io::Result<Key>>,
    {
        self.prompt = Some(Prompt::new(label, initial));

        let answer = loop {
            self.draw()?;
            let Some(Ok(key)) = keys.next() else {
                break None;
            };
            let Some(prompt) = self.prompt.as_mut() else {
                break None;
            };
            match key {
                Key::Char('\n') => break Some(prompt.buffer.clone()),
                Key::Esc => break None,
                Key::Backspace => {
                    prompt.buffer.pop();
                }
                Key::Ctrl('u') => prompt.buffer.clear(),
                Key::Char(c) if !c.is_control() => prompt.buffer.push(c),
                _ => {}
            }
        };

        self.prompt = None;
        Ok(answer)
    }

    fn info(&mut self, text: impl Into<String>) {
        self.message = Some(Message::info(text));
    }

    fn error(&mut self, text: impl Into<String>) {
        self.message = Some(Message::error(text));
    }

    /// Shows the outcome of a history operation and refreshes after a success.
    fn report(&mut self, result: Result<String, TreeError>) -> Result<()> {
        match result {
            Ok(text) => {
                self.info(text);
                self.refresh()
            }
            Err(err) => {
                self.error(format!("Error: {}", err));
                Ok(())
            }
        }
    }

    /// Rebuilds rows from the tree, clamps the cursor and re-derives the viewport.
    fn refresh(&mut self) -> Result<()> {
        self.rows = flatten(self.session.tree());
        if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len().saturating_sub(1);
        }
        self.sync_size()
    }

    fn select(&mut self, id: &str) {
        if let Some(pos) = self.rows.iter().position(|row| row.node_id == id) {
            self.cursor = pos;
            self.scroll_to_cursor();
        }
    }

    /// Picks up the current terminal size; two lines go to status and message.
    ///
    /// A zero-sized terminal is treated as 24x80.
    fn sync_size(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        let (rows, cols) = dimensions_or_default(Some((size.width, size.height)));
        self.width = cols as usize;
        self.height = (rows as usize).saturating_sub(2).max(1);
        self.scroll_to_cursor();
        Ok(())
    }

    fn scroll_to_cursor(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        }
        if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
    }

    fn draw(&mut self) -> Result<()> {
        self.sync_size()?;

        let colors = &self.theme.colors;
        let tree = self.session.tree();
        let rows = &self.rows;
        let (cursor, offset, mode, picker) = (self.cursor, self.offset, self.mode, self.picker);
        let connect_from = self.connect_from.as_deref();
        let message = self.message.as_ref();
        let prompt = self.prompt.as_ref();

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .split(f.area());

            tree_view::render_tree_view(
                f,
                chunks[0],
                tree,
                rows,
                cursor,
                offset,
                connect_from,
                colors,
            );
            status_line::render_status_line(
                f,
                chunks[1],
                mode,
                connect_from,
                (&tree.name, cursor, rows.len()),
                colors,
            );
            match prompt {
                Some(prompt) => edit_prompt::render_edit_prompt(f, chunks[2], prompt, colors),
                None => message_area::render_message_area(f, chunks[2], message, colors),
            }
            if let Some(selected) = picker {
                template_picker::render_template_picker(f, templates::all(), selected, colors);
            }
        })?;

        Ok(())
    }
}

/// Runs the browser on a real terminal.
///
/// Raw mode is taken on `input`, and the browser draws on the alternate
/// screen of `output` with the cursor hidden. Both are restored on return,
/// whether the browser exits normally or with an error.
///
/// # Errors
///
/// Returns an error if `input` is not an interactive terminal or the screen
/// cannot be set up or drawn.
pub fn browse<R, W>(session: &mut Session, theme: Theme, input: &mut R, output: W) -> Result<()>
where
    R: TerminalInput,
    W: Write,
{
    let Some(fd) = input.terminal_fd() else {
        anyhow::bail!("the browser needs an interactive terminal");
    };
    let raw = RawMode::enable(fd)?;
    let (rows, cols) = term_size();
    tracing::debug!(rows, cols, "entering browser");

    let screen = HideCursor::from(output.into_alternate_screen()?);
    let terminal = Terminal::new(TermionBackend::new(screen))?;
    let mut browser = Browser::new(session, terminal, theme)?;
    tracing::debug!(rows = browser.rows().len(), "browser started");

    let mut keys = input.keys();
    let result = browser.run(&mut keys);

    drop(browser);
    raw.disable();
    result
}

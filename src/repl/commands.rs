//! REPL command handlers.
//!
//! Each handler writes exactly one outcome (or a block of listing output) to
//! the REPL output. Failed operations are reported and leave the session as
//! it was; only a failure to write the output is returned as an error.

use super::parser::ParsedCommand;
use crate::config::Config;
use crate::document::node::NodeType;
use crate::editor::session::Session;
use crate::editor::templates;
use crate::editor::undo::{Command, Outcome};
use crate::file::loader::load_tree;
use crate::file::saver::save_tree;
use crate::render::{ascii, renderer_for};
use std::fmt::Display;
use std::io::{self, Write};

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
    /// Hand the terminal to the full-screen browser.
    Browse,
}

pub const HELP: &str = "\
Commands:
  add <type> <label>              Add a node (types: decision, action, startend, io)
  connect <from> <to> [label]     Connect two nodes
  disconnect <from> <to>          Remove the edge between two nodes
  remove <id>                     Remove a node and its edges
  edit <id> label <text>          Change a node's label
  edit <id> type <type>           Change a node's type
  set-root <id>                   Set the root node
  list                            List all nodes
  preview                         Show the tree from the root
  render <dot|mermaid>            Print the tree as a diagram
  copy <id>                       Copy the subtree under a node
  paste                           Paste the copied subtree
  save <file>                     Save the tree as JSON (.gz to compress)
  load <file>                     Load a tree, replacing the current one
  init [template]                 Start from a template (lists them without a name)
  browse                          Open the interactive browser
  undo                            Undo the last change
  redo                            Redo the last undone change
  help                            Show this help
  quit, exit                      Leave";

const TYPES_HINT: &str = "Types: decision, action, startend, io";

/// Runs one parsed command against the session.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn execute<W: Write>(
    session: &mut Session,
    config: &Config,
    cmd: &ParsedCommand,
    out: &mut W,
) -> io::Result<Flow> {
    let args = cmd.args.as_slice();
    match cmd.name.as_str() {
        "add" => add(session, args, out)?,
        "connect" => connect(session, args, out)?,
        "disconnect" => disconnect(session, args, out)?,
        "remove" => remove(session, args, out)?,
        "edit" => edit(session, args, out)?,
        "set-root" => set_root(session, args, out)?,
        "list" => list(session, out)?,
        "preview" => writeln!(out, "{}", ascii::preview(session.tree()))?,
        "render" => render(session, args, out)?,
        "copy" => copy(session, args, out)?,
        "paste" => paste(session, out)?,
        "save" => save(session, config, args, out)?,
        "load" => load(session, args, out)?,
        "init" => init(session, args, out)?,
        "browse" => return Ok(Flow::Browse),
        "undo" => match session.undo() {
            Ok(description) => writeln!(out, "Undone: {}", description)?,
            Err(err) => error(out, err)?,
        },
        "redo" => match session.redo() {
            Ok(description) => writeln!(out, "Redone: {}", description)?,
            Err(err) => error(out, err)?,
        },
        "help" => writeln!(out, "{}", HELP)?,
        "quit" | "exit" => {
            writeln!(out, "Goodbye!")?;
            return Ok(Flow::Quit);
        }
        other => writeln!(out, "Unknown command: {} (type 'help' for commands)", other)?,
    }
    Ok(Flow::Continue)
}

fn error<W: Write>(out: &mut W, err: impl Display) -> io::Result<()> {
    writeln!(out, "Error: {}", err)
}

fn parse_type(token: &str) -> Result<NodeType, crate::document::error::TreeError> {
    token.to_lowercase().parse()
}

fn add<W: Write>(session: &mut Session, args: &[String], out: &mut W) -> io::Result<()> {
    if args.len() < 2 {
        writeln!(out, "Usage: add <type> <label>")?;
        return writeln!(out, "{}", TYPES_HINT);
    }
    let node_type = match parse_type(&args[0]) {
        Ok(node_type) => node_type,
        Err(err) => return error(out, err),
    };
    match session.execute(Command::add_node(node_type, args[1..].join(" "))) {
        Ok(Outcome::Added(id)) => writeln!(out, "Added node {}", id),
        Ok(_) => Ok(()),
        Err(err) => error(out, err),
    }
}

fn connect<W: Write>(session: &mut Session, args: &[String], out: &mut W) -> io::Result<()> {
    if args.len() < 2 {
        return writeln!(out, "Usage: connect <from> <to> [label]");
    }
    let (from, to) = (&args[0], &args[1]);
    let label = args[2..].join(" ");
    match session.execute(Command::connect(from, to, label)) {
        Ok(_) => writeln!(out, "Connected {} -> {}", from, to),
        Err(err) => error(out, err),
    }
}

fn disconnect<W: Write>(session: &mut Session, args: &[String], out: &mut W) -> io::Result<()> {
    if args.len() != 2 {
        return writeln!(out, "Usage: disconnect <from> <to>");
    }
    let (from, to) = (&args[0], &args[1]);
    match session.execute(Command::disconnect(from, to)) {
        Ok(_) => writeln!(out, "Disconnected {} -> {}", from, to),
        Err(err) => error(out, err),
    }
}

fn remove<W: Write>(session: &mut Session, args: &[String], out: &mut W) -> io::Result<()> {
    let [id] = args else {
        return writeln!(out, "Usage: remove <id>");
    };
    match session.execute(Command::remove_node(id)) {
        Ok(_) => writeln!(out, "Removed node {}", id),
        Err(err) => error(out, err),
    }
}

fn edit<W: Write>(session: &mut Session, args: &[String], out: &mut W) -> io::Result<()> {
    if args.len() < 3 {
        return writeln!(
            out,
            "Usage: edit <id> label <text> | edit <id> type <type>"
        );
    }
    let id = &args[0];
    let field = args[1].to_lowercase();
    let result = match field.as_str() {
        "label" => session.execute(Command::edit_label(id, args[2..].join(" "))),
        "type" => match parse_type(&args[2]) {
            Ok(node_type) => session.execute(Command::edit_type(id, node_type)),
            Err(err) => Err(err),
        },
        _ => {
            return writeln!(
                out,
                "Unknown field {:?} (use 'label' or 'type')",
                args[1]
            )
        }
    };
    match result {
        Ok(_) => writeln!(out, "Updated {} {}", id, field),
        Err(err) => error(out, err),
    }
}

fn set_root<W: Write>(session: &mut Session, args: &[String], out: &mut W) -> io::Result<()> {
    let [id] = args else {
        return writeln!(out, "Usage: set-root <id>");
    };
    match session.execute(Command::set_root(id)) {
        Ok(_) => writeln!(out, "Root set to {}", id),
        Err(err) => error(out, err),
    }
}

fn list<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let lines = session.tree().list_nodes();
    if lines.is_empty() {
        return writeln!(out, "(no nodes)");
    }
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn render<W: Write>(session: &Session, args: &[String], out: &mut W) -> io::Result<()> {
    let [format] = args else {
        return writeln!(out, "Usage: render <dot|mermaid>");
    };
    match renderer_for(format) {
        Some(renderer) => write!(out, "{}", renderer.render(session.tree())),
        None => writeln!(out, "Unknown format: {} (use 'dot' or 'mermaid')", format),
    }
}

fn copy<W: Write>(session: &mut Session, args: &[String], out: &mut W) -> io::Result<()> {
    let [id] = args else {
        return writeln!(out, "Usage: copy <id>");
    };
    match session.copy(id) {
        Ok(count) => writeln!(out, "Copied subtree from {} ({} nodes)", id, count),
        Err(err) => error(out, err),
    }
}

fn paste<W: Write>(session: &mut Session, out: &mut W) -> io::Result<()> {
    let Some(old_root) = session.clipboard().map(|c| c.root_id().to_string()) else {
        return writeln!(out, "Clipboard is empty");
    };
    match session.paste() {
        Ok(Some((new_root, count))) => writeln!(
            out,
            "Pasted {} nodes (root: {} -> {})",
            count, old_root, new_root
        ),
        Ok(None) => writeln!(out, "Clipboard is empty"),
        Err(err) => error(out, err),
    }
}

fn save<W: Write>(
    session: &Session,
    config: &Config,
    args: &[String],
    out: &mut W,
) -> io::Result<()> {
    let [path] = args else {
        return writeln!(out, "Usage: save <file>");
    };
    match save_tree(path, session.tree(), config) {
        Ok(()) => writeln!(out, "Saved to {}", path),
        Err(err) => writeln!(out, "Error: {:#}", err),
    }
}

fn load<W: Write>(session: &mut Session, args: &[String], out: &mut W) -> io::Result<()> {
    let [path] = args else {
        return writeln!(out, "Usage: load <file>");
    };
    match load_tree(path) {
        Ok(tree) => {
            let (name, count) = (tree.name.clone(), tree.node_count());
            session.replace_tree(tree);
            writeln!(out, "Loaded {:?} ({} nodes)", name, count)
        }
        Err(err) => {
            tracing::warn!(path = %path, "load failed: {:#}", err);
            writeln!(out, "Error: {:#}", err)
        }
    }
}

fn init<W: Write>(session: &mut Session, args: &[String], out: &mut W) -> io::Result<()> {
    let Some(name) = args.first() else {
        writeln!(out, "Available templates:")?;
        for template in templates::all() {
            writeln!(out, "  {:<16} {}", template.name, template.description)?;
        }
        return writeln!(out, "Usage: init <template>");
    };
    let Some(template) = templates::find(name) else {
        return writeln!(out, "Unknown template: {} (type 'init' to list)", name);
    };
    match template.instantiate() {
        Ok(tree) => {
            let count = tree.node_count();
            session.replace_tree(tree);
            writeln!(out, "Initialized from {:?} ({} nodes)", template.name, count)
        }
        Err(err) => error(out, err),
    }
}

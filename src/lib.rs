//! dtree - a terminal editor for decision trees.
//!
//! A decision tree is a set of typed, labeled nodes joined by labeled edges,
//! where every node has at most one parent and no edge may close a cycle.
//! Trees are edited through a line-oriented REPL or a full-screen browser;
//! every change is an undoable command.
//!
//! # Modules
//!
//! - `config`: Settings loaded from `~/.config/dtree/config.toml`
//! - `document`: Tree model, structural operations and errors
//! - `editor`: Undo/redo history, clipboard, session and template catalog
//! - `file`: JSON persistence
//! - `input`: Browser key bindings
//! - `render`: ASCII preview, DOT and Mermaid output
//! - `repl`: Command tokenizer, handlers and loop
//! - `terminal`: Raw mode, terminal size and the line reader
//! - `theme`: Browser color themes
//! - `ui`: The full-screen browser
//!
//! # Example
//!
//! ```
//! use dtree::document::node::NodeType;
//! use dtree::document::tree::DecisionTree;
//! use dtree::editor::session::Session;
//! use dtree::editor::undo::Command;
//!
//! let mut session = Session::new(DecisionTree::new("weather"));
//! session.execute(Command::add_node(NodeType::Decision, "Is it raining?")).unwrap();
//! session.execute(Command::add_node(NodeType::Action, "Take umbrella")).unwrap();
//! session.execute(Command::connect("n1", "n2", "yes")).unwrap();
//! assert!(session.execute(Command::connect("n2", "n1", "")).is_err());
//!
//! session.undo().unwrap();
//! assert!(session.tree().edges().is_empty());
//! ```

pub mod config;
pub mod document;
pub mod editor;
pub mod file;
pub mod input;
pub mod render;
pub mod repl;
pub mod terminal;
pub mod theme;
pub mod ui;

//! Reversible commands and the linear undo/redo history.
//!
//! Every mutation of a session's tree goes through [`History::execute`]. A
//! [`Command`] captures enough of the pre-state while it runs to reverse itself
//! exactly, so undo never needs a full snapshot of the tree.
//!
//! # Architecture
//!
//! - `Command`: one reified structural operation plus its captured undo state
//! - `Outcome`: what a successful command produced (new IDs, if any)
//! - `History`: the undo and redo stacks
//!
//! # Example
//!
//! ```
//! use dtree::document::node::NodeType;
//! use dtree::document::tree::DecisionTree;
//! use dtree::editor::undo::{Command, History, Outcome};
//!
//! let mut tree = DecisionTree::new("example");
//! let mut history = History::new();
//!
//! let outcome = history
//!     .execute(&mut tree, Command::add_node(NodeType::Decision, "Ready?"))
//!     .unwrap();
//! assert_eq!(outcome, Outcome::Added("n1".to_string()));
//!
//! history.undo(&mut tree).unwrap();
//! assert!(tree.is_empty());
//!
//! history.redo(&mut tree).unwrap();
//! assert_eq!(tree.get_node("n1").unwrap().label, "Ready?");
//! ```

use super::clipboard::{Clipboard, IdMap};
use crate::document::error::{Direction, TreeError};
use crate::document::node::{Edge, Node, NodeType};
use crate::document::tree::DecisionTree;
use std::collections::VecDeque;

/// What a removed node took with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub node: Node,
    /// Removed edges with their former positions, ascending.
    pub edges: Vec<(usize, Edge)>,
    pub was_root: bool,
}

/// A structural operation that can be applied and reverted.
///
/// Fields holding `Option`s are filled in by the first successful apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddNode {
        node_type: NodeType,
        label: String,
        id: Option<String>,
    },
    RemoveNode {
        id: String,
        removed: Option<Removal>,
    },
    Connect {
        from: String,
        to: String,
        label: String,
    },
    Disconnect {
        from: String,
        to: String,
        removed: Option<(usize, Edge)>,
    },
    EditLabel {
        id: String,
        label: String,
        previous: Option<String>,
    },
    EditType {
        id: String,
        node_type: NodeType,
        previous: Option<NodeType>,
    },
    SetRoot {
        id: String,
        previous: Option<Option<String>>,
    },
    PasteSubtree {
        clipboard: Clipboard,
        id_map: IdMap,
    },
}

/// The result of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    None,
    /// ID of the node created by an add.
    Added(String),
    /// Clipboard ID to new ID for every pasted node.
    Pasted(IdMap),
}

impl Command {
    pub fn add_node(node_type: NodeType, label: impl Into<String>) -> Self {
        Command::AddNode {
            node_type,
            label: label.into(),
            id: None,
        }
    }

    pub fn remove_node(id: impl Into<String>) -> Self {
        Command::RemoveNode {
            id: id.into(),
            removed: None,
        }
    }

    pub fn connect(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Command::Connect {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        }
    }

    pub fn disconnect(from: impl Into<String>, to: impl Into<String>) -> Self {
        Command::Disconnect {
            from: from.into(),
            to: to.into(),
            removed: None,
        }
    }

    pub fn edit_label(id: impl Into<String>, label: impl Into<String>) -> Self {
        Command::EditLabel {
            id: id.into(),
            label: label.into(),
            previous: None,
        }
    }

    pub fn edit_type(id: impl Into<String>, node_type: NodeType) -> Self {
        Command::EditType {
            id: id.into(),
            node_type,
            previous: None,
        }
    }

    pub fn set_root(id: impl Into<String>) -> Self {
        Command::SetRoot {
            id: id.into(),
            previous: None,
        }
    }

    pub fn paste(clipboard: Clipboard) -> Self {
        Command::PasteSubtree {
            clipboard,
            id_map: IdMap::new(),
        }
    }

    /// Short human-readable summary, e.g. `connect n1 -> n2`.
    pub fn describe(&self) -> String {
        match self {
            Command::AddNode { id: Some(id), .. } => format!("add {}", id),
            Command::AddNode { label, .. } => format!("add {:?}", label),
            Command::RemoveNode { id, .. } => format!("remove {}", id),
            Command::Connect { from, to, .. } => format!("connect {} -> {}", from, to),
            Command::Disconnect { from, to, .. } => format!("disconnect {} -> {}", from, to),
            Command::EditLabel { id, .. } => format!("edit label of {}", id),
            Command::EditType { id, .. } => format!("edit type of {}", id),
            Command::SetRoot { id, .. } => format!("set root {}", id),
            Command::PasteSubtree { clipboard, .. } => {
                format!("paste {} nodes", clipboard.len())
            }
        }
    }

    /// Runs the forward action. On error the tree is unchanged.
    fn apply(&mut self, tree: &mut DecisionTree) -> Result<Outcome, TreeError> {
        match self {
            Command::AddNode {
                node_type,
                label,
                id,
            } => {
                let new_id = match id {
                    // Replays reuse the ID minted by the first execution.
                    Some(existing) => {
                        tree.insert_node(Node::new(existing.clone(), *node_type, label.clone()));
                        existing.clone()
                    }
                    None => tree.add_node(*node_type, label.clone()),
                };
                *id = Some(new_id.clone());
                Ok(Outcome::Added(new_id))
            }
            Command::RemoveNode { id, removed } => {
                let target = id.as_str();
                let edges = tree
                    .edges()
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.touches(target))
                    .map(|(i, e)| (i, e.clone()))
                    .collect();
                let was_root = tree.root_id() == Some(target);
                let node = tree.remove_node(id)?;
                *removed = Some(Removal {
                    node,
                    edges,
                    was_root,
                });
                Ok(Outcome::None)
            }
            Command::Connect { from, to, label } => {
                tree.connect_nodes(from, to, label)?;
                Ok(Outcome::None)
            }
            Command::Disconnect { from, to, removed } => {
                let index = tree.edge_index(from, to);
                let edge = tree.disconnect_nodes(from, to)?;
                *removed = index.map(|i| (i, edge));
                Ok(Outcome::None)
            }
            Command::EditLabel {
                id,
                label,
                previous,
            } => {
                *previous = Some(tree.edit_node_label(id, label)?);
                Ok(Outcome::None)
            }
            Command::EditType {
                id,
                node_type,
                previous,
            } => {
                *previous = Some(tree.edit_node_type(id, *node_type)?);
                Ok(Outcome::None)
            }
            Command::SetRoot { id, previous } => {
                *previous = Some(tree.set_root(id)?);
                Ok(Outcome::None)
            }
            Command::PasteSubtree { clipboard, id_map } => {
                if id_map.is_empty() {
                    *id_map = clipboard.paste_into(tree);
                } else {
                    clipboard.paste_with_ids(tree, id_map);
                }
                Ok(Outcome::Pasted(id_map.clone()))
            }
        }
    }

    /// Runs the reverse action using the state captured by `apply`.
    fn revert(&mut self, tree: &mut DecisionTree) -> Result<(), TreeError> {
        match self {
            Command::AddNode { id, .. } => {
                if let Some(id) = id {
                    tree.remove_node(id)?;
                }
            }
            Command::RemoveNode { removed, .. } => {
                if let Some(removal) = removed.take() {
                    let node_id = removal.node.id.clone();
                    tree.insert_node(removal.node);
                    for (index, edge) in removal.edges {
                        tree.restore_edge(index, edge);
                    }
                    if removal.was_root {
                        tree.restore_root(Some(node_id));
                    }
                }
            }
            Command::Connect { from, to, .. } => {
                tree.disconnect_nodes(from, to)?;
            }
            Command::Disconnect { removed, .. } => {
                if let Some((index, edge)) = removed.take() {
                    tree.restore_edge(index, edge);
                }
            }
            Command::EditLabel { id, previous, .. } => {
                if let Some(previous) = previous {
                    tree.edit_node_label(id, previous)?;
                }
            }
            Command::EditType { id, previous, .. } => {
                if let Some(previous) = previous {
                    tree.edit_node_type(id, *previous)?;
                }
            }
            Command::SetRoot { previous, .. } => {
                if let Some(previous) = previous.take() {
                    tree.restore_root(previous);
                }
            }
            Command::PasteSubtree { id_map, .. } => {
                for new_id in id_map.values() {
                    tree.remove_node(new_id)?;
                }
            }
        }
        Ok(())
    }
}

/// Linear undo/redo history.
///
/// Executing a new command clears the redo stack. With a limit set, the
/// oldest undo entries are dropped once the limit is exceeded.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: VecDeque<Command>,
    redo_stack: Vec<Command>,
    limit: usize,
}

impl History {
    /// Creates an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history holding at most `limit` undo entries (0 = unbounded).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Applies `cmd` and records it.
    ///
    /// # Errors
    ///
    /// Returns the command's validation error; neither the tree nor the stacks
    /// are touched in that case.
    pub fn execute(&mut self, tree: &mut DecisionTree, mut cmd: Command) -> Result<Outcome, TreeError> {
        let outcome = cmd.apply(tree)?;
        tracing::debug!("executed {}", cmd.describe());
        self.undo_stack.push_back(cmd);
        if self.limit > 0 && self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
        Ok(outcome)
    }

    /// Reverts the most recent command and returns its description.
    pub fn undo(&mut self, tree: &mut DecisionTree) -> Result<String, TreeError> {
        let mut cmd = self
            .undo_stack
            .pop_back()
            .ok_or(TreeError::EmptyHistory(Direction::Undo))?;
        if let Err(e) = cmd.revert(tree) {
            self.undo_stack.push_back(cmd);
            return Err(e);
        }
        let description = cmd.describe();
        tracing::debug!("undid {}", description);
        self.redo_stack.push(cmd);
        Ok(description)
    }

    /// Re-applies the most recently undone command and returns its description.
    pub fn redo(&mut self, tree: &mut DecisionTree) -> Result<String, TreeError> {
        let mut cmd = self
            .redo_stack
            .pop()
            .ok_or(TreeError::EmptyHistory(Direction::Redo))?;
        if let Err(e) = cmd.apply(tree) {
            self.redo_stack.push(cmd);
            return Err(e);
        }
        let description = cmd.describe();
        tracing::debug!("redid {}", description);
        self.undo_stack.push_back(cmd);
        Ok(description)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

//! Session state shared by the REPL and the browser.

use super::clipboard::Clipboard;
use super::undo::{Command, History, Outcome};
use crate::document::error::TreeError;
use crate::document::tree::DecisionTree;

/// The tree being edited together with its history and clipboard.
///
/// The session is the sole owner of the tree; every mutation goes through
/// [`Session::execute`] so it can be undone.
#[derive(Debug)]
pub struct Session {
    tree: DecisionTree,
    history: History,
    clipboard: Option<Clipboard>,
    undo_limit: usize,
}

impl Session {
    pub fn new(tree: DecisionTree) -> Self {
        Self::with_undo_limit(tree, 0)
    }

    /// Creates a session whose history keeps at most `undo_limit` entries (0 = unbounded).
    pub fn with_undo_limit(tree: DecisionTree, undo_limit: usize) -> Self {
        Self {
            tree,
            history: History::with_limit(undo_limit),
            clipboard: None,
            undo_limit,
        }
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    pub fn execute(&mut self, cmd: Command) -> Result<Outcome, TreeError> {
        self.history.execute(&mut self.tree, cmd)
    }

    pub fn undo(&mut self) -> Result<String, TreeError> {
        self.history.undo(&mut self.tree)
    }

    pub fn redo(&mut self) -> Result<String, TreeError> {
        self.history.redo(&mut self.tree)
    }

    /// Copies the subtree under `id` into the clipboard and returns its size.
    pub fn copy(&mut self, id: &str) -> Result<usize, TreeError> {
        let clipboard = Clipboard::copy_subtree(&self.tree, id)?;
        let len = clipboard.len();
        self.clipboard = Some(clipboard);
        Ok(len)
    }

    /// Pastes the clipboard as an unattached subtree.
    ///
    /// Returns `Ok(None)` if the clipboard is empty, otherwise the clipboard
    /// root's new ID and the number of nodes pasted.
    pub fn paste(&mut self) -> Result<Option<(String, usize)>, TreeError> {
        let Some(clipboard) = self.clipboard.clone() else {
            return Ok(None);
        };
        let root = clipboard.root_id().to_string();
        match self.execute(Command::paste(clipboard))? {
            Outcome::Pasted(id_map) => Ok(id_map
                .get(&root)
                .map(|new_root| (new_root.clone(), id_map.len()))),
            _ => Ok(None),
        }
    }

    /// Swaps in a new tree, discarding history and clipboard.
    pub fn replace_tree(&mut self, tree: DecisionTree) {
        self.tree = tree;
        self.history = History::with_limit(self.undo_limit);
        self.clipboard = None;
    }
}

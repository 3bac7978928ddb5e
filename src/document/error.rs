//! Errors raised by structural operations and the command history.

use std::fmt;
use thiserror::Error;

/// Which history stack an operation tried to pop from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Undo,
    Redo,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Undo => write!(f, "undo"),
            Direction::Redo => write!(f, "redo"),
        }
    }
}

/// Every way a tree mutation or history step can be refused.
///
/// A refused operation never leaves a partial mutation behind, so callers can
/// report the error and carry on with the same tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {0:?} not found")]
    NotFound(String),

    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge { from: String, to: String },

    #[error("node {node:?} already has parent {parent:?}")]
    ParentConflict { node: String, parent: String },

    #[error("connecting {from} -> {to} would create a cycle")]
    CycleRejected { from: String, to: String },

    #[error("no edge from {from} to {to}")]
    NoSuchEdge { from: String, to: String },

    #[error("nothing to {0}")]
    EmptyHistory(Direction),

    #[error("unknown node type: {0:?}")]
    InvalidNodeType(String),

    #[error("root node {0:?} not found")]
    MissingRoot(String),

    #[error("node stored under {key:?} has id {id:?}")]
    MismatchedId { key: String, id: String },

    #[error("edge {from} -> {to} references non-existent node {missing:?}")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_ids() {
        let err = TreeError::ParentConflict {
            node: "n3".to_string(),
            parent: "n1".to_string(),
        };
        assert_eq!(err.to_string(), "node \"n3\" already has parent \"n1\"");

        let err = TreeError::CycleRejected {
            from: "n2".to_string(),
            to: "n1".to_string(),
        };
        assert_eq!(err.to_string(), "connecting n2 -> n1 would create a cycle");
    }

    #[test]
    fn test_empty_history_message() {
        assert_eq!(
            TreeError::EmptyHistory(Direction::Undo).to_string(),
            "nothing to undo"
        );
        assert_eq!(
            TreeError::EmptyHistory(Direction::Redo).to_string(),
            "nothing to redo"
        );
    }
}

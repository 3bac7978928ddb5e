//! Node and edge types for decision trees.
//!
//! A decision tree is made of typed, labeled [`Node`]s joined by directed
//! [`Edge`]s. The node type decides how a node is drawn (diamond, box, oval or
//! parallelogram) but carries no behavior of its own.
//!
//! # Example
//!
//! ```
//! use dtree::document::node::NodeType;
//!
//! let t: NodeType = "decision".parse().unwrap();
//! assert_eq!(t, NodeType::Decision);
//! assert_eq!(t.next(), NodeType::Action);
//! assert_eq!(format!("{}", NodeType::StartEnd), "startend");
//! ```

use super::error::TreeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The shape of a node in a decision tree.
///
/// Persisted documents store the type as a small integer code (0-3) in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum NodeType {
    /// A question with labeled outcomes (diamond).
    Decision,
    /// A step to perform (rectangle).
    Action,
    /// Entry or exit point (oval).
    StartEnd,
    /// Input or output (parallelogram).
    IO,
}

impl NodeType {
    /// All node types in rotation order.
    pub const ALL: [NodeType; 4] = [
        NodeType::Decision,
        NodeType::Action,
        NodeType::StartEnd,
        NodeType::IO,
    ];

    /// Returns the next type in the rotation Decision → Action → StartEnd → IO → Decision.
    pub fn next(self) -> Self {
        match self {
            NodeType::Decision => NodeType::Action,
            NodeType::Action => NodeType::StartEnd,
            NodeType::StartEnd => NodeType::IO,
            NodeType::IO => NodeType::Decision,
        }
    }

    /// The lowercase token used on the command line and in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Decision => "decision",
            NodeType::Action => "action",
            NodeType::StartEnd => "startend",
            NodeType::IO => "io",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "decision" => Ok(NodeType::Decision),
            "action" => Ok(NodeType::Action),
            "startend" => Ok(NodeType::StartEnd),
            "io" => Ok(NodeType::IO),
            other => Err(TreeError::InvalidNodeType(other.to_string())),
        }
    }
}

impl From<NodeType> for u8 {
    fn from(t: NodeType) -> Self {
        match t {
            NodeType::Decision => 0,
            NodeType::Action => 1,
            NodeType::StartEnd => 2,
            NodeType::IO => 3,
        }
    }
}

impl TryFrom<u8> for NodeType {
    type Error = TreeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        NodeType::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| TreeError::InvalidNodeType(code.to_string()))
    }
}

/// A single typed, labeled vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub label: String,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: NodeType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type,
            label: label.into(),
        }
    }
}

/// A directed connection between two nodes, identified by its endpoint pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        }
    }

    /// Returns true if this edge touches `id` at either end.
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }

    /// Returns true if this edge is exactly `from -> to`.
    pub fn joins(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }
}

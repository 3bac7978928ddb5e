//! Indented ASCII preview drawn from the root.
//!
//! ```text
//! ([Start])
//! └── <Ready?>
//!     ├── [yes] [Go]
//!     └── [no] //Report//
//! ```
//!
//! The same rows back the interactive browser, one row per reachable node.

use crate::document::node::{Node, NodeType};
use crate::document::tree::DecisionTree;
use std::collections::HashSet;

/// One line of the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub node_id: String,
    pub text: String,
}

/// The node's label wrapped in its type decoration.
pub fn decorate(node: &Node) -> String {
    match node.node_type {
        NodeType::Decision => format!("<{}>", node.label),
        NodeType::Action => format!("[{}]", node.label),
        NodeType::StartEnd => format!("([{}])", node.label),
        NodeType::IO => format!("//{}//", node.label),
    }
}

/// Walks the tree depth-first from the root, children in edge order.
///
/// Returns no rows if there is no root or it is missing. A node reached a
/// second time is not expanded again.
pub fn flatten(tree: &DecisionTree) -> Vec<Row> {
    let mut rows = Vec::new();
    if let Some(root) = tree.root_id() {
        let mut visited = HashSet::new();
        walk(tree, root, "", "", None, &mut visited, &mut rows);
    }
    rows
}

/// `connector` is `None` for the root row.
fn walk(
    tree: &DecisionTree,
    id: &str,
    edge_label: &str,
    prefix: &str,
    connector: Option<bool>,
    visited: &mut HashSet<String>,
    rows: &mut Vec<Row>,
) {
    let Some(node) = tree.get_node(id) else {
        return;
    };
    if !visited.insert(id.to_string()) {
        return;
    }

    let edge_part = if edge_label.is_empty() {
        String::new()
    } else {
        format!("[{}] ", edge_label)
    };
    let (text, child_prefix) = match connector {
        None => (format!("{}{}", edge_part, decorate(node)), String::new()),
        Some(is_last) => {
            let (branch, indent) = if is_last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            (
                format!("{}{}{}{}", prefix, branch, edge_part, decorate(node)),
                format!("{}{}", prefix, indent),
            )
        }
    };
    rows.push(Row {
        node_id: id.to_string(),
        text,
    });

    let children = tree.children(id);
    let count = children.len();
    for (i, edge) in children.into_iter().enumerate() {
        walk(
            tree,
            &edge.to,
            &edge.label,
            &child_prefix,
            Some(i + 1 == count),
            visited,
            rows,
        );
    }
}

/// Multi-line preview, or a short notice when there is no usable root.
pub fn preview(tree: &DecisionTree) -> String {
    match tree.root_id() {
        None => "(no root set)".to_string(),
        Some(root) if !tree.contains(root) => "(root node not found)".to_string(),
        Some(_) => flatten(tree)
            .into_iter()
            .map(|row| row.text)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

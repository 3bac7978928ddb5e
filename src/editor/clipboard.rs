//! Subtree copy and paste.
//!
//! A [`Clipboard`] is a detached snapshot of a subtree that keeps the original
//! node IDs. Pasting mints fresh IDs from the target tree, so one clipboard can
//! be pasted any number of times and every paste is an independent copy.

use crate::document::error::TreeError;
use crate::document::node::{Edge, Node};
use crate::document::tree::DecisionTree;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Maps clipboard IDs to the IDs minted by a paste, in clipboard order.
pub type IdMap = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clipboard {
    root: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Clipboard {
    /// Snapshots the subtree under `root` by depth-first traversal.
    ///
    /// Children are visited in edge order. A node reached twice (only possible
    /// in an already-corrupt structure) is copied once.
    pub fn copy_subtree(tree: &DecisionTree, root: &str) -> Result<Self, TreeError> {
        if !tree.contains(root) {
            return Err(TreeError::NotFound(root.to_string()));
        }

        let mut clipboard = Clipboard {
            root: root.to_string(),
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        let mut visited = HashSet::new();
        clipboard.visit(tree, root, &mut visited);
        Ok(clipboard)
    }

    fn visit(&mut self, tree: &DecisionTree, id: &str, visited: &mut HashSet<String>) {
        if !visited.insert(id.to_string()) {
            return;
        }
        if let Some(node) = tree.get_node(id) {
            self.nodes.push(node.clone());
        }
        for edge in tree.children(id) {
            if visited.contains(&edge.to) {
                continue;
            }
            self.edges.push(edge.clone());
            self.visit(tree, &edge.to, visited);
        }
    }

    /// ID of the copied subtree's root, as it was in the source tree.
    pub fn root_id(&self) -> &str {
        &self.root
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts a copy of the subtree under freshly minted IDs.
    ///
    /// The pasted root is left unattached; connecting it is up to the caller.
    pub fn paste_into(&self, tree: &mut DecisionTree) -> IdMap {
        let id_map: IdMap = self
            .nodes
            .iter()
            .map(|node| (node.id.clone(), tree.next_id()))
            .collect();
        self.paste_with_ids(tree, &id_map);
        id_map
    }

    /// Re-inserts the subtree under IDs minted by an earlier paste.
    pub(crate) fn paste_with_ids(&self, tree: &mut DecisionTree, id_map: &IdMap) {
        for node in &self.nodes {
            if let Some(new_id) = id_map.get(&node.id) {
                tree.insert_node(Node::new(new_id.clone(), node.node_type, node.label.clone()));
            }
        }
        for edge in &self.edges {
            if let (Some(from), Some(to)) = (id_map.get(&edge.from), id_map.get(&edge.to)) {
                tree.edges.push(Edge::new(from.clone(), to.clone(), edge.label.clone()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::NodeType;

    fn sample() -> DecisionTree {
        let mut tree = DecisionTree::new("test");
        let q = tree.add_node(NodeType::Decision, "Q");
        let yes = tree.add_node(NodeType::Action, "Yes");
        let no = tree.add_node(NodeType::Action, "No");
        tree.add_node(NodeType::IO, "Elsewhere");
        tree.connect_nodes(&q, &yes, "yes").unwrap();
        tree.connect_nodes(&q, &no, "no").unwrap();
        tree
    }

    #[test]
    fn test_copy_collects_subtree_only() {
        let tree = sample();
        let clip = Clipboard::copy_subtree(&tree, "n1").unwrap();
        assert_eq!(clip.root_id(), "n1");
        assert_eq!(clip.len(), 3);
        assert_eq!(clip.edges().len(), 2);
        let ids: Vec<_> = clip.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n1", "n2", "n3"]);
    }

    #[test]
    fn test_copy_leaf() {
        let tree = sample();
        let clip = Clipboard::copy_subtree(&tree, "n3").unwrap();
        assert_eq!(clip.len(), 1);
        assert!(clip.edges().is_empty());
    }

    #[test]
    fn test_copy_missing_root() {
        let tree = sample();
        assert_eq!(
            Clipboard::copy_subtree(&tree, "n42"),
            Err(TreeError::NotFound("n42".to_string()))
        );
    }

    #[test]
    fn test_copy_survives_corrupt_cycle() {
        let mut tree = DecisionTree::new("test");
        tree.insert_node(Node::new("a", NodeType::Action, "a"));
        tree.insert_node(Node::new("b", NodeType::Action, "b"));
        tree.edges.push(Edge::new("a", "b", ""));
        tree.edges.push(Edge::new("b", "a", ""));

        let clip = Clipboard::copy_subtree(&tree, "a").unwrap();
        assert_eq!(clip.len(), 2);
        assert_eq!(clip.edges().len(), 1);
    }

    #[test]
    fn test_paste_mints_fresh_ids_and_mirrors_shape() {
        let mut tree = sample();
        let clip = Clipboard::copy_subtree(&tree, "n1").unwrap();
        let map = clip.paste_into(&mut tree);

        assert_eq!(map.get("n1").map(String::as_str), Some("n5"));
        assert_eq!(map.get("n2").map(String::as_str), Some("n6"));
        assert_eq!(map.get("n3").map(String::as_str), Some("n7"));
        assert_eq!(tree.node_count(), 7);
        assert!(tree.has_edge("n5", "n6"));
        assert!(tree.has_edge("n5", "n7"));
        assert_eq!(tree.parent("n6").unwrap().label, "yes");
        assert!(tree.parent("n5").is_none());
        assert!(tree.validate().is_ok());
    }
}

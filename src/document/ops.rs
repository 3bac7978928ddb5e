//! Structural operations on a [`DecisionTree`].
//!
//! Every operation validates before it mutates: a call that returns an error
//! has left the tree exactly as it found it.

use super::error::TreeError;
use super::node::{Edge, Node, NodeType};
use super::tree::DecisionTree;

impl DecisionTree {
    /// Adds an unconnected node and returns its freshly minted ID.
    pub fn add_node(&mut self, node_type: NodeType, label: impl Into<String>) -> String {
        let id = self.next_id();
        self.insert_node(Node::new(id.clone(), node_type, label));
        id
    }

    /// Inserts a node under its own ID, replacing nothing else.
    ///
    /// Used when replaying history, where the ID was minted earlier.
    pub(crate) fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Removes a node, every edge touching it, and the root marker if it was root.
    ///
    /// Returns the removed node.
    pub fn remove_node(&mut self, id: &str) -> Result<Node, TreeError> {
        let node = self
            .nodes
            .remove(id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?;
        self.edges.retain(|e| !e.touches(id));
        if self.root.as_deref() == Some(id) {
            self.root = None;
        }
        Ok(node)
    }

    /// Appends the edge `from -> to`.
    ///
    /// Refused when an endpoint is missing, the edge already exists, `to`
    /// already has a parent, or the edge would close a cycle.
    pub fn connect_nodes(&mut self, from: &str, to: &str, label: &str) -> Result<(), TreeError> {
        self.check_connect(from, to)?;
        self.edges.push(Edge::new(from, to, label));
        Ok(())
    }

    pub(crate) fn check_connect(&self, from: &str, to: &str) -> Result<(), TreeError> {
        for id in [from, to] {
            if !self.contains(id) {
                return Err(TreeError::NotFound(id.to_string()));
            }
        }
        if self.has_edge(from, to) {
            return Err(TreeError::DuplicateEdge {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        if from == to || self.ancestors(from).contains(to) {
            return Err(TreeError::CycleRejected {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        if let Some(existing) = self.parent(to) {
            return Err(TreeError::ParentConflict {
                node: to.to_string(),
                parent: existing.from.clone(),
            });
        }
        Ok(())
    }

    /// Removes exactly the edge `from -> to` and returns it.
    pub fn disconnect_nodes(&mut self, from: &str, to: &str) -> Result<Edge, TreeError> {
        let index = self
            .edge_index(from, to)
            .ok_or_else(|| TreeError::NoSuchEdge {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        Ok(self.edges.remove(index))
    }

    /// Puts an edge back at `index` (clamped to the end of the sequence).
    pub(crate) fn restore_edge(&mut self, index: usize, edge: Edge) {
        let index = index.min(self.edges.len());
        self.edges.insert(index, edge);
    }

    /// Overwrites a node's label, returning the previous one.
    pub fn edit_node_label(&mut self, id: &str, label: &str) -> Result<String, TreeError> {
        let node = self
            .get_node_mut(id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?;
        Ok(std::mem::replace(&mut node.label, label.to_string()))
    }

    /// Overwrites a node's type, returning the previous one.
    pub fn edit_node_type(&mut self, id: &str, node_type: NodeType) -> Result<NodeType, TreeError> {
        let node = self
            .get_node_mut(id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?;
        Ok(std::mem::replace(&mut node.node_type, node_type))
    }

    /// Makes `id` the root, returning the previous root.
    pub fn set_root(&mut self, id: &str) -> Result<Option<String>, TreeError> {
        if !self.contains(id) {
            return Err(TreeError::NotFound(id.to_string()));
        }
        Ok(self.root.replace(id.to_string()))
    }

    /// Restores a root captured earlier, without checking that it still exists.
    pub(crate) fn restore_root(&mut self, root: Option<String>) {
        self.root = root;
    }

    /// One summary line per node in ascending ID order, e.g.
    /// `n1 [decision] "Is it raining?" (root)`.
    pub fn list_nodes(&self) -> Vec<String> {
        self.nodes()
            .map(|node| {
                let mut line = format!("{} [{}] {:?}", node.id, node.node_type, node.label);
                if self.root_id() == Some(node.id.as_str()) {
                    line.push_str(" (root)");
                }
                line
            })
            .collect()
    }
}

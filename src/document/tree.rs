//! The in-memory decision tree.
//!
//! `DecisionTree` owns its nodes and edges exclusively. Nodes are keyed by ID
//! and always iterate in ascending lexicographic ID order; edges keep their
//! insertion order, which is the order children are visited in.
//!
//! Structural mutations live in [`super::ops`]; this module only provides the
//! model and read-only queries.
//!
//! # Example
//!
//! ```
//! use dtree::document::node::NodeType;
//! use dtree::document::tree::DecisionTree;
//!
//! let mut tree = DecisionTree::new("weather");
//! let q = tree.add_node(NodeType::Decision, "Is it raining?");
//! let a = tree.add_node(NodeType::Action, "Take umbrella");
//! tree.connect_nodes(&q, &a, "yes").unwrap();
//!
//! assert_eq!(q, "n1");
//! assert_eq!(tree.parent(&a).map(|e| e.from.as_str()), Some("n1"));
//! ```

use super::error::TreeError;
use super::node::{Edge, Node};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A named decision tree with an optional root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub name: String,
    #[serde(rename = "root_id", default, with = "root_id")]
    pub(crate) root: Option<String>,
    #[serde(default)]
    pub(crate) nodes: BTreeMap<String, Node>,
    #[serde(default)]
    pub(crate) edges: Vec<Edge>,
    #[serde(default)]
    pub(crate) counter: u64,
}

impl DecisionTree {
    /// Creates an empty tree with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: None,
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            counter: 0,
        }
    }

    /// Mints the next node ID (`n1`, `n2`, ...). IDs are never reused, and an
    /// ID already present in the tree is skipped.
    pub fn next_id(&mut self) -> String {
        loop {
            self.counter += 1;
            let id = format!("n{}", self.counter);
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    /// Raises the counter to the highest `n<digits>` node ID, so a document
    /// saved with a stale or missing counter keeps minting fresh IDs.
    pub fn sync_counter(&mut self) {
        let highest = self
            .nodes
            .keys()
            .filter_map(|id| id.strip_prefix('n'))
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|digits| digits.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.counter = self.counter.max(highest);
    }

    /// Returns the ID allocation counter.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn root_id(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn get_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates nodes in ascending ID order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All node IDs in ascending lexicographic (byte-wise, not numeric) order,
    /// so `n10` sorts before `n2`.
    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    /// Outgoing edges of `id`, in insertion order.
    pub fn children(&self, id: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.from == id).collect()
    }

    /// The unique incoming edge of `id`, if any.
    pub fn parent(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.to == id)
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges.iter().any(|e| e.joins(from, to))
    }

    /// Position of the edge `from -> to` in the edge sequence.
    pub(crate) fn edge_index(&self, from: &str, to: &str) -> Option<usize> {
        self.edges.iter().position(|e| e.joins(from, to))
    }

    /// Every node reachable from `id` by repeatedly following parent edges.
    ///
    /// Stops if the parent chain revisits a node, so an already-corrupt cyclic
    /// structure cannot loop forever.
    pub fn ancestors(&self, id: &str) -> HashSet<String> {
        let mut ancestors = HashSet::new();
        let mut current = id;
        while let Some(edge) = self.parent(current) {
            if !ancestors.insert(edge.from.clone()) {
                break;
            }
            current = &edge.from;
        }
        ancestors
    }

    /// Checks that every node is stored under its own ID, that the root (if
    /// set) exists, and that every edge endpoint exists.
    pub fn validate(&self) -> Result<(), TreeError> {
        for (key, node) in &self.nodes {
            if *key != node.id {
                return Err(TreeError::MismatchedId {
                    key: key.clone(),
                    id: node.id.clone(),
                });
            }
        }
        if let Some(root) = &self.root {
            if !self.nodes.contains_key(root) {
                return Err(TreeError::MissingRoot(root.clone()));
            }
        }
        for edge in &self.edges {
            for endpoint in [&edge.from, &edge.to] {
                if !self.nodes.contains_key(endpoint) {
                    return Err(TreeError::DanglingEdge {
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Persists the optional root as a plain string, empty meaning "no root".
mod root_id {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(root: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(root.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.filter(|s| !s.is_empty()))
    }
}

//! Text renderings of a decision tree.
//!
//! Renderers only read the tree. Nodes are emitted in ascending ID order and
//! edges in insertion order, so output is stable for a given tree.
//!
//! # Modules
//!
//! - `ascii`: Indented box-drawing preview, also used by the browser
//! - `dot`: Graphviz DOT
//! - `mermaid`: Mermaid flowchart
//!
//! # Example
//!
//! ```
//! use dtree::document::node::NodeType;
//! use dtree::document::tree::DecisionTree;
//! use dtree::render::renderer_for;
//!
//! let mut tree = DecisionTree::new("demo");
//! tree.add_node(NodeType::Action, "Go");
//!
//! let out = renderer_for("mermaid").unwrap().render(&tree);
//! assert_eq!(out, "flowchart TB\n  n1[Go]\n");
//! assert!(renderer_for("svg").is_none());
//! ```

pub mod ascii;
pub mod dot;
pub mod mermaid;

use crate::document::tree::DecisionTree;

/// Converts a tree into a diagram description.
pub trait Renderer {
    /// Format name as accepted by [`renderer_for`].
    fn name(&self) -> &'static str;

    fn render(&self, tree: &DecisionTree) -> String;
}

/// Looks up a renderer by format name (case-insensitive).
pub fn renderer_for(format: &str) -> Option<Box<dyn Renderer>> {
    match format.to_ascii_lowercase().as_str() {
        "dot" => Some(Box::new(dot::DotRenderer)),
        "mermaid" => Some(Box::new(mermaid::MermaidRenderer)),
        _ => None,
    }
}

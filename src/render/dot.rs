//! Graphviz DOT output.

use super::Renderer;
use crate::document::node::NodeType;
use crate::document::tree::DecisionTree;

pub struct DotRenderer;

impl Renderer for DotRenderer {
    fn name(&self) -> &'static str {
        "dot"
    }

    fn render(&self, tree: &DecisionTree) -> String {
        let mut out = format!("digraph {} {{\n  rankdir=TB;\n\n", graph_id(&tree.name));
        for node in tree.nodes() {
            out.push_str(&format!(
                "  {} [label={}, shape={}];\n",
                node.id,
                quote(&node.label),
                shape(node.node_type)
            ));
        }
        if !tree.edges().is_empty() {
            out.push('\n');
        }
        for edge in tree.edges() {
            if edge.label.is_empty() {
                out.push_str(&format!("  {} -> {};\n", edge.from, edge.to));
            } else {
                out.push_str(&format!(
                    "  {} -> {} [label={}];\n",
                    edge.from,
                    edge.to,
                    quote(&edge.label)
                ));
            }
        }
        out.push_str("}\n");
        out
    }
}

fn shape(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Decision => "diamond",
        NodeType::Action => "box",
        NodeType::StartEnd => "ellipse",
        NodeType::IO => "parallelogram",
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Replaces everything but ASCII alphanumerics and `_` with `_`.
fn graph_id(name: &str) -> String {
    if name.is_empty() {
        return "tree".to_string();
    }
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

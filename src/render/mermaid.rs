//! Mermaid flowchart output.

use super::Renderer;
use crate::document::node::{Node, NodeType};
use crate::document::tree::DecisionTree;

pub struct MermaidRenderer;

impl Renderer for MermaidRenderer {
    fn name(&self) -> &'static str {
        "mermaid"
    }

    fn render(&self, tree: &DecisionTree) -> String {
        let mut out = String::from("flowchart TB\n");
        for node in tree.nodes() {
            out.push_str(&format!("  {}{}\n", node.id, shape(node)));
        }
        if !tree.edges().is_empty() {
            out.push('\n');
        }
        for edge in tree.edges() {
            if edge.label.is_empty() {
                out.push_str(&format!("  {} --> {}\n", edge.from, edge.to));
            } else {
                out.push_str(&format!(
                    "  {} -- {} --> {}\n",
                    edge.from,
                    escape(&edge.label),
                    edge.to
                ));
            }
        }
        out
    }
}

fn shape(node: &Node) -> String {
    let label = escape(&node.label);
    match node.node_type {
        NodeType::Decision => format!("{{{}}}", label),
        NodeType::Action => format!("[{}]", label),
        NodeType::StartEnd => format!("([{}])", label),
        NodeType::IO => format!("[/{}/]", label),
    }
}

fn escape(s: &str) -> String {
    s.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_and_edges() {
        let mut tree = DecisionTree::new("auth-flow");
        tree.add_node(NodeType::StartEnd, "Start");
        tree.add_node(NodeType::Decision, "Authenticated?");
        tree.add_node(NodeType::Action, "Grant access");
        tree.add_node(NodeType::IO, "Show login");
        tree.connect_nodes("n1", "n2", "").unwrap();
        tree.connect_nodes("n2", "n3", "yes").unwrap();
        tree.connect_nodes("n2", "n4", "no").unwrap();

        let out = MermaidRenderer.render(&tree);
        for expected in [
            "flowchart TB\n",
            "  n1([Start])\n",
            "  n2{Authenticated?}\n",
            "  n3[Grant access]\n",
            "  n4[/Show login/]\n",
            "  n1 --> n2\n",
            "  n2 -- yes --> n3\n",
            "  n2 -- no --> n4\n",
        ] {
            assert!(out.contains(expected), "missing {:?} in:\n{}", expected, out);
        }
    }

    #[test]
    fn test_quotes_are_escaped() {
        let mut tree = DecisionTree::new("t");
        tree.add_node(NodeType::Action, r#"Say "hi""#);
        assert!(MermaidRenderer.render(&tree).contains("n1[Say #quot;hi#quot;]"));
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(MermaidRenderer.render(&DecisionTree::new("e")), "flowchart TB\n");
    }
}

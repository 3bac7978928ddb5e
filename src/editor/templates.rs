//! Built-in starter trees.
//!
//! The catalog is a static, read-only table; [`TreeTemplate::instantiate`]
//! builds a fresh tree each time it is called.

use crate::document::error::TreeError;
use crate::document::node::NodeType;
use crate::document::tree::DecisionTree;

type Layout = (&'static [(NodeType, &'static str)], &'static [(usize, usize, &'static str)]);

/// A named starter tree.
#[derive(Debug)]
pub struct TreeTemplate {
    pub name: &'static str,
    pub description: &'static str,
    /// Nodes in ID order (`n1`, `n2`, ...) and edges as 1-based node indices.
    layout: Layout,
}

impl TreeTemplate {
    /// Builds the template as a new tree named after it, rooted at `n1`.
    pub fn instantiate(&self) -> Result<DecisionTree, TreeError> {
        let (nodes, edges) = self.layout;
        let mut tree = DecisionTree::new(self.name);
        let ids: Vec<String> = nodes
            .iter()
            .map(|(node_type, label)| tree.add_node(*node_type, *label))
            .collect();
        if let Some(first) = ids.first() {
            tree.set_root(first)?;
        }
        for (from, to, label) in edges {
            let from = ids
                .get(from.wrapping_sub(1))
                .ok_or_else(|| TreeError::NotFound(format!("n{}", from)))?;
            let to = ids
                .get(to.wrapping_sub(1))
                .ok_or_else(|| TreeError::NotFound(format!("n{}", to)))?;
            tree.connect_nodes(from, to, label)?;
        }
        Ok(tree)
    }
}

static TEMPLATES: &[TreeTemplate] = &[
    TreeTemplate {
        name: "auth-flow",
        description: "Authentication flow",
        layout: (
            &[
                (NodeType::StartEnd, "Start"),
                (NodeType::Decision, "Authenticated?"),
                (NodeType::Action, "Grant access"),
                (NodeType::StartEnd, "End"),
                (NodeType::Action, "Show login form"),
            ],
            &[(1, 2, ""), (2, 3, "yes"), (3, 4, ""), (2, 5, "no")],
        ),
    },
    TreeTemplate {
        name: "approval",
        description: "Approval workflow",
        layout: (
            &[
                (NodeType::StartEnd, "Start"),
                (NodeType::Action, "Submit request"),
                (NodeType::Decision, "Approved?"),
                (NodeType::Action, "Process request"),
                (NodeType::StartEnd, "End"),
                (NodeType::Action, "Revise request"),
            ],
            &[(1, 2, ""), (2, 3, ""), (3, 4, "yes"), (4, 5, ""), (3, 6, "no")],
        ),
    },
    TreeTemplate {
        name: "troubleshooting",
        description: "Troubleshooting guide",
        layout: (
            &[
                (NodeType::StartEnd, "Start"),
                (NodeType::Decision, "Is it plugged in?"),
                (NodeType::Action, "Plug it in"),
                (NodeType::StartEnd, "Done"),
                (NodeType::Action, "Check settings"),
                (NodeType::Decision, "Resolved?"),
                (NodeType::Action, "Escalate"),
            ],
            &[
                (1, 2, ""),
                (2, 3, "no"),
                (3, 4, ""),
                (2, 5, "yes"),
                (5, 6, ""),
                (6, 7, "no"),
            ],
        ),
    },
];

/// Every built-in template, in display order.
pub fn all() -> &'static [TreeTemplate] {
    TEMPLATES
}

/// Looks up a template by exact name.
pub fn find(name: &str) -> Option<&'static TreeTemplate> {
    TEMPLATES.iter().find(|t| t.name == name)
}

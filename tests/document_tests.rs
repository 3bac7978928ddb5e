//! Integration tests for the tree model and its structural operations.

use dtree::document::error::TreeError;
use dtree::document::node::NodeType;
use dtree::document::tree::DecisionTree;
use std::collections::HashMap;

/// Start → Decision → (yes) Action, (no) IO, rooted at Start.
fn four_node_tree() -> DecisionTree {
    let mut tree = DecisionTree::new("four");
    tree.add_node(NodeType::StartEnd, "Start");
    tree.add_node(NodeType::Decision, "Ready?");
    tree.add_node(NodeType::Action, "Go");
    tree.add_node(NodeType::IO, "Report");
    tree.connect_nodes("n1", "n2", "").unwrap();
    tree.connect_nodes("n2", "n3", "yes").unwrap();
    tree.connect_nodes("n2", "n4", "no").unwrap();
    tree.set_root("n1").unwrap();
    tree
}

fn has_cycle(tree: &DecisionTree) -> bool {
    let parent: HashMap<&str, &str> = tree
        .edges()
        .iter()
        .map(|e| (e.to.as_str(), e.from.as_str()))
        .collect();
    tree.node_ids().into_iter().any(|start| {
        let mut current = start;
        for _ in 0..=tree.node_count() {
            match parent.get(current) {
                Some(&p) if p == start => return true,
                Some(&p) => current = p,
                None => return false,
            }
        }
        false
    })
}

#[test]
fn test_raining_scenario() {
    let mut tree = DecisionTree::new("weather");
    assert_eq!(tree.add_node(NodeType::Decision, "Is it raining?"), "n1");
    assert_eq!(tree.add_node(NodeType::Action, "Take umbrella"), "n2");
    tree.connect_nodes("n1", "n2", "yes").unwrap();

    let err = tree.connect_nodes("n2", "n1", "").unwrap_err();
    assert_eq!(
        err,
        TreeError::CycleRejected {
            from: "n2".to_string(),
            to: "n1".to_string()
        }
    );
    assert_eq!(tree.edges().len(), 1);
}

#[test]
fn test_remove_decision_leaves_fragments() {
    let mut tree = four_node_tree();
    let removed = tree.remove_node("n2").unwrap();
    assert_eq!(removed.label, "Ready?");

    assert_eq!(tree.node_count(), 3);
    assert!(tree.edges().is_empty());
    assert_eq!(tree.root_id(), Some("n1"));
    assert!(tree.validate().is_ok());
}

#[test]
fn test_remove_root_unsets_root() {
    let mut tree = four_node_tree();
    tree.remove_node("n1").unwrap();
    assert_eq!(tree.root_id(), None);
    assert!(tree.edges().iter().all(|e| e.from != "n1" && e.to != "n1"));
}

#[test]
fn test_removal_leaves_no_dangling_edges() {
    for id in ["n1", "n2", "n3", "n4"] {
        let mut tree = four_node_tree();
        tree.remove_node(id).unwrap();
        assert!(tree.validate().is_ok(), "dangling edge after removing {}", id);
        assert!(tree.edges().iter().all(|e| !e.touches(id)));
    }
}

#[test]
fn test_single_parent_rule() {
    let mut tree = four_node_tree();
    let extra = tree.add_node(NodeType::Action, "Extra");
    tree.connect_nodes("n3", &extra, "").unwrap();

    let err = tree.connect_nodes("n4", &extra, "").unwrap_err();
    assert_eq!(
        err,
        TreeError::ParentConflict {
            node: extra.clone(),
            parent: "n3".to_string()
        }
    );

    let mut targets: Vec<&str> = tree.edges().iter().map(|e| e.to.as_str()).collect();
    let before = targets.len();
    targets.sort_unstable();
    targets.dedup();
    assert_eq!(targets.len(), before);
}

#[test]
fn test_connecting_back_to_fragment_root_is_rejected() {
    let mut tree = four_node_tree();
    for descendant in ["n2", "n3", "n4"] {
        let edges_before = tree.edges().to_vec();
        let result = tree.connect_nodes(descendant, "n1", "");
        assert!(
            matches!(result, Err(TreeError::CycleRejected { .. })),
            "{} -> n1 gave {:?}",
            descendant,
            result
        );
        assert_eq!(tree.edges(), edges_before.as_slice());
    }
    assert!(!has_cycle(&tree));
}

#[test]
fn test_connecting_to_any_ancestor_is_a_cycle() {
    let mut tree = four_node_tree();
    let extra = tree.add_node(NodeType::Action, "Deep");
    tree.connect_nodes("n3", &extra, "").unwrap();

    // n2 already has a parent, but the cycle is what gets reported.
    for ancestor in ["n3", "n2", "n1"] {
        assert!(matches!(
            tree.connect_nodes(&extra, ancestor, ""),
            Err(TreeError::CycleRejected { .. })
        ));
    }
    assert_eq!(
        tree.connect_nodes("n4", "n3", ""),
        Err(TreeError::ParentConflict {
            node: "n3".to_string(),
            parent: "n2".to_string()
        })
    );
}

#[test]
fn test_self_loop_is_rejected() {
    let mut tree = DecisionTree::new("t");
    let id = tree.add_node(NodeType::Action, "Alone");
    assert_eq!(
        tree.connect_nodes(&id, &id, ""),
        Err(TreeError::CycleRejected {
            from: id.clone(),
            to: id.clone()
        })
    );
    assert!(tree.edges().is_empty());
}

#[test]
fn test_random_connect_sequence_stays_acyclic() {
    let mut tree = DecisionTree::new("grid");
    for i in 0..8 {
        tree.add_node(NodeType::Action, format!("node {}", i));
    }
    let ids = tree.node_ids().into_iter().map(String::from).collect::<Vec<_>>();

    // Every ordered pair, in a fixed scrambled order.
    for step in 0..(ids.len() * ids.len()) {
        let a = &ids[(step * 5) % ids.len()];
        let b = &ids[(step * 3 + 1) % ids.len()];
        let _ = tree.connect_nodes(a, b, "");
        assert!(!has_cycle(&tree));
        let mut seen = std::collections::HashSet::new();
        assert!(tree.edges().iter().all(|e| seen.insert(e.to.clone())));
    }
}

#[test]
fn test_errors_name_missing_nodes() {
    let mut tree = four_node_tree();
    assert_eq!(
        tree.connect_nodes("n1", "n9", ""),
        Err(TreeError::NotFound("n9".to_string()))
    );
    assert_eq!(
        tree.disconnect_nodes("n1", "n3"),
        Err(TreeError::NoSuchEdge {
            from: "n1".to_string(),
            to: "n3".to_string()
        })
    );
    assert_eq!(
        tree.connect_nodes("n2", "n3", "again"),
        Err(TreeError::DuplicateEdge {
            from: "n2".to_string(),
            to: "n3".to_string()
        })
    );
}

#[test]
fn test_ids_are_never_reused() {
    let mut tree = DecisionTree::new("t");
    tree.add_node(NodeType::Action, "a");
    tree.add_node(NodeType::Action, "b");
    tree.remove_node("n2").unwrap();
    assert_eq!(tree.add_node(NodeType::Action, "c"), "n3");
}

#[test]
fn test_children_follow_edge_order() {
    let tree = four_node_tree();
    let children: Vec<&str> = tree.children("n2").iter().map(|e| e.to.as_str()).collect();
    assert_eq!(children, vec!["n3", "n4"]);
    assert_eq!(tree.parent("n4").unwrap().label, "no");
}

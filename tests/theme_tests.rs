use dtree::document::node::NodeType;
use dtree::theme::{get_builtin_theme, list_builtin_themes, Theme};

#[test]
fn test_every_listed_theme_loads() {
    let names = list_builtin_themes();
    assert_eq!(names.len(), 4);
    for name in &names {
        let theme = get_builtin_theme(name).unwrap();
        assert_eq!(&theme.name, name);
    }
}

#[test]
fn test_default_theme_is_default_dark() {
    let theme = Theme::default();
    assert_eq!(theme.name, "default-dark");
    assert_eq!(
        theme.colors,
        get_builtin_theme("default-dark").unwrap().colors
    );
}

#[test]
fn test_node_types_are_distinguishable() {
    for name in list_builtin_themes() {
        let colors = get_builtin_theme(&name).unwrap().colors;
        let decision = colors.node_color(NodeType::Decision);
        for other in [NodeType::Action, NodeType::StartEnd, NodeType::IO] {
            assert_ne!(decision, colors.node_color(other), "{}: {:?}", name, other);
        }
    }
}

#[test]
fn test_unknown_theme() {
    assert!(get_builtin_theme("").is_none());
    assert!(get_builtin_theme("Nord").is_none());
}

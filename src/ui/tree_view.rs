//! Tree view rendering for the browser.
//!
//! Draws the flattened rows produced by [`crate::render::ascii::flatten`],
//! coloring each node's decoration by its type and highlighting the cursor.

use crate::document::tree::DecisionTree;
use crate::render::ascii::{decorate, Row};
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Shown in place of rows when the tree has no nodes.
pub const EMPTY_TREE_HINT: &str =
    "(empty tree: press 'a' to add a root, 'i' to init from a template)";

/// Text shown when there are no rows to draw.
pub fn placeholder(tree: &DecisionTree) -> &'static str {
    if tree.is_empty() {
        EMPTY_TREE_HINT
    } else if tree.root_id().is_none() {
        "(no root set: press 'a' to add a root)"
    } else {
        "(root node not found)"
    }
}

/// Renders the visible slice of rows.
///
/// # Arguments
///
/// * `f` - The ratatui frame to render into
/// * `area` - The rectangular area for the tree view
/// * `tree` - The tree the rows were built from, for node types
/// * `rows` - Every row, in display order
/// * `cursor` - Index of the selected row
/// * `offset` - Index of the first visible row
/// * `connect_from` - Source node while in connect mode
/// * `colors` - Theme colors
///
/// # Example
///
/// ```
/// use dtree::document::node::NodeType;
/// use dtree::document::tree::DecisionTree;
/// use dtree::render::ascii::flatten;
/// use dtree::theme::colors::ThemeColors;
/// use dtree::ui::tree_view::render_tree_view;
/// use ratatui::backend::TestBackend;
/// use ratatui::Terminal;
///
/// let mut tree = DecisionTree::new("t");
/// let id = tree.add_node(NodeType::Action, "Go");
/// tree.set_root(&id).unwrap();
/// let rows = flatten(&tree);
///
/// let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
/// let colors = ThemeColors::default_dark();
/// terminal
///     .draw(|f| render_tree_view(f, f.area(), &tree, &rows, 0, 0, None, &colors))
///     .unwrap();
/// ```
#[allow(clippy::too_many_arguments)]
pub fn render_tree_view(
    f: &mut Frame,
    area: Rect,
    tree: &DecisionTree,
    rows: &[Row],
    cursor: usize,
    offset: usize,
    connect_from: Option<&str>,
    colors: &ThemeColors,
) {
    let base = Style::default().bg(colors.background).fg(colors.foreground);

    if rows.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            placeholder(tree),
            Style::default().fg(colors.branch),
        )))
        .style(base);
        f.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(area.height as usize)
        .map(|(idx, row)| {
            let is_cursor = idx == cursor;
            let is_source = connect_from == Some(row.node_id.as_str());

            let marker = match (is_cursor, is_source) {
                (true, _) => "▶ ",
                (false, true) => "+ ",
                _ => "  ",
            };

            let (branch, decoration, node_color) = match tree.get_node(&row.node_id) {
                Some(node) => {
                    let decoration = decorate(node);
                    let branch = row
                        .text
                        .strip_suffix(decoration.as_str())
                        .unwrap_or(&row.text)
                        .to_string();
                    (branch, decoration, colors.node_color(node.node_type))
                }
                None => (row.text.clone(), String::new(), colors.foreground),
            };

            let mut node_style = Style::default().fg(node_color);
            if is_cursor {
                node_style = node_style.bg(colors.cursor).add_modifier(Modifier::BOLD);
            }
            if is_source {
                node_style = node_style.add_modifier(Modifier::UNDERLINED);
            }

            Line::from(vec![
                Span::raw(marker),
                Span::styled(branch, Style::default().fg(colors.branch)),
                Span::styled(decoration, node_style),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::NONE))
        .style(base);

    f.render_widget(paragraph, area);
}

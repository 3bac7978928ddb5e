//! Template picker popup for initializing an empty tree.

use crate::editor::templates::TreeTemplate;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Renders the template picker popup.
///
/// Each template is listed with its number, name and description. The
/// selected entry carries a `>` marker and the cursor background.
///
/// # Arguments
///
/// * `f` - The ratatui Frame to render into
/// * `templates` - The catalog, in display order
/// * `selected` - Index of the highlighted template
/// * `colors` - Theme colors for styling the picker
pub fn render_template_picker(
    f: &mut Frame,
    templates: &[TreeTemplate],
    selected: usize,
    colors: &ThemeColors,
) {
    let area = centered_rect(60, 50, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Init From Template ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.info))
        .style(Style::default().bg(colors.background));

    let mut lines = vec![Line::from("")];

    for (idx, template) in templates.iter().enumerate() {
        let is_selected = idx == selected;
        let cursor = if is_selected { "> " } else { "  " };
        let text = format!(
            "{}{}. {:<16} {}",
            cursor,
            idx + 1,
            template.name,
            template.description
        );

        let style = if is_selected {
            Style::default()
                .fg(colors.foreground)
                .bg(colors.cursor)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.foreground)
        };

        lines.push(Line::from(Span::styled(text, style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓: Navigate  1-9: Pick  Enter: Init  Esc: Cancel",
        Style::default()
            .fg(colors.info)
            .add_modifier(Modifier::ITALIC),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

/// Creates a rectangle centered in `r` with the given percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::templates;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_lists_every_template() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let colors = ThemeColors::default_dark();
        terminal
            .draw(|f| render_template_picker(f, templates::all(), 1, &colors))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");

        for template in templates::all() {
            assert!(screen.contains(template.name), "missing {}", template.name);
        }
        assert!(screen.contains("> 2. approval"));
    }

    #[test]
    fn test_centered_rect() {
        let area = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(area, Rect::new(25, 10, 50, 20));
    }
}

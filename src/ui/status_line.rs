//! Status line widget for the browser.
//!
//! In normal mode the line lists the key bindings; in connect mode it names
//! the pending source node instead.
//!
//! Example status line:
//! ` Connect n3 → ? (target must be detached) | ↑↓ Navigate  Enter Confirm  Esc Cancel`

use crate::input::BrowseMode;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const NORMAL_KEYS: &str = "↑↓ Move  e Edit  t Type  r Root  d Del  a Add  y Copy  p Paste  \
c Connect  D Disconnect  i Init  u Undo  ^R Redo  q Quit";

/// Builds the status text for the current mode.
///
/// # Example
///
/// ```
/// use dtree::input::BrowseMode;
/// use dtree::ui::status_line::status_text;
///
/// let text = status_text(BrowseMode::Connect, Some("n3"));
/// assert!(text.starts_with(" Connect n3 → ?"));
/// ```
pub fn status_text(mode: BrowseMode, connect_from: Option<&str>) -> String {
    match (mode, connect_from) {
        (BrowseMode::Connect, Some(from)) => format!(
            " Connect {} → ? (target must be detached) | ↑↓ Navigate  Enter Confirm  Esc Cancel",
            from
        ),
        _ => format!(" {}", NORMAL_KEYS),
    }
}

/// Renders the status line with the tree name and row position on the right.
///
/// # Arguments
///
/// * `f` - The ratatui frame to render into
/// * `area` - The rectangular area to render the status line in
/// * `mode` - Active browser mode
/// * `connect_from` - Source node while in connect mode
/// * `position` - Tree name and `(row, total)` shown on the right
/// * `colors` - Theme colors for styling the status line
pub fn render_status_line(
    f: &mut Frame,
    area: Rect,
    mode: BrowseMode,
    connect_from: Option<&str>,
    position: (&str, usize, usize),
    colors: &ThemeColors,
) {
    let left = status_text(mode, connect_from);
    let (name, row, total) = position;
    let right = if total == 0 {
        format!("{} ", name)
    } else {
        format!("{} {}/{} ", name, row + 1, total)
    };

    let bg = match mode {
        BrowseMode::Connect => colors.connect_mode_bg,
        BrowseMode::Normal => colors.status_line_bg,
    };
    let style = Style::default().fg(colors.status_line_fg).bg(bg);

    let width = area.width as usize;
    let used = left.chars().count() + right.chars().count();
    let padding = " ".repeat(width.saturating_sub(used));

    let line = Line::from(vec![
        Span::styled(left, style),
        Span::styled(padding, style),
        Span::styled(right, style),
    ]);
    f.render_widget(Paragraph::new(line).style(style), area);
}

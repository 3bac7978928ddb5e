//! Single-line text prompt shown in the message area.

use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// An open prompt: the question and what has been typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub label: String,
    pub buffer: String,
}

impl Prompt {
    pub fn new(label: impl Into<String>, initial: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            buffer: initial.into(),
        }
    }
}

/// Renders the prompt label, the buffer, and a block cursor at its end.
pub fn render_edit_prompt(f: &mut Frame, area: Rect, prompt: &Prompt, colors: &ThemeColors) {
    let text_style = Style::default()
        .fg(colors.foreground)
        .bg(colors.background)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(prompt.label.as_str(), text_style),
        Span::styled(prompt.buffer.as_str(), text_style),
        Span::styled(
            " ",
            Style::default()
                .fg(colors.background)
                .bg(colors.foreground),
        ),
    ]);
    let paragraph = Paragraph::new(line).style(Style::default().bg(colors.background));

    f.render_widget(paragraph, area);
}

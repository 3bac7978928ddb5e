//! Message area rendering for the one-line outcome of the last operation.

use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

/// A transient message shown on the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub level: MessageLevel,
}

impl Message {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
        }
    }
}

/// Renders the message, or a blank line when there is none.
pub fn render_message_area(
    f: &mut Frame,
    area: Rect,
    message: Option<&Message>,
    colors: &ThemeColors,
) {
    let content = match message {
        Some(message) => {
            let color = match message.level {
                MessageLevel::Error => colors.error,
                MessageLevel::Info => colors.info,
            };
            Line::from(vec![Span::styled(
                message.text.as_str(),
                Style::default().fg(color),
            )])
        }
        None => Line::from(""),
    };

    let paragraph =
        Paragraph::new(content).style(Style::default().bg(colors.background).fg(colors.foreground));

    f.render_widget(paragraph, area);
}

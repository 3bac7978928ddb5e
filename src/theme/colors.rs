//! Color definitions for dtree themes.
//!
//! [`ThemeColors`] holds every color the browser draws with. Colors fall into
//! three groups: one per node type, UI chrome, and message severities.

use crate::document::node::NodeType;
use ratatui::style::Color;

/// Defines all colors used in a dtree theme.
///
/// # Examples
///
/// ```
/// use dtree::document::node::NodeType;
/// use dtree::theme::colors::ThemeColors;
/// use ratatui::style::Color;
///
/// let dark = ThemeColors::default_dark();
/// assert_eq!(dark.node_color(NodeType::Decision), Color::Yellow);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    // Node colors
    /// Decision nodes.
    pub decision: Color,
    /// Action nodes.
    pub action: Color,
    /// Start and end nodes.
    pub start_end: Color,
    /// Input/output nodes.
    pub io: Color,
    /// Box-drawing connectors and edge labels.
    pub branch: Color,

    // UI colors
    /// Main background color.
    pub background: Color,
    /// Main foreground/text color.
    pub foreground: Color,
    /// Background of the selected row.
    pub cursor: Color,
    /// Background color for the status line.
    pub status_line_bg: Color,
    /// Foreground/text color for the status line.
    pub status_line_fg: Color,
    /// Status line background while picking a connect target.
    pub connect_mode_bg: Color,

    // Semantic colors
    /// Error messages.
    pub error: Color,
    /// Informational messages.
    pub info: Color,
}

impl ThemeColors {
    /// Returns the color for nodes of the given type.
    pub fn node_color(&self, node_type: NodeType) -> Color {
        match node_type {
            NodeType::Decision => self.decision,
            NodeType::Action => self.action,
            NodeType::StartEnd => self.start_end,
            NodeType::IO => self.io,
        }
    }

    /// Returns the default dark color scheme.
    ///
    /// Uses plain ANSI colors so the result follows the terminal's own palette.
    ///
    /// # Examples
    ///
    /// ```
    /// use dtree::theme::colors::ThemeColors;
    /// use ratatui::style::Color;
    ///
    /// let colors = ThemeColors::default_dark();
    /// assert_eq!(colors.background, Color::Reset);
    /// assert_eq!(colors.status_line_bg, Color::White);
    /// ```
    pub fn default_dark() -> Self {
        Self {
            decision: Color::Yellow,
            action: Color::LightBlue,
            start_end: Color::Green,
            io: Color::Magenta,
            branch: Color::DarkGray,

            background: Color::Reset,
            foreground: Color::Gray,
            cursor: Color::DarkGray,
            status_line_bg: Color::White,
            status_line_fg: Color::Black,
            connect_mode_bg: Color::Yellow,

            error: Color::Red,
            info: Color::LightBlue,
        }
    }

    /// Returns the default light color scheme.
    pub fn default_light() -> Self {
        Self {
            decision: Color::Rgb(152, 104, 1),
            action: Color::Rgb(1, 132, 188),
            start_end: Color::Rgb(80, 161, 79),
            io: Color::Rgb(166, 38, 164),
            branch: Color::Rgb(160, 161, 167),

            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(56, 58, 66),
            cursor: Color::Rgb(220, 220, 220),
            status_line_bg: Color::Rgb(238, 238, 238),
            status_line_fg: Color::Rgb(56, 58, 66),
            connect_mode_bg: Color::Rgb(255, 234, 167),

            error: Color::Rgb(202, 18, 67),
            info: Color::Rgb(1, 132, 188),
        }
    }

    /// Returns the Gruvbox Dark color scheme.
    pub fn gruvbox_dark() -> Self {
        Self {
            decision: Color::Rgb(250, 189, 47), // yellow
            action: Color::Rgb(131, 165, 152),  // aqua
            start_end: Color::Rgb(184, 187, 38), // green
            io: Color::Rgb(211, 134, 155),      // purple
            branch: Color::Rgb(146, 131, 116),  // gray

            background: Color::Rgb(40, 40, 40),
            foreground: Color::Rgb(235, 219, 178),
            cursor: Color::Rgb(80, 73, 69),
            status_line_bg: Color::Rgb(60, 56, 54),
            status_line_fg: Color::Rgb(235, 219, 178),
            connect_mode_bg: Color::Rgb(215, 153, 33),

            error: Color::Rgb(251, 73, 52),
            info: Color::Rgb(131, 165, 152),
        }
    }

    /// Returns the Nord color scheme.
    pub fn nord() -> Self {
        Self {
            decision: Color::Rgb(235, 203, 139),  // aurora yellow
            action: Color::Rgb(136, 192, 208),    // frost cyan
            start_end: Color::Rgb(163, 190, 140), // aurora green
            io: Color::Rgb(180, 142, 173),        // aurora purple
            branch: Color::Rgb(76, 86, 106),      // polar night gray

            background: Color::Rgb(46, 52, 64),
            foreground: Color::Rgb(216, 222, 233),
            cursor: Color::Rgb(67, 76, 94),
            status_line_bg: Color::Rgb(59, 66, 82),
            status_line_fg: Color::Rgb(216, 222, 233),
            connect_mode_bg: Color::Rgb(208, 135, 112),

            error: Color::Rgb(191, 97, 106),
            info: Color::Rgb(136, 192, 208),
        }
    }
}

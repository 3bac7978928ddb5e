//! Theme system for dtree.
//!
//! # Built-in Themes
//!
//! - `"default-dark"`: ANSI colors that follow the terminal palette
//! - `"default-light"`: A light theme for well-lit environments
//! - `"gruvbox-dark"`: Retro groove color scheme with warm tones
//! - `"nord"`: Arctic, north-bluish color palette
//!
//! # Examples
//!
//! ```
//! use dtree::theme::get_builtin_theme;
//!
//! let theme = get_builtin_theme("nord").unwrap();
//! assert_eq!(theme.name, "nord");
//! assert!(get_builtin_theme("neon").is_none());
//! ```

pub mod colors;

use colors::ThemeColors;

/// A named color theme for the browser.
#[derive(Debug, Clone)]
pub struct Theme {
    /// The name of the theme (e.g., "default-dark").
    pub name: String,
    /// The color definitions for this theme.
    pub colors: ThemeColors,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default-dark".to_string(),
            colors: ThemeColors::default_dark(),
        }
    }
}

/// Returns a built-in theme by name, or `None` if the name is not recognized.
pub fn get_builtin_theme(name: &str) -> Option<Theme> {
    let colors = match name {
        "default-dark" => ThemeColors::default_dark(),
        "default-light" => ThemeColors::default_light(),
        "gruvbox-dark" => ThemeColors::gruvbox_dark(),
        "nord" => ThemeColors::nord(),
        _ => return None,
    };
    Some(Theme {
        name: name.to_string(),
        colors,
    })
}

/// Returns the names accepted by [`get_builtin_theme`], sorted.
///
/// # Examples
///
/// ```
/// use dtree::theme::list_builtin_themes;
///
/// let themes = list_builtin_themes();
/// assert!(themes.contains(&"default-dark".to_string()));
/// ```
pub fn list_builtin_themes() -> Vec<String> {
    let mut themes = vec![
        "default-dark".to_string(),
        "default-light".to_string(),
        "gruvbox-dark".to_string(),
        "nord".to_string(),
    ];
    themes.sort();
    themes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_theme_resolves() {
        for name in list_builtin_themes() {
            let theme = get_builtin_theme(&name).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default().colors, ThemeColors::default_dark());
    }
}

//! Configuration system for dtree.
//!
//! Settings are read from `~/.config/dtree/config.toml`. Every field has a
//! default, so a missing file, a missing key or an unreadable file all fall
//! back to [`Config::default`].
//!
//! # Example
//!
//! ```
//! use dtree::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.theme, "default-dark");
//! assert_eq!(config.prompt, "> ");
//!
//! let custom: Config = toml::from_str("undo_limit = 20").unwrap();
//! assert_eq!(custom.undo_limit, 20);
//! assert_eq!(custom.input_history_size, 500);
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the dtree application.
///
/// # Fields
///
/// * `theme` - Color scheme name (default: "default-dark")
/// * `prompt` - REPL prompt text (default: "> ")
/// * `input_history_size` - Lines kept for Up/Down recall (default: 500)
/// * `undo_limit` - Maximum undo steps kept, 0 for unbounded (default: 1000)
/// * `default_tree_name` - Name given to a new empty tree (default: "untitled")
/// * `create_backup` - Create .bak files before saving (default: false)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Color scheme name
    #[serde(default = "default_theme")]
    pub theme: String,

    /// REPL prompt text
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Lines kept for Up/Down recall
    #[serde(default = "default_input_history_size")]
    pub input_history_size: usize,

    /// Maximum number of undo steps to keep
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,

    /// Name given to a new empty tree
    #[serde(default = "default_tree_name")]
    pub default_tree_name: String,

    /// Create .bak files before saving
    #[serde(default)]
    pub create_backup: bool,
}

fn default_theme() -> String {
    "default-dark".to_string()
}

fn default_prompt() -> String {
    "> ".to_string()
}

fn default_input_history_size() -> usize {
    crate::terminal::line_reader::DEFAULT_HISTORY_SIZE
}

fn default_undo_limit() -> usize {
    1000
}

fn default_tree_name() -> String {
    "untitled".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            prompt: default_prompt(),
            input_history_size: default_input_history_size(),
            undo_limit: default_undo_limit(),
            default_tree_name: default_tree_name(),
            create_backup: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/dtree/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("dtree");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(path),
            None => Self::default(),
        }
    }

    /// Loads configuration from an explicit path, falling back to defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "ignoring invalid config file");
                Self::default()
            }),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not read config file");
                Self::default()
            }
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(config_path)
    }

    /// Saves configuration to an explicit path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string).context("Failed to write config file")?;

        Ok(())
    }
}

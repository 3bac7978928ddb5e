//! Keyboard input for the interactive browser.

pub mod keys;

pub use keys::{map_key, BrowseMode, BrowserAction};

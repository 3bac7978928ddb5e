//! Browser key bindings.

use termion::event::Key;

/// Which set of bindings is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowseMode {
    #[default]
    Normal,
    /// Picking the destination of a new edge: only navigation, confirm and cancel.
    Connect,
}

/// What the user asked the browser to do.
///
/// These events represent intentions rather than specific key presses, so the
/// same action can be bound to several keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserAction {
    Quit,
    MoveUp,
    MoveDown,
    /// Prompt for a new label for the selected node
    EditLabel,
    /// Rotate the selected node's type
    CycleType,
    SetRoot,
    Delete,
    /// Add a child under the selected node (or a root on an empty tree)
    AddChild,
    Copy,
    /// Paste the clipboard under the selected node
    Paste,
    /// Start connect mode from the selected node
    Connect,
    /// Detach the selected node from its parent
    Disconnect,
    /// Replace an empty tree with a template
    Init,
    Undo,
    Redo,
    ConfirmConnect,
    CancelConnect,
    Unknown,
}

/// Maps a key to an action under the given mode. Bindings are case-sensitive.
///
/// # Example
///
/// ```
/// use termion::event::Key;
/// use dtree::input::keys::{map_key, BrowseMode, BrowserAction};
///
/// assert_eq!(map_key(Key::Char('j'), BrowseMode::Normal), BrowserAction::MoveDown);
/// assert_eq!(map_key(Key::Char('D'), BrowseMode::Normal), BrowserAction::Disconnect);
/// assert_eq!(map_key(Key::Char('d'), BrowseMode::Connect), BrowserAction::Unknown);
/// ```
pub fn map_key(key: Key, mode: BrowseMode) -> BrowserAction {
    match mode {
        BrowseMode::Normal => match key {
            Key::Char('q') | Key::Esc => BrowserAction::Quit,
            Key::Char('k') | Key::Up => BrowserAction::MoveUp,
            Key::Char('j') | Key::Down => BrowserAction::MoveDown,
            Key::Char('e') => BrowserAction::EditLabel,
            Key::Char('t') => BrowserAction::CycleType,
            Key::Char('r') => BrowserAction::SetRoot,
            Key::Char('d') => BrowserAction::Delete,
            Key::Char('a') => BrowserAction::AddChild,
            Key::Char('y') => BrowserAction::Copy,
            Key::Char('p') => BrowserAction::Paste,
            Key::Char('c') => BrowserAction::Connect,
            Key::Char('D') => BrowserAction::Disconnect,
            Key::Char('i') => BrowserAction::Init,
            Key::Char('u') => BrowserAction::Undo,
            Key::Ctrl('r') => BrowserAction::Redo,
            _ => BrowserAction::Unknown,
        },
        BrowseMode::Connect => match key {
            Key::Char('k') | Key::Up => BrowserAction::MoveUp,
            Key::Char('j') | Key::Down => BrowserAction::MoveDown,
            Key::Char('\n') => BrowserAction::ConfirmConnect,
            Key::Esc | Key::Char('q') => BrowserAction::CancelConnect,
            _ => BrowserAction::Unknown,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_mode_bindings() {
        let cases = [
            (Key::Char('q'), BrowserAction::Quit),
            (Key::Esc, BrowserAction::Quit),
            (Key::Up, BrowserAction::MoveUp),
            (Key::Char('e'), BrowserAction::EditLabel),
            (Key::Char('t'), BrowserAction::CycleType),
            (Key::Char('r'), BrowserAction::SetRoot),
            (Key::Char('d'), BrowserAction::Delete),
            (Key::Char('a'), BrowserAction::AddChild),
            (Key::Char('y'), BrowserAction::Copy),
            (Key::Char('p'), BrowserAction::Paste),
            (Key::Char('c'), BrowserAction::Connect),
            (Key::Char('i'), BrowserAction::Init),
            (Key::Char('u'), BrowserAction::Undo),
            (Key::Ctrl('r'), BrowserAction::Redo),
        ];
        for (key, action) in cases {
            assert_eq!(map_key(key, BrowseMode::Normal), action, "{:?}", key);
        }
    }

    #[test]
    fn test_bindings_are_case_sensitive() {
        assert_eq!(map_key(Key::Char('d'), BrowseMode::Normal), BrowserAction::Delete);
        assert_eq!(
            map_key(Key::Char('D'), BrowseMode::Normal),
            BrowserAction::Disconnect
        );
        assert_eq!(map_key(Key::Char('Q'), BrowseMode::Normal), BrowserAction::Unknown);
    }

    #[test]
    fn test_connect_mode_restricts_input() {
        assert_eq!(
            map_key(Key::Char('\n'), BrowseMode::Connect),
            BrowserAction::ConfirmConnect
        );
        assert_eq!(map_key(Key::Esc, BrowseMode::Connect), BrowserAction::CancelConnect);
        assert_eq!(map_key(Key::Char('j'), BrowseMode::Connect), BrowserAction::MoveDown);
        for c in ['e', 'd', 'a', 'u', 'p'] {
            assert_eq!(map_key(Key::Char(c), BrowseMode::Connect), BrowserAction::Unknown);
        }
    }
}

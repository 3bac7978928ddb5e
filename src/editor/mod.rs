//! Editing engine.
//!
//! Everything that changes a tree after it has been loaded lives here: the
//! reversible command layer, subtree copy/paste, the per-session state and the
//! catalog of starter templates.
//!
//! # Modules
//!
//! - `undo`: Reversible commands and the undo/redo history
//! - `clipboard`: Subtree snapshots and paste with fresh IDs
//! - `session`: Tree, history and clipboard owned together
//! - `templates`: Built-in starter trees
//!
//! # Example
//!
//! ```
//! use dtree::editor::session::Session;
//! use dtree::editor::templates;
//!
//! let tree = templates::find("auth-flow").unwrap().instantiate().unwrap();
//! let mut session = Session::new(tree);
//! assert_eq!(session.copy("n2").unwrap(), 4);
//! ```

pub mod clipboard;
pub mod session;
pub mod templates;
pub mod undo;

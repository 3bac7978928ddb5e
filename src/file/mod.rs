//! Reading and writing decision tree documents.
//!
//! Trees are stored as pretty-printed JSON. Paths ending in `.gz` are
//! transparently gzip-compressed on save and decompressed on load.
//!
//! # Modules
//!
//! - `loader`: Parse and validate a document from disk
//! - `saver`: Atomic writes with optional `.bak` backup

pub mod loader;
pub mod saver;

use std::path::Path;

/// True when the path's final extension is `gz`.
pub(crate) fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false)
}

//! Decision tree data model.
//!
//! # Modules
//!
//! - `node`: Node types, nodes and edges
//! - `tree`: The tree container and its read-only queries
//! - `ops`: Validated structural mutations
//! - `error`: The closed set of structural and history errors

pub mod error;
pub mod node;
pub mod ops;
pub mod tree;

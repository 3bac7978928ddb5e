//! Decision tree loading.

use super::is_gzipped;
use crate::document::tree::DecisionTree;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Loads a decision tree document from disk.
///
/// The document must pass [`DecisionTree::validate`]: every node is keyed by
/// its own ID, a set root has to exist and every edge endpoint has to name a
/// stored node. A document without a `nodes` map loads as an empty tree. A
/// missing or stale `counter` is raised past the highest `n<digits>` ID.
///
/// # Arguments
///
/// * `path` - The document to read. A `.gz` suffix selects gzip decoding.
///
/// # Examples
///
/// ```no_run
/// use dtree::file::loader::load_tree;
///
/// let tree = load_tree("flow.json").unwrap();
/// println!("{} nodes", tree.node_count());
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read or decompressed, is not a valid
/// tree document, or fails validation.
pub fn load_tree<P: AsRef<Path>>(path: P) -> Result<DecisionTree> {
    let path = path.as_ref();

    let content = if is_gzipped(path) {
        read_gzipped_file(path)?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    parse_tree(&content)
}

/// Parses and validates a document held in memory.
///
/// # Errors
///
/// Returns an error if the text is not a tree document or fails validation.
pub fn parse_tree(content: &str) -> Result<DecisionTree> {
    let mut tree: DecisionTree =
        serde_json::from_str(content).context("Failed to parse decision tree")?;
    tree.validate().context("Invalid decision tree")?;
    tree.sync_counter();
    Ok(tree)
}

fn read_gzipped_file(path: &Path) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzip file")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_document() {
        let doc = r#"{
            "name": "rain",
            "root_id": "n1",
            "nodes": {
                "n1": {"id": "n1", "type": 0, "label": "Is it raining?"},
                "n2": {"id": "n2", "type": 1, "label": "Take umbrella"}
            },
            "edges": [{"from": "n1", "to": "n2", "label": "yes"}],
            "counter": 2
        }"#;
        let mut tree = parse_tree(doc).unwrap();
        assert_eq!(tree.name, "rain");
        assert_eq!(tree.root_id(), Some("n1"));
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.edges()[0].label, "yes");
        assert_eq!(tree.next_id(), "n3");
    }

    #[test]
    fn test_missing_nodes_map_is_empty_tree() {
        let tree = parse_tree(r#"{"name": "bare", "root_id": ""}"#).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.root_id(), None);
    }

    #[test]
    fn test_rejects_dangling_edge() {
        let doc = r#"{
            "name": "bad",
            "nodes": {"n1": {"id": "n1", "type": 1, "label": "a"}},
            "edges": [{"from": "n1", "to": "n9"}]
        }"#;
        let err = parse_tree(doc).unwrap_err();
        assert!(format!("{:#}", err).contains("n9"));
    }

    #[test]
    fn test_rejects_missing_root() {
        let err = parse_tree(r#"{"name": "bad", "root_id": "n4"}"#).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid decision tree"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "f", "nodes": {{"n1": {{"id": "n1", "type": 2, "label": "Start"}}}}, "counter": 1}}"#
        )
        .unwrap();

        let tree = load_tree(file.path()).unwrap();
        assert_eq!(tree.get_node("n1").unwrap().label, "Start");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_tree(dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}

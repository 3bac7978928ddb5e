//! Decision tree saving.
//!
//! Writes go to a sibling temp file that is then renamed over the target, so
//! a crash mid-write never leaves a truncated document behind.

use super::is_gzipped;
use crate::config::Config;
use crate::document::tree::DecisionTree;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Saves a tree as pretty-printed JSON.
///
/// When `config.create_backup` is set and the target already exists, the
/// previous contents are first copied to `<name>.bak`.
///
/// # Arguments
///
/// * `path` - Destination. A `.gz` suffix selects gzip compression.
/// * `tree` - The tree to write
/// * `config` - Supplies the backup setting
///
/// # Examples
///
/// ```no_run
/// use dtree::config::Config;
/// use dtree::document::tree::DecisionTree;
/// use dtree::file::saver::save_tree;
///
/// let tree = DecisionTree::new("empty");
/// save_tree("empty.json", &tree, &Config::default()).unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the backup, the temp file write, or the final rename
/// fails.
pub fn save_tree<P: AsRef<Path>>(path: P, tree: &DecisionTree, config: &Config) -> Result<()> {
    let path = path.as_ref();

    if config.create_backup && path.exists() {
        create_backup(path)?;
    }

    let mut json = serde_json::to_string_pretty(tree).context("Failed to serialize tree")?;
    json.push('\n');

    write_file_atomic(path, json.as_bytes(), is_gzipped(path))?;
    tracing::debug!(path = %path.display(), nodes = tree.node_count(), "saved tree");
    Ok(())
}

/// Copies the file to `<name>.bak` next to it.
fn create_backup(path: &Path) -> Result<()> {
    let mut backup_path = path.to_path_buf();
    let original_name = backup_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    backup_path.set_file_name(format!("{}.bak", original_name));
    fs::copy(path, backup_path).context("Failed to create backup")?;
    Ok(())
}

fn write_file_atomic(path: &Path, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let temp_path = path.with_extension("tmp");

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(&temp_path, path).context("Failed to rename temp file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::NodeType;
    use crate::file::loader::load_tree;
    use tempfile::tempdir;

    fn sample() -> DecisionTree {
        let mut tree = DecisionTree::new("rain");
        tree.add_node(NodeType::Decision, "Is it raining?");
        tree.add_node(NodeType::Action, "Take umbrella");
        tree.connect_nodes("n1", "n2", "yes").unwrap();
        tree.set_root("n1").unwrap();
        tree
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rain.json");
        save_tree(&path, &sample(), &Config::default()).unwrap();

        assert_eq!(load_tree(&path).unwrap(), sample());
        assert!(!dir.path().join("rain.tmp").exists());
    }

    #[test]
    fn test_document_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rain.json");
        let mut tree = sample();
        tree.add_node(NodeType::IO, "Print");
        tree.connect_nodes("n2", "n3", "").unwrap();
        save_tree(&path, &tree, &Config::default()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["root_id"], "n1");
        assert_eq!(value["counter"], 3);
        assert_eq!(value["nodes"]["n2"]["type"], 1);
        assert_eq!(value["edges"][0]["label"], "yes");
        assert!(value["edges"][1].get("label").is_none());
    }

    #[test]
    fn test_gzip_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rain.json.gz");
        save_tree(&path, &sample(), &Config::default()).unwrap();

        let raw = fs::read(&path).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);
        assert_eq!(load_tree(&path).unwrap(), sample());
    }

    #[test]
    fn test_backup_created_when_enabled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rain.json");
        fs::write(&path, "old contents").unwrap();

        let config = Config {
            create_backup: true,
            ..Config::default()
        };
        save_tree(&path, &sample(), &config).unwrap();

        let backup = dir.path().join("rain.json.bak");
        assert_eq!(fs::read_to_string(backup).unwrap(), "old contents");
    }

    #[test]
    fn test_no_backup_by_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rain.json");
        fs::write(&path, "old").unwrap();
        save_tree(&path, &sample(), &Config::default()).unwrap();
        assert!(!dir.path().join("rain.json.bak").exists());
    }
}

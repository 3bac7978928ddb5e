use dtree::config::Config;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    assert_eq!(Config::load_from(dir.path().join("nope.toml")), Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "theme = \"nord\"\nprompt = \"dtree> \"\n").unwrap();

    let config = Config::load_from(&path);
    assert_eq!(config.theme, "nord");
    assert_eq!(config.prompt, "dtree> ");
    assert_eq!(config.undo_limit, 1000);
    assert_eq!(config.default_tree_name, "untitled");
    assert!(!config.create_backup);
}

#[test]
fn test_invalid_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "undo_limit = \"lots\"").unwrap();
    assert_eq!(Config::load_from(&path), Config::default());
}

#[test]
fn test_save_creates_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("dtree").join("config.toml");
    let config = Config {
        theme: "gruvbox-dark".to_string(),
        input_history_size: 50,
        create_backup: true,
        ..Config::default()
    };

    config.save_to(&path).unwrap();
    assert_eq!(Config::load_from(&path), config);
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/dtree/config.toml"));
    }
}

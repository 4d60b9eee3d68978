//! Integration tests for Configuration System

use super::test_utils::{with_config_home, write_files};
use codecity::config::ConfigLoader;
use codecity::layout::{build_layout, ExhaustedPolicy, TieBreak};
use codecity::tree::SourceTree;
use tempfile::TempDir;

#[test]
fn test_layered_sources_merge_in_order() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("workspace");
    write_files(
        test_dir.path(),
        &[(
            "config/codecity/config.toml",
            "[layout]\ncell_size = 3.0\ntie_break = \"prefer_south\"\nmax_anchor_attempts = 64\n",
        )],
    );
    write_files(
        &workspace,
        &[(
            ".codecity/config.toml",
            "[layout]\ncell_size = 5.0\n\n[walk]\nignore_patterns = [\"vendor\"]\n",
        )],
    );

    let config = with_config_home(&test_dir, || ConfigLoader::load(&workspace).unwrap());
    assert_eq!(config.layout.cell_size, 5.0);
    assert_eq!(config.layout.tie_break, TieBreak::PreferSouth);
    assert_eq!(config.layout.max_anchor_attempts, 64);
    assert_eq!(config.walk.ignore_patterns, vec!["vendor".to_string()]);
    assert_eq!(config.layout.on_exhausted, ExhaustedPolicy::Abort);
}

#[test]
fn test_env_specific_workspace_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("workspace");
    write_files(
        &workspace,
        &[
            (".codecity/config.toml", "[layout]\nmax_depth = 4\n"),
            (".codecity/ci.toml", "[layout]\nmax_depth = 1\non_exhausted = \"omit\"\n"),
        ],
    );

    let config = with_config_home(&test_dir, || {
        std::env::set_var("CODECITY_ENV", "ci");
        ConfigLoader::load(&workspace).unwrap()
    });
    assert_eq!(config.layout.max_depth, Some(1));
    assert_eq!(config.layout.on_exhausted, ExhaustedPolicy::Omit);
}

#[test]
fn test_loaded_config_drives_layout() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("city.toml");
    std::fs::write(&config_file, "[layout]\ntie_break = \"prefer_south\"\n").unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let tree = SourceTree::from_paths(["a.py", "b/c.py"]).unwrap();
    let layout = build_layout(&tree, &config.layout).unwrap();

    let b = layout.street("b").unwrap();
    assert_eq!(b.start.1, -2);
    assert_eq!(b.end, (3, -4));
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("city.toml");
    std::fs::write(&config_file, "[layout]\nmax_anchor_attempts = 0\n").unwrap();
    assert!(ConfigLoader::load_from_file(&config_file).is_err());
}

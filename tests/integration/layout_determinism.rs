//! Layouts depend only on the tree and the configuration

use super::test_utils::write_files;
use codecity::layout::{build_layout, LayoutBuilder, LayoutConfig, TieBreak};
use codecity::tree::walker::Walker;
use codecity::tree::SourceTree;
use tempfile::TempDir;

fn mixed_tree() -> SourceTree {
    SourceTree::from_paths([
        "Cargo.toml",
        "src/lib.rs",
        "src/layout/grid.rs",
        "src/layout/tile.rs",
        "src/tree/node.rs",
        "docs/guide.md",
        "tests/it.rs",
    ])
    .unwrap()
}

#[test]
fn test_repeated_builds_are_identical() {
    let tree = mixed_tree();
    let builder = LayoutBuilder::new(LayoutConfig::default());
    let first = builder.build(&tree).unwrap();
    let second = builder.build(&tree).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_input_order_does_not_matter() {
    let forward = mixed_tree();
    let reversed = SourceTree::from_paths([
        "tests/it.rs",
        "docs/guide.md",
        "src/tree/node.rs",
        "src/layout/tile.rs",
        "src/layout/grid.rs",
        "src/lib.rs",
        "Cargo.toml",
    ])
    .unwrap();
    assert_eq!(forward, reversed);

    let config = LayoutConfig::default();
    assert_eq!(
        build_layout(&forward, &config).unwrap(),
        build_layout(&reversed, &config).unwrap()
    );
}

#[test]
fn test_tie_break_changes_layout() {
    let tree = mixed_tree();
    let north = build_layout(&tree, &LayoutConfig::default()).unwrap();
    let south = build_layout(
        &tree,
        &LayoutConfig {
            tie_break: TieBreak::PreferSouth,
            ..LayoutConfig::default()
        },
    )
    .unwrap();
    assert_ne!(north.grid, south.grid);
}

#[test]
fn test_same_directory_scans_to_same_layout() {
    let temp_dir = TempDir::new().unwrap();
    write_files(
        temp_dir.path(),
        &[
            ("a/one.txt", "1\n"),
            ("a/two.txt", "2\n"),
            ("b/c/three.txt", "3\n"),
            ("root.txt", "r\n"),
        ],
    );

    let config = LayoutConfig::default();
    let scan = || Walker::new(temp_dir.path().to_path_buf()).scan().unwrap();
    let first = build_layout(&scan(), &config).unwrap();
    let second = build_layout(&scan(), &config).unwrap();
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

//! Scanning real directories into source trees and laying them out

use super::test_utils::write_files;
use codecity::layout::{build_layout, LayoutConfig, TileKind};
use codecity::tree::walker::{Walker, WalkerConfig};
use codecity::tree::{NodeType, SourceTree};
use tempfile::TempDir;

fn sample_workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_files(
        temp_dir.path(),
        &[
            ("README.md", "# sample\n"),
            ("src/main.rs", "fn main() {\n    lib::run();\n}\n"),
            ("src/lib.rs", "pub fn run() {}\n"),
            ("src/util/strings.rs", "\n"),
            ("target/debug/out.bin", "ignored"),
            (".git/HEAD", "ref: refs/heads/main\n"),
        ],
    );
    temp_dir
}

#[test]
fn test_scan_builds_linked_tree() {
    let workspace = sample_workspace();
    let tree = Walker::new(workspace.path().to_path_buf()).scan().unwrap();

    assert_eq!(tree.root().child_paths, vec!["README.md", "src"]);
    let src = tree.node("src").unwrap();
    assert_eq!(src.node_type, NodeType::Tree);
    assert_eq!(src.child_paths, vec!["src/lib.rs", "src/main.rs", "src/util"]);
    assert_eq!(tree.node("src/main.rs").unwrap().num_lines, Some(3));
    assert_eq!(tree.node("src/util/strings.rs").unwrap().depth, 3);
    assert!(tree.get("target").is_none());
    assert!(tree.get(".git").is_none());
}

#[test]
fn test_custom_ignore_patterns() {
    let workspace = sample_workspace();
    let config = WalkerConfig {
        ignore_patterns: vec!["util".to_string(), ".git".to_string()],
        ..WalkerConfig::default()
    };
    let tree = Walker::with_config(workspace.path().to_path_buf(), config)
        .scan()
        .unwrap();

    assert!(tree.get("src/util").is_none());
    assert!(tree.get("target/debug/out.bin").is_some());
}

#[test]
fn test_scanned_tree_survives_json_round_trip() {
    let workspace = sample_workspace();
    let tree = Walker::new(workspace.path().to_path_buf()).scan().unwrap();
    let parsed = SourceTree::from_json(&tree.to_json().unwrap()).unwrap();
    assert_eq!(parsed, tree);
}

#[test]
fn test_scanned_tree_lays_out_every_file() {
    let workspace = sample_workspace();
    let tree = Walker::new(workspace.path().to_path_buf()).scan().unwrap();
    let layout = build_layout(&tree, &LayoutConfig::default()).unwrap();

    for file in tree.files() {
        let buildings = layout
            .grid
            .cells()
            .filter(|(_, _, tile)| tile.kind == TileKind::Building && tile.owner_path == file.path)
            .count();
        assert_eq!(buildings, 1, "building count for {}", file.path);
    }
    assert_eq!(layout.streets.len(), tree.directories().count());
}

#[test]
fn test_line_counts_set_building_stories() {
    let temp_dir = TempDir::new().unwrap();
    let long = "x\n".repeat(51);
    let huge = "x\n".repeat(4001);
    write_files(
        temp_dir.path(),
        &[("short.rs", "x\n"), ("long.rs", long.as_str()), ("lib/huge.rs", huge.as_str())],
    );
    let tree = Walker::new(temp_dir.path().to_path_buf()).scan().unwrap();
    let layout = build_layout(&tree, &LayoutConfig::default()).unwrap();

    let root = layout.street(".").unwrap();
    assert_eq!(root.buildings["short.rs"], 1);
    assert_eq!(root.buildings["long.rs"], 2);
    assert_eq!(layout.street("lib").unwrap().buildings["lib/huge.rs"], 10);
}

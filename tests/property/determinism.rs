//! Property-based tests for determinism guarantees

use super::strategies::{file_path, source_tree};
use codecity::layout::{build_layout, LayoutConfig, TieBreak};
use codecity::tree::SourceTree;
use proptest::prelude::*;

/// Building the same tree twice yields the same layout
#[test]
fn test_layout_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&source_tree(), |tree| {
            let config = LayoutConfig::default();
            let first = build_layout(&tree, &config).unwrap();
            let second = build_layout(&tree, &config).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
            Ok(())
        })
        .unwrap();
}

/// The order paths are listed in never reaches the layout
#[test]
fn test_path_order_independence_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &prop::collection::vec(file_path(), 1..16).prop_shuffle(),
            |paths| {
                let mut sorted = paths.clone();
                sorted.sort();
                let shuffled = SourceTree::from_paths(&paths).unwrap();
                let ordered = SourceTree::from_paths(&sorted).unwrap();
                prop_assert_eq!(&shuffled, &ordered);

                let config = LayoutConfig {
                    tie_break: TieBreak::Alternate,
                    ..LayoutConfig::default()
                };
                prop_assert_eq!(
                    build_layout(&shuffled, &config).unwrap(),
                    build_layout(&ordered, &config).unwrap()
                );
                Ok(())
            },
        )
        .unwrap();
}

/// Trees survive the flat JSON wire form unchanged
#[test]
fn test_tree_json_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&source_tree(), |tree| {
            let json = tree.to_json().unwrap();
            let parsed = SourceTree::from_json(&json).unwrap();
            prop_assert_eq!(&parsed, &tree);
            prop_assert_eq!(parsed.to_json().unwrap(), json);
            Ok(())
        })
        .unwrap();
}

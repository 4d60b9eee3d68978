//! Structural invariants of generated layouts

use super::strategies::source_tree;
use codecity::layout::{build_layout, CityLayout, LayoutConfig, TieBreak, TileKind, Transform};
use codecity::tree::SourceTree;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};

const NEIGHBOURS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn any_tie_break() -> impl Strategy<Value = TieBreak> {
    prop_oneof![
        Just(TieBreak::PreferNorth),
        Just(TieBreak::PreferSouth),
        Just(TieBreak::Alternate),
    ]
}

fn layout_with(tree: &SourceTree, tie_break: TieBreak) -> CityLayout {
    let config = LayoutConfig {
        tie_break,
        ..LayoutConfig::default()
    };
    build_layout(tree, &config).unwrap()
}

fn count_owned(layout: &CityLayout, kind: TileKind, owner: &str) -> usize {
    layout
        .grid
        .cells()
        .filter(|(_, _, tile)| tile.kind == kind && tile.owner_path == owner)
        .count()
}

/// Every directory gets exactly one start and one end marker, every file
/// exactly one building, and no tile names a path outside the tree
#[test]
fn test_markers_and_buildings_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(source_tree(), any_tie_break()), |(tree, tie_break)| {
            let layout = layout_with(&tree, tie_break);

            for dir in tree.directories() {
                prop_assert_eq!(count_owned(&layout, TileKind::DirStart, &dir.path), 1);
                prop_assert_eq!(count_owned(&layout, TileKind::DirEnd, &dir.path), 1);
            }
            for file in tree.files() {
                prop_assert_eq!(count_owned(&layout, TileKind::Building, &file.path), 1);
            }
            prop_assert_eq!(
                layout.grid.count_kind(TileKind::Building),
                tree.files().count()
            );
            for (_, _, tile) in layout.grid.cells() {
                prop_assert!(tree.get(&tile.owner_path).is_some());
            }
            prop_assert_eq!(layout.streets.len(), tree.directories().count());
            Ok(())
        })
        .unwrap();
}

/// All road tiles form one network reachable from the root's start, and each
/// building faces a road of the street it belongs to
#[test]
fn test_connectivity_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(source_tree(), any_tie_break()), |(tree, tie_break)| {
            let layout = layout_with(&tree, tie_break);
            let grid = &layout.grid;
            let walkable = |x: i64, y: i64| grid.get(x, y).is_some_and(|t| t.kind.is_walkable());

            let mut seen = HashSet::from([(0, 0)]);
            let mut queue = VecDeque::from([(0, 0)]);
            while let Some((x, y)) = queue.pop_front() {
                for (dx, dy) in NEIGHBOURS {
                    let next = (x + dx, y + dy);
                    if walkable(next.0, next.1) && seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
            let walkable_count = grid.cells().filter(|(_, _, t)| t.kind.is_walkable()).count();
            prop_assert_eq!(seen.len(), walkable_count);

            for (x, y, tile) in grid.cells().filter(|(_, _, t)| t.kind == TileKind::Building) {
                let street = tile.parent_path.as_deref();
                let faces_road = NEIGHBOURS.iter().any(|(dx, dy)| {
                    grid.get(x + dx, y + dy).is_some_and(|n| {
                        n.kind == TileKind::Road && Some(n.owner_path.as_str()) == street
                    })
                });
                prop_assert!(faces_road, "{} at ({}, {}) has no road", tile.owner_path, x, y);
            }
            Ok(())
        })
        .unwrap();
}

/// Street records point at their own markers in root coordinates, and a
/// branch's junction sits on its parent's spine
#[test]
fn test_street_endpoints_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(source_tree(), any_tie_break()), |(tree, tie_break)| {
            let layout = layout_with(&tree, tie_break);

            for street in layout.streets.values() {
                let start = layout.grid.get(street.start.0, street.start.1);
                prop_assert!(start.is_some_and(|t| t.kind == TileKind::DirStart && t.owner_path == street.path));
                let end = layout.grid.get(street.end.0, street.end.1);
                prop_assert!(end.is_some_and(|t| t.kind == TileKind::DirEnd && t.owner_path == street.path));
                prop_assert_eq!(street.frame.apply((0, 0)), street.start);

                if let Some(branch) = &street.branch {
                    let parent = &layout.streets[&branch.parent];
                    let junction = parent.frame.apply((branch.anchor.x, 0));
                    let tile = layout.grid.get(junction.0, junction.1);
                    prop_assert!(tile.is_some_and(|t| t.kind == TileKind::Intersection && t.owner_path == street.path));
                    prop_assert_eq!(parent.frame.apply((branch.anchor.x, branch.anchor.y)), street.start);
                }
            }
            Ok(())
        })
        .unwrap();
}

fn owned_by_subtree(owner: &str, root: &str) -> bool {
    owner == root
        || owner
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Root-frame cell back into a street's local frame
///
/// Frames only rotate and reflect by quarter turns, so the inverse is the
/// transpose applied after removing the offset.
fn to_local(frame: &Transform, (x, y): (i64, i64)) -> (i64, i64) {
    let origin = frame.apply((0, 0));
    let along = frame.apply((1, 0));
    let across = frame.apply((0, 1));
    let (dx, dy) = (x - origin.0, y - origin.1);
    (
        dx * (along.0 - origin.0) + dy * (along.1 - origin.1),
        dx * (across.0 - origin.0) + dy * (across.1 - origin.1),
    )
}

/// An embedded subtree touches its parent's spine only at its own junction,
/// stays on its branch side otherwise, and sibling subtrees share no cell
#[test]
fn test_collision_law_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(source_tree(), any_tie_break()), |(tree, tie_break)| {
            let layout = layout_with(&tree, tie_break);

            for street in layout.streets.values() {
                let Some(branch) = &street.branch else {
                    continue;
                };
                let parent = &layout.streets[&branch.parent];
                let d = branch.side.sign();

                for (x, y, tile) in layout.grid.cells() {
                    if !owned_by_subtree(&tile.owner_path, &street.path) {
                        continue;
                    }
                    let (lx, ly) = to_local(&parent.frame, (x, y));
                    let in_junction = tile.owner_path == street.path
                        && (lx - branch.anchor.x).abs() <= 1
                        && ly.abs() <= 1;

                    if ly == 0 {
                        let expected = if lx == branch.anchor.x {
                            TileKind::Intersection
                        } else {
                            TileKind::Crosswalk
                        };
                        prop_assert!(in_junction, "{} on spine of {} at ({}, {})", tile.owner_path, parent.path, lx, ly);
                        prop_assert_eq!(tile.kind, expected);
                    } else if !(in_junction && tile.kind == TileKind::Crosswalk) {
                        prop_assert!(ly * d > 0, "{} crossed to the wrong side of {}", tile.owner_path, parent.path);
                    }
                }
            }

            let mut claimed: HashMap<(i64, i64), &str> = HashMap::new();
            for street in layout.streets.values().filter(|s| s.branch.is_some()) {
                let cells: HashSet<(i64, i64)> = layout
                    .grid
                    .cells()
                    .filter(|(_, _, t)| owned_by_subtree(&t.owner_path, &street.path))
                    .map(|(x, y, _)| (x, y))
                    .collect();
                for cell in cells {
                    if let Some(other) = claimed.insert(cell, &street.path) {
                        // only an ancestor street may already hold the cell
                        prop_assert!(
                            owned_by_subtree(&street.path, other) || owned_by_subtree(other, &street.path),
                            "{} and {} share {:?}", other, street.path, cell
                        );
                    }
                }
            }
            Ok(())
        })
        .unwrap();
}

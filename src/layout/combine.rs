//! Grid combiner: splice a child street into a parent grid

use crate::error::CombineError;
use crate::layout::grid::Grid;
use crate::layout::tile::{Tile, TileKind};
use crate::layout::transform::{Anchor, Side, Transform};
use std::collections::HashSet;

/// Rows a junction reserves on each crosswalk column
const JUNCTION_ROWS: [i64; 3] = [-1, 0, 1];

/// Try to embed `child` (owned by `child_path`) into `parent` at `anchor`,
/// branching toward `side`.
///
/// The junction is a 3-column block centered on `anchor.x`: crosswalks on
/// `x ± 1` for rows -1..=1 and an intersection on the spine. The child's
/// road is extended with `|anchor.y| - 1` filler road tiles so it reaches
/// from the junction out to `anchor.y`, and every child cell is mapped
/// through [`Transform::branch`].
///
/// Fails with `OverlappingRoad` when a mapped child cell would land on or
/// past the parent spine, and with `Occupied` when any junction, filler or
/// child cell hits a taken cell. Neither input is modified; on success a new
/// grid is returned.
pub fn combine(
    parent: &Grid,
    child: &Grid,
    child_path: &str,
    parent_path: &str,
    anchor: Anchor,
    side: Side,
) -> Result<Grid, CombineError> {
    let d = side.sign();
    let reach = anchor.y.abs();
    if reach < 1 {
        return Err(CombineError::OverlappingRoad {
            x: anchor.x,
            y: anchor.y,
        });
    }

    let transform = Transform::branch(anchor, side);
    let mapped: Vec<(i64, i64, &Tile)> = child
        .cells()
        .map(|(cx, cy, tile)| {
            let (tx, ty) = transform.apply((cx, cy));
            (tx, ty, tile)
        })
        .collect();

    if let Some(&(x, y, _)) = mapped.iter().find(|(_, ty, _)| ty * d <= 0) {
        return Err(CombineError::OverlappingRoad { x, y });
    }

    let branch_tile = |kind: TileKind| Tile::new(kind, child_path, Some(parent_path.to_string()));
    let mut staged: Vec<((i64, i64), Tile)> = Vec::with_capacity(mapped.len() + 7 + reach as usize);

    for column in [anchor.x - 1, anchor.x + 1] {
        for row in JUNCTION_ROWS {
            staged.push(((column, row), branch_tile(TileKind::Crosswalk)));
        }
    }
    staged.push(((anchor.x, 0), branch_tile(TileKind::Intersection)));

    for k in 0..reach - 1 {
        staged.push(((anchor.x, d * (1 + k)), branch_tile(TileKind::Road)));
    }

    staged.extend(
        mapped
            .into_iter()
            .map(|(x, y, tile)| ((x, y), tile.clone())),
    );

    let mut claimed: HashSet<(i64, i64)> = HashSet::with_capacity(staged.len());
    for ((x, y), _) in &staged {
        if parent.is_occupied(*x, *y) || !claimed.insert((*x, *y)) {
            return Err(CombineError::Occupied { x: *x, y: *y });
        }
    }

    let mut combined = parent.clone();
    for ((x, y), tile) in staged {
        combined.place(x, y, tile)?;
    }
    Ok(combined)
}

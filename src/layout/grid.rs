//! Sparse tile grid

use crate::error::CombineError;
use crate::layout::tile::{Tile, TileKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive bounding box of occupied cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl Bounds {
    pub fn width(&self) -> i64 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> i64 {
        self.max_y - self.min_y + 1
    }
}

/// Sparse map `x -> y -> Tile`
///
/// `x` is the distance along a directory's road, `y` the lateral offset from
/// its spine (`y = 0`). Each occupied cell holds exactly one tile; `place`
/// refuses to overwrite. Iteration order is ascending `x`, then `y`, which
/// keeps every traversal deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    columns: BTreeMap<i64, BTreeMap<i64, Tile>>,
}

impl Grid {
    /// Empty grid; also the placeholder for an unexpanded directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid holding only `DIR_START(owner)` at the origin
    pub fn seeded(owner_path: &str, parent_path: Option<&str>) -> Self {
        let mut grid = Self::new();
        grid.columns.entry(0).or_default().insert(
            0,
            Tile::new(
                TileKind::DirStart,
                owner_path,
                parent_path.map(str::to_string),
            ),
        );
        grid
    }

    /// True for the empty placeholder returned by a depth cutoff
    pub fn is_placeholder(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, x: i64, y: i64) -> Option<&Tile> {
        self.columns.get(&x).and_then(|column| column.get(&y))
    }

    pub fn is_occupied(&self, x: i64, y: i64) -> bool {
        self.get(x, y).is_some()
    }

    /// Put a tile into a free cell
    pub fn place(&mut self, x: i64, y: i64, tile: Tile) -> Result<(), CombineError> {
        let column = self.columns.entry(x).or_default();
        if column.contains_key(&y) {
            return Err(CombineError::Occupied { x, y });
        }
        column.insert(y, tile);
        Ok(())
    }

    /// All occupied cells in ascending `(x, y)` order
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64, &Tile)> {
        self.columns
            .iter()
            .flat_map(|(&x, column)| column.iter().map(move |(&y, tile)| (x, y, tile)))
    }

    pub fn len(&self) -> usize {
        self.columns.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut cells = self.cells();
        let (x, y, _) = cells.next()?;
        let mut bounds = Bounds {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        };
        for (x, y, _) in cells {
            bounds.min_x = bounds.min_x.min(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_x = bounds.max_x.max(x);
            bounds.max_y = bounds.max_y.max(y);
        }
        Some(bounds)
    }

    /// `1 + max |y|` over the grid; the lateral room a child street needs
    /// before its innermost tile clears the parent spine
    pub fn spine_height(&self) -> i64 {
        1 + self.cells().map(|(_, y, _)| y.abs()).max().unwrap_or(0)
    }

    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.cells().filter(|(_, _, tile)| tile.kind == kind).count()
    }

    /// First cell holding `kind` owned by `owner_path`
    pub fn find_marker(&self, kind: TileKind, owner_path: &str) -> Option<(i64, i64)> {
        self.cells()
            .find(|(_, _, tile)| tile.kind == kind && tile.owner_path == owner_path)
            .map(|(x, y, _)| (x, y))
    }

    /// Real-world position of a cell's origin for a given cell size
    pub fn world_position(x: i64, y: i64, cell_size: f64) -> (f64, f64) {
        (x as f64 * cell_size, y as f64 * cell_size)
    }
}

//! Tile types

use serde::{Deserialize, Serialize};

/// Kind of layout geometry a cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileKind {
    DirStart,
    DirEnd,
    Road,
    Crosswalk,
    Intersection,
    Building,
}

impl TileKind {
    /// Whether a street can be driven across this tile
    pub fn is_walkable(self) -> bool {
        !matches!(self, TileKind::Building)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TileKind::DirStart => "DIR_START",
            TileKind::DirEnd => "DIR_END",
            TileKind::Road => "ROAD",
            TileKind::Crosswalk => "CROSSWALK",
            TileKind::Intersection => "INTERSECTION",
            TileKind::Building => "BUILDING",
        }
    }
}

impl std::fmt::Display for TileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One occupied grid cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    /// Tree node this geometry belongs to
    pub owner_path: String,
    /// Parent directory of the owner (None for the root)
    pub parent_path: Option<String>,
}

impl Tile {
    pub fn new(kind: TileKind, owner_path: impl Into<String>, parent_path: Option<String>) -> Self {
        Self {
            kind,
            owner_path: owner_path.into(),
            parent_path,
        }
    }
}

//! Layout engine: maps a source tree onto a collision-free tile grid
//!
//! Directories become streets, files become buildings. Each directory is laid
//! out in its own frame and embedded into its parent at right angles; every
//! embedding attempt works on a copy, so only conflict-free grids escape.

pub mod anchor;
pub mod builder;
pub mod combine;
pub mod complexity;
pub mod gap;
pub mod grid;
pub mod plan;
pub mod settings;
pub mod tile;
pub mod transform;

pub use anchor::{search_anchor, AnchorRequest, Placement};
pub use builder::{build_layout, Branch, CityLayout, LayoutBuilder, Street};
pub use combine::combine;
pub use complexity::{
    building_tiers, complexity, road_depth, road_tier, RoadTier, MAX_BUILDING_TIERS,
};
pub use gap::{enforce_min_gap, Lane, LaneNode, Span};
pub use grid::{Bounds, Grid};
pub use plan::{plan_street, Frontage, Junction, StreetPlan};
pub use settings::{ExhaustedPolicy, LayoutConfig, TieBreak};
pub use tile::{Tile, TileKind};
pub use transform::{Anchor, Side, Transform};

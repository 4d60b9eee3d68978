//! Complexity estimator: road size tier from subtree size

use serde::{Deserialize, Serialize};

/// Discretized road size, in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadTier {
    Narrow,
    Medium,
    Wide,
}

impl RoadTier {
    /// Road depth in grid units
    pub fn depth(self) -> u32 {
        match self {
            RoadTier::Narrow => 2,
            RoadTier::Medium => 4,
            RoadTier::Wide => 6,
        }
    }

    /// Road width in world units for a given cell size
    pub fn width(self, cell_size: f64) -> f64 {
        f64::from(self.depth()) * cell_size
    }
}

/// `ceil(ln(n))`, or None when the log is zero or undefined (`n <= 1`)
pub fn complexity(num_descendants: usize) -> Option<u32> {
    if num_descendants <= 1 {
        return None;
    }
    Some((num_descendants as f64).ln().ceil() as u32)
}

/// Map a directory's descendant count to its road tier
///
/// Degenerate counts (0 or 1) fall into the narrowest tier.
pub fn road_tier(num_descendants: usize) -> RoadTier {
    match complexity(num_descendants) {
        None => RoadTier::Narrow,
        Some(c) if c <= 2 => RoadTier::Narrow,
        Some(c) if c < 6 => RoadTier::Medium,
        Some(_) => RoadTier::Wide,
    }
}

/// Road depth (2, 4 or 6 grid units) for a descendant count
pub fn road_depth(num_descendants: usize) -> u32 {
    road_tier(num_descendants).depth()
}

/// Upper line bound of each building tier; anything past the last is the top tier
const TIER_LINE_LIMITS: [u64; 9] = [50, 100, 200, 400, 700, 1000, 1500, 2500, 4000];

/// Tallest building, in stories
pub const MAX_BUILDING_TIERS: u32 = 10;

/// Stories of a building with `num_lines` lines (1 through 10)
///
/// Files without a line count (binary, unreadable, or unexpanded
/// directories) are one story.
pub fn building_tiers(num_lines: Option<u64>) -> u32 {
    let lines = num_lines.unwrap_or(0);
    let below = TIER_LINE_LIMITS
        .iter()
        .take_while(|limit| lines > **limit)
        .count() as u32;
    (below + 1).min(MAX_BUILDING_TIERS)
}
